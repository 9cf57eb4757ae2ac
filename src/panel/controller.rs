//! Dashboard controller: the panel state machine.
//!
//! Commands apply one at a time on the UI task; outbound interaction events
//! leave through a non-blocking line to the publisher worker. A malformed
//! payload aborts its own command only.

use crate::consts::cli_consts;
use crate::host::protocol::{
    PanelCommand, PlayRtttlArgs, SetPagesArgs, SetThemeArgs, SetValueArgs, ShowMoreArgs,
    ShowPageArgs,
};
use crate::panel::descriptor::{MoreInfoDef, PageDef, ValueDef};
use crate::panel::error::PanelError;
use crate::panel::page::{PageHit, PagePanel};
use crate::panel::theme::{StyleSheet, Theme};
use crate::workers::core::OutboundLine;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::{Duration, Instant};

/// What a successfully applied command did, for session reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Theme,
    Pages(usize),
    Value { page: i64, item: i64 },
    Page(i64),
    MoreShown,
    MoreHidden,
    Sound(String),
    Ignored(String),
}

/// The overlay detail state. The detail dialog proper belongs to the host;
/// only its identity travels here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoreInfo {
    pub id: String,
    pub title: String,
}

#[derive(Debug)]
struct PressFlash {
    page: usize,
    item: usize,
    since: Instant,
}

#[derive(Debug)]
pub struct Dashboard {
    theme: Theme,
    styles: StyleSheet,
    pages: Vec<PagePanel>,
    active_page: usize,
    more_info: Option<MoreInfo>,
    pressed: Option<PressFlash>,
    outbound: OutboundLine,
}

impl Dashboard {
    pub fn new(outbound: OutboundLine) -> Self {
        // The resolved theme exists before any pages do, so an early
        // set_pages never sees a missing style.
        let theme = Theme::default();
        let styles = StyleSheet::from_theme(&theme);
        Self {
            theme,
            styles,
            pages: Vec::new(),
            active_page: 0,
            more_info: None,
            pressed: None,
            outbound,
        }
    }

    /// Apply one inbound command. Unknown names are reported, not errors.
    pub fn apply(&mut self, command: &PanelCommand) -> Result<Applied, PanelError> {
        match command.name.as_str() {
            "set_theme" => {
                let args: SetThemeArgs = serde_json::from_value(command.data.clone())?;
                let partial: serde_json::Value = serde_json::from_str(&args.json_value)?;
                self.set_theme(&partial);
                Ok(Applied::Theme)
            }
            "set_pages" => {
                let args: SetPagesArgs = serde_json::from_value(command.data.clone())?;
                // Parse every page before touching the current set, so a bad
                // entry leaves the old pages standing.
                let mut defs = Vec::with_capacity(args.jsons.len());
                for json in &args.jsons {
                    defs.push(serde_json::from_str::<PageDef>(json)?);
                }
                let count = defs.len();
                self.set_pages(&defs);
                Ok(Applied::Pages(count))
            }
            "set_value" => {
                let args: SetValueArgs = serde_json::from_value(command.data.clone())?;
                let value: ValueDef = serde_json::from_str(&args.json_value)?;
                self.set_value(args.page, args.item, &value);
                Ok(Applied::Value {
                    page: args.page,
                    item: args.item,
                })
            }
            "show_page" => {
                let args: ShowPageArgs = serde_json::from_value(command.data.clone())?;
                if self.show_page(args.page) {
                    Ok(Applied::Page(args.page))
                } else {
                    Ok(Applied::Ignored(format!("show_page {}", args.page)))
                }
            }
            "show_more" => {
                let args: ShowMoreArgs = serde_json::from_value(command.data.clone())?;
                let def: MoreInfoDef = serde_json::from_str(&args.json_value)?;
                self.show_more(def);
                Ok(Applied::MoreShown)
            }
            "hide_more" => {
                self.hide_more();
                Ok(Applied::MoreHidden)
            }
            "play_rtttl" => {
                let args: PlayRtttlArgs = serde_json::from_value(command.data.clone())?;
                Ok(Applied::Sound(song_name(&args.song)))
            }
            other => {
                log::debug!("ignoring unknown command {}", other);
                Ok(Applied::Ignored(other.to_string()))
            }
        }
    }

    fn set_theme(&mut self, partial: &serde_json::Value) {
        // Pages and their renderer instances stay as they are; only the
        // derived styles change.
        self.theme = Theme::resolve(partial);
        self.styles = StyleSheet::from_theme(&self.theme);
    }

    fn set_pages(&mut self, defs: &[PageDef]) {
        for page in &mut self.pages {
            page.destroy();
        }
        self.pages = defs
            .iter()
            .enumerate()
            .map(|(index, def)| PagePanel::build(index, def))
            .collect();
        self.pressed = None;
        self.active_page = 0;
        if !self.pages.is_empty() {
            self.show_page(0);
        }
    }

    fn set_value(&mut self, page: i64, item: i64, value: &ValueDef) {
        if page < 0 || page as usize >= self.pages.len() {
            return;
        }
        self.pages[page as usize].set_value(item, value, &self.styles);
    }

    fn show_page(&mut self, page: i64) -> bool {
        // Out of range switches are dropped wholesale, keeping exactly one
        // page visible. In range ones always announce, even unchanged.
        if page < 0 || page as usize >= self.pages.len() {
            return false;
        }
        self.active_page = page as usize;
        self.outbound.send_page(self.active_page);
        true
    }

    fn show_more(&mut self, def: MoreInfoDef) {
        self.more_info = Some(MoreInfo {
            id: def.id,
            title: def.title,
        });
        self.outbound.send_more(true);
    }

    fn hide_more(&mut self) {
        self.more_info = None;
        self.outbound.send_more(false);
    }

    /// Local dismissal, from Esc or a tap while the overlay is up. Announces
    /// the hide just like a host driven one.
    pub fn dismiss_more(&mut self) {
        if self.more_info.is_some() {
            self.hide_more();
        }
    }

    /// Route a terminal tap. Returns true when it hit something.
    pub fn handle_tap(&mut self, x: u16, y: u16) -> bool {
        if self.more_info.is_some() {
            // The overlay is modal; any tap closes it.
            self.dismiss_more();
            return true;
        }
        let page = self.active_page;
        let Some(panel) = self.pages.get(page) else {
            return false;
        };
        match panel.hit_test(x, y) {
            Some(PageHit::Item(item)) => {
                self.pressed = Some(PressFlash {
                    page,
                    item,
                    since: Instant::now(),
                });
                self.outbound.send_click(page, item);
                true
            }
            Some(PageHit::Back) => {
                self.show_page(0);
                true
            }
            None => false,
        }
    }

    /// Return to the root page, the keyboard analog of the back strip.
    pub fn back_to_root(&mut self) {
        if self.active_page != 0 {
            self.show_page(0);
        }
    }

    /// Expire the tap flash. Called once per frame.
    pub fn update(&mut self) {
        if let Some(flash) = &self.pressed {
            if flash.since.elapsed() >= Duration::from_millis(cli_consts::PRESS_FLASH_MS) {
                self.pressed = None;
            }
        }
    }

    /// Paint the active page, or a waiting hint before the first page set,
    /// plus the overlay popup when one is up.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(self.styles.panel_bg)),
            area,
        );
        if self.pages.is_empty() {
            if area.height > 0 {
                let hint = Rect {
                    y: area.y + area.height / 2,
                    height: 1,
                    ..area
                };
                frame.render_widget(
                    Paragraph::new("Waiting for page definitions...")
                        .style(Style::default().fg(self.styles.text))
                        .alignment(Alignment::Center),
                    hint,
                );
            }
        } else {
            let pressed = self
                .pressed
                .as_ref()
                .filter(|flash| flash.page == self.active_page)
                .map(|flash| flash.item);
            let active = self.active_page;
            let styles = self.styles.clone();
            if let Some(panel) = self.pages.get_mut(active) {
                panel.render(frame, area, &styles, pressed);
            }
        }
        if let Some(info) = &self.more_info {
            render_more_popup(frame, area, &self.styles, info);
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn more_info(&self) -> Option<&MoreInfo> {
        self.more_info.as_ref()
    }
}

/// The ringtone's display name is everything before the first settings
/// separator.
fn song_name(song: &str) -> String {
    song.split(':').next().unwrap_or(song).trim().to_string()
}

fn render_more_popup(frame: &mut Frame, area: Rect, styles: &StyleSheet, info: &MoreInfo) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(44),
            Constraint::Fill(1),
        ])
        .split(vertical[1]);
    let popup = horizontal[1];

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .title(" More info ")
        .borders(Borders::ALL)
        .border_type(styles.border_type)
        .style(Style::default().bg(styles.panel_bg).fg(styles.text));
    let title = if info.title.is_empty() {
        info.id.clone()
    } else {
        info.title.clone()
    };
    let lines = vec![
        Line::default(),
        Line::styled(
            title,
            Style::default().fg(styles.text).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            info.id.clone(),
            Style::default().fg(styles.text).add_modifier(Modifier::DIM),
        ),
        Line::default(),
        Line::styled(
            "Esc to close",
            Style::default().fg(styles.text).add_modifier(Modifier::DIM),
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::protocol::PanelEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn dashboard() -> (Dashboard, mpsc::Receiver<PanelEvent>) {
        let (tx, rx) = mpsc::channel(32);
        (Dashboard::new(OutboundLine::new(tx, "conn-test".to_string())), rx)
    }

    fn drain(rx: &mut mpsc::Receiver<PanelEvent>) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn command(name: &str, data: serde_json::Value) -> PanelCommand {
        PanelCommand {
            name: name.to_string(),
            data,
        }
    }

    fn pages_command(pages: &[serde_json::Value]) -> PanelCommand {
        let jsons: Vec<String> = pages.iter().map(|p| p.to_string()).collect();
        command("set_pages", json!({ "jsons": jsons }))
    }

    fn two_button_pages() -> PanelCommand {
        pages_command(&[
            json!({ "rows": 1, "cols": 3, "items": [
                {"layout": "button"}, {"layout": "button"}, {"layout": "button"}
            ]}),
            json!({ "rows": 1, "cols": 3, "items": [
                {"layout": "button"}, {"layout": "button"}, {"layout": "sensor"}
            ]}),
        ])
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    // A fresh page set lands on the root page and announces it once.
    fn test_set_pages_shows_root() {
        let (mut dash, mut rx) = dashboard();
        let applied = dash.apply(&two_button_pages()).unwrap();

        assert_eq!(applied, Applied::Pages(2));
        assert_eq!(dash.page_count(), 2);
        assert_eq!(dash.active_page(), 0);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "page");
        assert_eq!(events[0].data, json!({ "page": 0 }));
    }

    #[test]
    fn test_show_page_switches_and_announces() {
        let (mut dash, mut rx) = dashboard();
        dash.apply(&two_button_pages()).unwrap();
        drain(&mut rx);

        dash.apply(&command("show_page", json!({ "page": 1 }))).unwrap();
        assert_eq!(dash.active_page(), 1);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data, json!({ "page": 1 }));

        // Same index announces again.
        dash.apply(&command("show_page", json!({ "page": 1 }))).unwrap();
        assert_eq!(drain(&mut rx).len(), 1);

        // Out of range is dropped wholesale: no switch, no event.
        dash.apply(&command("show_page", json!({ "page": 7 }))).unwrap();
        assert_eq!(dash.active_page(), 1);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    // A theme swap must not rebuild pages: values set before it survive.
    fn test_theme_swap_keeps_renderer_state() {
        let (mut dash, mut rx) = dashboard();
        dash.apply(&pages_command(&[json!({
            "rows": 1, "cols": 1, "items": [{"layout": "sensor"}]
        })]))
        .unwrap();
        dash.apply(&command(
            "set_value",
            json!({
                "page": 0, "item": 0,
                "json_value": json!({ "name": "Temp", "value": "21.5", "unit": "C" }).to_string()
            }),
        ))
        .unwrap();

        dash.apply(&command(
            "set_theme",
            json!({ "json_value": json!({ "panel_bg_color": "#000000" }).to_string() }),
        ))
        .unwrap();

        let mut term = Terminal::new(TestBackend::new(20, 5)).unwrap();
        term.draw(|f| dash.render(f, f.area())).unwrap();
        assert!(buffer_text(&term).contains("21.5"));
        drain(&mut rx);
    }

    #[test]
    // A tap on a slot reports exactly one click with its page and item.
    fn test_tap_reports_click() {
        let (mut dash, mut rx) = dashboard();
        dash.apply(&two_button_pages()).unwrap();
        dash.apply(&command("show_page", json!({ "page": 1 }))).unwrap();
        drain(&mut rx);

        let mut term = Terminal::new(TestBackend::new(24, 6)).unwrap();
        term.draw(|f| dash.render(f, f.area())).unwrap();

        // Page 1 is a sub page: a back strip then three slots over the rest.
        assert!(dash.handle_tap(22, 3));
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "click");
        assert_eq!(
            events[0].data,
            json!({ "page": 1, "item": 2, "long": false })
        );
    }

    #[test]
    fn test_back_strip_returns_to_root() {
        let (mut dash, mut rx) = dashboard();
        dash.apply(&two_button_pages()).unwrap();
        dash.apply(&command("show_page", json!({ "page": 1 }))).unwrap();
        drain(&mut rx);

        let mut term = Terminal::new(TestBackend::new(24, 6)).unwrap();
        term.draw(|f| dash.render(f, f.area())).unwrap();

        assert!(dash.handle_tap(2, 3));
        assert_eq!(dash.active_page(), 0);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "page");
        assert_eq!(events[0].data, json!({ "page": 0 }));
    }

    #[test]
    fn test_more_overlay_events() {
        let (mut dash, mut rx) = dashboard();

        dash.apply(&command(
            "show_more",
            json!({ "json_value": json!({ "id": "light.kitchen", "title": "Kitchen" }).to_string() }),
        ))
        .unwrap();
        assert!(dash.more_info().is_some());
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "more");
        assert_eq!(events[0].data, json!({ "visible": "1" }));

        dash.apply(&command("hide_more", json!({}))).unwrap();
        assert!(dash.more_info().is_none());
        assert_eq!(drain(&mut rx)[0].data, json!({ "visible": "0" }));

        // Local dismissal with nothing up stays silent.
        dash.dismiss_more();
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    // While the overlay is up it eats taps instead of the page below.
    fn test_overlay_is_modal() {
        let (mut dash, mut rx) = dashboard();
        dash.apply(&two_button_pages()).unwrap();
        dash.apply(&command(
            "show_more",
            json!({ "json_value": json!({ "id": "light.kitchen" }).to_string() }),
        ))
        .unwrap();
        drain(&mut rx);

        let mut term = Terminal::new(TestBackend::new(24, 6)).unwrap();
        term.draw(|f| dash.render(f, f.area())).unwrap();

        assert!(dash.handle_tap(3, 3));
        assert!(dash.more_info().is_none());
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "more");
        assert_eq!(events[0].data, json!({ "visible": "0" }));
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let (mut dash, mut rx) = dashboard();
        let applied = dash
            .apply(&command("set_brightness", json!({ "level": 3 })))
            .unwrap();
        assert_eq!(applied, Applied::Ignored("set_brightness".to_string()));
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    // Bad JSON aborts only its own command; the session keeps going.
    fn test_malformed_payload_is_an_error() {
        let (mut dash, _rx) = dashboard();
        let result = dash.apply(&command(
            "set_value",
            json!({ "page": 0, "item": 0, "json_value": "{not json" }),
        ));
        assert!(matches!(result, Err(PanelError::Payload(_))));

        // The dashboard still applies the next command.
        dash.apply(&two_button_pages()).unwrap();
        assert_eq!(dash.page_count(), 2);
    }

    #[test]
    // Values aimed at pages that do not exist disappear quietly.
    fn test_value_out_of_range_ignored() {
        let (mut dash, _rx) = dashboard();
        dash.apply(&two_button_pages()).unwrap();
        dash.apply(&command(
            "set_value",
            json!({ "page": 9, "item": 0, "json_value": "{}" }),
        ))
        .unwrap();
        dash.apply(&command(
            "set_value",
            json!({ "page": -1, "item": 0, "json_value": "{}" }),
        ))
        .unwrap();
    }

    #[test]
    fn test_play_rtttl_reports_song_name() {
        let (mut dash, _rx) = dashboard();
        let applied = dash
            .apply(&command(
                "play_rtttl",
                json!({ "song": "doorbell:d=4,o=5,b=100:8e6,8c6" }),
            ))
            .unwrap();
        assert_eq!(applied, Applied::Sound("doorbell".to_string()));
    }

    #[test]
    // An empty page list clears everything and stays silent.
    fn test_empty_page_set() {
        let (mut dash, mut rx) = dashboard();
        dash.apply(&two_button_pages()).unwrap();
        drain(&mut rx);

        dash.apply(&pages_command(&[])).unwrap();
        assert_eq!(dash.page_count(), 0);
        assert!(drain(&mut rx).is_empty());

        let mut term = Terminal::new(TestBackend::new(40, 6)).unwrap();
        term.draw(|f| dash.render(f, f.area())).unwrap();
        assert!(buffer_text(&term).contains("Waiting for page definitions"));
    }
}
