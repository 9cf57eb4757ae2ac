//! Button slot: an icon centered over a name row.

use crate::panel::color;
use crate::panel::descriptor::ValueDef;
use crate::panel::icons;
use crate::panel::items::{ItemRenderer, vertically_centered};
use crate::panel::theme::StyleSheet;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

#[derive(Debug, Default)]
pub struct ButtonItem {
    state: Option<ButtonState>,
}

#[derive(Debug)]
struct ButtonState {
    name: String,
    glyph: &'static str,
    emphasized: bool,
    col: String,
    ctype: String,
}

impl ButtonItem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemRenderer for ButtonItem {
    fn set_value(&mut self, value: &ValueDef, _styles: &StyleSheet) {
        let (glyph, emphasized) = match &value.icon {
            Some(icon) => (
                icons::glyph(&icon.name),
                icon.size >= icons::LARGE_ICON_MIN,
            ),
            None => ("", false),
        };
        self.state = Some(ButtonState {
            name: value.name.clone(),
            glyph,
            emphasized,
            col: value.col.clone(),
            ctype: value.ctype.clone(),
        });
    }

    fn render(&self, frame: &mut Frame, area: Rect, styles: &StyleSheet, pressed: bool) {
        let Some(state) = &self.state else {
            return;
        };
        let bg = if pressed {
            styles.pressed_bg
        } else {
            color::background_color(&state.col, &state.ctype, styles, styles.button_bg)
        };
        let fg = color::text_color(&state.col, &state.ctype, styles);
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(area);

        if !state.glyph.is_empty() && chunks[0].height > 0 {
            let mut glyph_style = Style::default().fg(fg);
            if state.emphasized {
                glyph_style = glyph_style.add_modifier(Modifier::BOLD);
            }
            let lines = vertically_centered(
                vec![Line::styled(state.glyph, glyph_style)],
                chunks[0].height,
            );
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                chunks[0],
            );
        }

        frame.render_widget(
            Paragraph::new(state.name.as_str())
                .style(Style::default().fg(fg))
                .alignment(Alignment::Center),
            chunks[1],
        );
    }
}
