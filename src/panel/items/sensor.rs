//! Sensor slot: icon and name on top, a large value bottom-right with an
//! optional small unit beside it.

use crate::panel::color;
use crate::panel::descriptor::ValueDef;
use crate::panel::icons;
use crate::panel::items::ItemRenderer;
use crate::panel::theme::StyleSheet;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

#[derive(Debug, Default)]
pub struct SensorItem {
    state: Option<SensorState>,
}

#[derive(Debug)]
struct SensorState {
    name: String,
    glyph: &'static str,
    value: String,
    unit: String,
    col: String,
    ctype: String,
}

impl SensorItem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemRenderer for SensorItem {
    fn set_value(&mut self, value: &ValueDef, _styles: &StyleSheet) {
        let glyph = match &value.icon {
            Some(icon) => icons::glyph(&icon.name),
            None => "",
        };
        self.state = Some(SensorState {
            name: value.name.clone(),
            glyph,
            value: value.value.clone(),
            unit: value.unit.clone(),
            col: value.col.clone(),
            ctype: value.ctype.clone(),
        });
    }

    fn render(&self, frame: &mut Frame, area: Rect, styles: &StyleSheet, pressed: bool) {
        let Some(state) = &self.state else {
            return;
        };
        // Sensors sit on the panel background, not the button one.
        let bg = if pressed {
            styles.pressed_bg
        } else {
            color::background_color(&state.col, &state.ctype, styles, styles.panel_bg)
        };
        let fg = color::text_color(&state.col, &state.ctype, styles);
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        if area.height > 1 {
            let mut header = Vec::new();
            if !state.glyph.is_empty() {
                header.push(Span::raw(state.glyph));
                header.push(Span::raw(" "));
            }
            header.push(Span::raw(state.name.as_str()));
            let header_area = Rect { height: 1, ..area };
            frame.render_widget(
                Paragraph::new(Line::from(header)).style(Style::default().fg(fg)),
                header_area,
            );
        }

        let mut value_line = vec![Span::styled(
            state.value.as_str(),
            Style::default().fg(fg).add_modifier(styles.value_modifier),
        )];
        if !state.unit.is_empty() {
            value_line.push(Span::raw(" "));
            value_line.push(Span::styled(
                state.unit.as_str(),
                Style::default().fg(fg).add_modifier(styles.unit_modifier),
            ));
        }
        let value_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(Line::from(value_line)).alignment(Alignment::Right),
            value_area,
        );
    }
}
