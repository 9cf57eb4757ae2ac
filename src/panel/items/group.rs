//! Layout group slot: a nested grid of icon or label cells.
//!
//! Cells place with the shared fold. `_h` cells are skipped outright, so
//! they neither render nor advance the cursor. Cell colors tint text only;
//! the group background comes from the group's own descriptor.

use crate::panel::color;
use crate::panel::descriptor::ValueDef;
use crate::panel::grid::{self, GridGeometry, Span, SpanRequest};
use crate::panel::icons;
use crate::panel::items::{ItemRenderer, vertically_centered};
use crate::panel::theme::StyleSheet;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

#[derive(Debug, Default)]
pub struct GroupItem {
    state: Option<GroupState>,
}

#[derive(Debug)]
struct GroupState {
    col: String,
    ctype: String,
    col_tracks: Vec<u16>,
    row_tracks: Vec<u16>,
    cells: Vec<GroupCell>,
}

#[derive(Debug)]
struct GroupCell {
    span: Span,
    content: CellContent,
    col: String,
    ctype: String,
}

#[derive(Debug)]
enum CellContent {
    Icon(&'static str),
    Label(String),
}

impl GroupItem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemRenderer for GroupItem {
    fn set_value(&mut self, value: &ValueDef, _styles: &StyleSheet) {
        let visible: Vec<_> = value
            .items
            .iter()
            .filter(|cell| !cell.is_hidden())
            .collect();
        let requests: Vec<SpanRequest> = visible
            .iter()
            .map(|cell| SpanRequest {
                col: cell.x,
                row: cell.y,
                w: cell.w,
                h: cell.h,
            })
            .collect();
        let columns = value.cols.len().max(1) as u16;
        let spans = grid::place(columns, &requests);

        let cells = visible
            .iter()
            .zip(spans)
            .map(|(cell, span)| GroupCell {
                span,
                content: match &cell.icon {
                    Some(icon) => CellContent::Icon(icons::glyph(&icon.name)),
                    None => CellContent::Label(cell.label.clone().unwrap_or_default()),
                },
                col: cell.col.clone(),
                ctype: cell.ctype.clone(),
            })
            .collect();

        self.state = Some(GroupState {
            col: value.col.clone(),
            ctype: value.ctype.clone(),
            col_tracks: value.cols.clone(),
            row_tracks: value.rows.clone(),
            cells,
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
        frame.render_widget(Block::default().style(Style::default().bg(bg)), area);

        // Inner cells pack tight; the theme gutter applies between slots,
        // not inside a group.
        let geometry = GridGeometry::new(area, &state.col_tracks, &state.row_tracks, 0);
        for cell in &state.cells {
            let Some(rect) = geometry.cell(cell.span) else {
                continue;
            };
            let fg = color::text_color(&cell.col, &cell.ctype, styles);
            let text = match &cell.content {
                CellContent::Icon(glyph) => Line::styled(*glyph, Style::default().fg(fg)),
                CellContent::Label(label) => {
                    Line::styled(label.clone(), Style::default().fg(fg))
                }
            };
            let lines = vertically_centered(vec![text], rect.height);
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
        }
    }
}
