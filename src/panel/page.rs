//! Page composer: one grid of slots plus the back strip on sub pages.
//!
//! Slots are fixed at build time; values and visibility arrive later per
//! index. Hit rects refresh on every render, so taps always resolve against
//! what is actually on screen.

use crate::consts::cli_consts;
use crate::panel::descriptor::{PageDef, ValueDef};
use crate::panel::grid::{self, GridGeometry, Span, SpanRequest};
use crate::panel::icons;
use crate::panel::items::{self, ItemRenderer, vertically_centered};
use crate::panel::theme::StyleSheet;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

/// What hit testing found under a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHit {
    /// A live slot, by item index.
    Item(usize),
    /// The back strip of a non-root page.
    Back,
}

#[derive(Debug)]
struct Slot {
    span: Span,
    /// None for layout tags nothing renders; the slot stays inert but keeps
    /// its place in the grid.
    renderer: Option<Box<dyn ItemRenderer>>,
    hidden: bool,
    rect: Option<Rect>,
}

#[derive(Debug)]
pub struct PagePanel {
    columns: u16,
    rows: u16,
    slots: Vec<Slot>,
    is_root: bool,
    back_rect: Option<Rect>,
}

impl PagePanel {
    /// Build the slot list from a page definition. Every declared item gets
    /// a slot and advances placement, whether or not its tag is known.
    pub fn build(index: usize, def: &PageDef) -> Self {
        let requests: Vec<SpanRequest> = def
            .items
            .iter()
            .map(|item| SpanRequest {
                col: item.col,
                row: item.row,
                w: item.cols,
                h: item.rows,
            })
            .collect();
        let spans = grid::place(def.cols.max(1), &requests);

        let slots = def
            .items
            .iter()
            .zip(spans)
            .map(|(item, span)| {
                let renderer = match items::new_renderer(&item.layout) {
                    Ok(renderer) => Some(renderer),
                    Err(error) => {
                        log::debug!("page {}: {}", index, error);
                        None
                    }
                };
                Slot {
                    span,
                    renderer,
                    hidden: false,
                    rect: None,
                }
            })
            .collect();

        Self {
            columns: def.cols.max(1),
            rows: def.rows.max(1),
            slots,
            is_root: index == 0,
            back_rect: None,
        }
    }

    /// Route a value to a slot. Out of range indices and inert slots are
    /// ignored; a hide marker toggles visibility without touching renderer
    /// state, anything else makes the slot visible again.
    pub fn set_value(&mut self, item: i64, value: &ValueDef, styles: &StyleSheet) {
        if item < 0 || item as usize >= self.slots.len() {
            return;
        }
        let slot = &mut self.slots[item as usize];
        let Some(renderer) = slot.renderer.as_mut() else {
            return;
        };
        if value.is_hidden() {
            slot.hidden = true;
            return;
        }
        slot.hidden = false;
        renderer.set_value(value, styles);
    }

    /// Tear down every slot renderer.
    pub fn destroy(&mut self) {
        for slot in &mut self.slots {
            if let Some(renderer) = slot.renderer.as_mut() {
                renderer.destroy();
            }
        }
        self.slots.clear();
    }

    /// Paint the page and refresh the hit rects. `pressed` highlights one
    /// slot for the tap flash.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        styles: &StyleSheet,
        pressed: Option<usize>,
    ) {
        let grid_area = if self.is_root {
            self.back_rect = None;
            area
        } else {
            let strip_width = cli_consts::BACK_STRIP_WIDTH.min(area.width);
            let back_area = Rect {
                width: strip_width,
                ..area
            };
            self.render_back_strip(frame, back_area, styles);
            self.back_rect = Some(back_area);

            let offset = strip_width.saturating_add(styles.gap).min(area.width);
            Rect {
                x: area.x + offset,
                width: area.width - offset,
                ..area
            }
        };

        let geometry = GridGeometry::uniform(grid_area, self.columns, self.rows, styles.gap);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.rect = None;
            let Some(renderer) = slot.renderer.as_ref() else {
                continue;
            };
            if slot.hidden {
                continue;
            }
            let Some(rect) = geometry.cell(slot.span) else {
                continue;
            };
            renderer.render(frame, rect, styles, pressed == Some(index));
            slot.rect = Some(rect);
        }
    }

    fn render_back_strip(&self, frame: &mut Frame, area: Rect, styles: &StyleSheet) {
        frame.render_widget(
            Block::default().style(Style::default().bg(styles.button_bg)),
            area,
        );
        let lines = vertically_centered(
            vec![Line::styled(
                icons::glyph("arrow-left"),
                Style::default().fg(styles.text),
            )],
            area.height,
        );
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    /// Report what sits under a terminal coordinate, using the rects from
    /// the latest render.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<PageHit> {
        if let Some(rect) = self.back_rect {
            if grid::hit(rect, x, y) {
                return Some(PageHit::Back);
            }
        }
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(rect) = slot.rect {
                if grid::hit(rect, x, y) {
                    return Some(PageHit::Item(index));
                }
            }
        }
        None
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
