//! Item renderers, one variant per layout tag.
//!
//! A renderer owns the interior of one grid slot. `set_value` replaces its
//! retained state wholesale from a fresh descriptor; drawing then repaints
//! the slot from that state every frame. Until the first value arrives a
//! renderer paints nothing.

mod button;
mod group;
mod picture;
mod sensor;

pub use button::ButtonItem;
pub use group::GroupItem;
pub use picture::PictureItem;
pub use sensor::SensorItem;

use crate::panel::descriptor::ValueDef;
use crate::panel::error::PanelError;
use crate::panel::theme::StyleSheet;
use ratatui::Frame;
use ratatui::layout::Rect;

pub trait ItemRenderer: std::fmt::Debug + Send {
    /// Replace the retained slot state from a fresh descriptor. Idempotent:
    /// the same descriptor always renders the same output.
    fn set_value(&mut self, value: &ValueDef, styles: &StyleSheet);

    /// Paint the slot. `pressed` swaps the background to the pressed color
    /// for the tap flash.
    fn render(&self, frame: &mut Frame, area: Rect, styles: &StyleSheet, pressed: bool);

    /// Release held resources. Default no-op, present for uniform lifecycle.
    fn destroy(&mut self) {}
}

/// Create the renderer for a layout tag. Unknown tags are rejected so the
/// caller can distinguish an inert slot from a present one.
pub fn new_renderer(layout: &str) -> Result<Box<dyn ItemRenderer>, PanelError> {
    match layout {
        "button" => Ok(Box::new(ButtonItem::new())),
        "sensor" => Ok(Box::new(SensorItem::new())),
        "picture" => Ok(Box::new(PictureItem::new())),
        "layout" => Ok(Box::new(GroupItem::new())),
        other => Err(PanelError::UnsupportedLayout(other.to_string())),
    }
}

/// Center `lines` vertically by padding with empty lines.
pub(crate) fn vertically_centered(
    mut lines: Vec<ratatui::text::Line<'static>>,
    height: u16,
) -> Vec<ratatui::text::Line<'static>> {
    let pad = (height as usize).saturating_sub(lines.len()) / 2;
    let mut padded: Vec<ratatui::text::Line<'static>> =
        (0..pad).map(|_| ratatui::text::Line::default()).collect();
    padded.append(&mut lines);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_covers_every_tag() {
        for tag in ["button", "sensor", "picture", "layout"] {
            assert!(new_renderer(tag).is_ok(), "no renderer for {}", tag);
        }
    }

    #[test]
    // Unknown tags come back as an explicit rejection, not a placeholder.
    fn test_factory_rejects_unknown_tags() {
        let error = new_renderer("slider").unwrap_err();
        assert!(matches!(error, PanelError::UnsupportedLayout(tag) if tag == "slider"));
    }
}
