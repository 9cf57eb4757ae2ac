//! Picture slot. The host pushes no pixel data to this client, so the slot
//! renders a tinted panel with a caption naming the image.

use crate::panel::color;
use crate::panel::descriptor::{ImageDef, ValueDef};
use crate::panel::items::{ItemRenderer, vertically_centered};
use crate::panel::theme::StyleSheet;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

#[derive(Debug, Default)]
pub struct PictureItem {
    state: Option<PictureState>,
}

#[derive(Debug)]
struct PictureState {
    caption: Option<String>,
    col: String,
    ctype: String,
}

impl PictureItem {
    pub fn new() -> Self {
        Self::default()
    }
}

fn caption_for(image: &ImageDef) -> String {
    if let Some(uri) = &image.uri {
        // The file stem reads better than a whole URL in one grid cell.
        let name = uri.rsplit('/').next().unwrap_or(uri);
        let name = name.split('.').next().unwrap_or(name);
        if !name.is_empty() {
            return format!("▦ {}", name);
        }
    }
    match (image.width, image.height) {
        (Some(w), Some(h)) => format!("▦ {}x{}", w, h),
        _ => "▦".to_string(),
    }
}

impl ItemRenderer for PictureItem {
    fn set_value(&mut self, value: &ValueDef, _styles: &StyleSheet) {
        self.state = Some(PictureState {
            caption: value.image.as_ref().map(caption_for),
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

        if let Some(caption) = &state.caption {
            let lines = vertically_centered(
                vec![Line::styled(caption.clone(), Style::default().fg(fg))],
                area.height,
            );
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_prefers_uri_stem() {
        let image = ImageDef {
            uri: Some("http://host/images/garden.png".to_string()),
            width: Some(120),
            height: Some(80),
        };
        assert_eq!(caption_for(&image), "▦ garden");
    }

    #[test]
    fn test_caption_falls_back_to_dimensions() {
        let image = ImageDef {
            uri: None,
            width: Some(120),
            height: Some(80),
        };
        assert_eq!(caption_for(&image), "▦ 120x80");

        let bare = ImageDef::default();
        assert_eq!(caption_for(&bare), "▦");
    }
}
