//! Color resolution for `{col, ctype}` descriptors.
//!
//! A descriptor with `ctype == "text"` tints its text only. Any other ctype
//! tints the slot background instead, and the text flips to the contrast
//! color so it stays readable on the tint.

use crate::panel::theme::StyleSheet;
use ratatui::style::Color;

/// Resolved foreground for a descriptor.
pub fn text_color(col: &str, ctype: &str, styles: &StyleSheet) -> Color {
    if col.is_empty() {
        return styles.text;
    }
    if ctype == "text" {
        if col == "on" {
            return styles.accent;
        }
        if col.len() == 7 {
            if let Some(color) = literal_color(col) {
                return color;
            }
        }
        return styles.text;
    }
    // Background-tinting mode: any color present means the slot is tinted,
    // whatever the value, so the text uses the contrast color.
    styles.text_on
}

/// Resolved background for a descriptor. `neutral` is the call site's
/// untinted default, which varies by item variant.
pub fn background_color(col: &str, ctype: &str, styles: &StyleSheet, neutral: Color) -> Color {
    if col.is_empty() || ctype == "text" {
        return neutral;
    }
    if col == "on" {
        return styles.accent;
    }
    if col.len() == 7 {
        if let Some(color) = literal_color(col) {
            return color;
        }
    }
    neutral
}

fn literal_color(value: &str) -> Option<Color> {
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::theme::Theme;

    fn styles() -> StyleSheet {
        StyleSheet::from_theme(&Theme::default())
    }

    #[test]
    // No color: plain text over the call site's neutral background.
    fn test_empty_descriptor() {
        let styles = styles();
        assert_eq!(text_color("", "", &styles), styles.text);
        assert_eq!(text_color("", "text", &styles), styles.text);
        assert_eq!(
            background_color("", "", &styles, styles.button_bg),
            styles.button_bg
        );
        assert_eq!(
            background_color("", "", &styles, styles.panel_bg),
            styles.panel_bg
        );
    }

    #[test]
    // "on" selects the accent: as text for text descriptors, as background
    // for tinting ones.
    fn test_on_selects_accent() {
        let styles = styles();
        assert_eq!(text_color("on", "text", &styles), styles.accent);
        assert_eq!(
            background_color("on", "", &styles, styles.button_bg),
            styles.accent
        );
    }

    #[test]
    // Seven character literals apply verbatim in both modes.
    fn test_literal_applies_verbatim() {
        let styles = styles();
        assert_eq!(
            text_color("#112233", "text", &styles),
            Color::Rgb(0x11, 0x22, 0x33)
        );
        assert_eq!(
            background_color("#112233", "button", &styles, styles.button_bg),
            Color::Rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    // Text descriptors never touch the background, whatever the color.
    fn test_text_descriptor_keeps_neutral_background() {
        let styles = styles();
        assert_eq!(
            background_color("on", "text", &styles, styles.panel_bg),
            styles.panel_bg
        );
        assert_eq!(
            background_color("#112233", "text", &styles, styles.panel_bg),
            styles.panel_bg
        );
    }

    #[test]
    // Any tint, even a garbage one, flips the text to the contrast color.
    fn test_tinted_text_uses_contrast() {
        let styles = styles();
        assert_eq!(text_color("on", "button", &styles), styles.text_on);
        assert_eq!(text_color("#112233", "", &styles), styles.text_on);
        assert_eq!(text_color("weird", "", &styles), styles.text_on);
    }

    #[test]
    // Garbage degrades: short junk, long junk, and unparseable literals.
    fn test_garbage_degrades_to_defaults() {
        let styles = styles();
        assert_eq!(text_color("x", "text", &styles), styles.text);
        assert_eq!(text_color("#GGGGGG", "text", &styles), styles.text);
        assert_eq!(
            background_color("#GGGGGG", "", &styles, styles.button_bg),
            styles.button_bg
        );
        assert_eq!(
            background_color("nonsense", "", &styles, styles.button_bg),
            styles.button_bg
        );
    }

    #[test]
    // The rule is pure: identical inputs resolve identically.
    fn test_resolution_is_pure() {
        let styles = styles();
        for (col, ctype) in [("on", "text"), ("#A1B2C3", ""), ("", "x"), ("junk", "text")] {
            assert_eq!(
                text_color(col, ctype, &styles),
                text_color(col, ctype, &styles)
            );
            assert_eq!(
                background_color(col, ctype, &styles, styles.button_bg),
                background_color(col, ctype, &styles, styles.button_bg)
            );
        }
    }
}
