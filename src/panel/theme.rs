//! Theme resolution and the derived terminal style sheet.
//!
//! A partial theme merges over the documented defaults; every parameter
//! therefore always has a value. The style sheet is re-derived on every
//! theme change, while renderer instances stay untouched.

use ratatui::style::{Color, Modifier};
use ratatui::widgets::BorderType;
use serde::Serialize;
use serde_json::Value;

/// Default theme parameters, matching what the host assumes when it sends
/// nothing.
pub mod defaults {
    pub const TEXT_COLOR: &str = "#FAFAFA";
    pub const TEXT_ON_COLOR: &str = "#212121";
    pub const PANEL_BG_COLOR: &str = "#424242";
    pub const BTN_BG_COLOR: &str = "#616161";
    pub const BTN_PRESSED_COLOR: &str = "#757575";
    pub const BTN_ON_COLOR: &str = "#FFEB3B";
    pub const PADDING: u16 = 8;
    pub const RADIUS: u16 = 7;
    pub const FONT_FAMILY: &str = "Ubuntu Condensed, Arial Narrow, sans-serif";
    pub const NORMAL_FONT: u16 = 14;
    pub const SMALL_FONT: u16 = 12;
    pub const LARGE_FONT: u16 = 28;
}

/// A fully resolved theme. Numeric parameters accept numbers or numeric
/// strings on the wire since the host stringifies everything it relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub text_color: String,
    pub text_on_color: String,
    pub panel_bg_color: String,
    pub btn_bg_color: String,
    pub btn_pressed_color: String,
    pub btn_on_color: String,
    pub padding: u16,
    pub radius: u16,
    pub font_family: String,
    pub normal_font: u16,
    pub small_font: u16,
    pub large_font: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_color: defaults::TEXT_COLOR.to_string(),
            text_on_color: defaults::TEXT_ON_COLOR.to_string(),
            panel_bg_color: defaults::PANEL_BG_COLOR.to_string(),
            btn_bg_color: defaults::BTN_BG_COLOR.to_string(),
            btn_pressed_color: defaults::BTN_PRESSED_COLOR.to_string(),
            btn_on_color: defaults::BTN_ON_COLOR.to_string(),
            padding: defaults::PADDING,
            radius: defaults::RADIUS,
            font_family: defaults::FONT_FAMILY.to_string(),
            normal_font: defaults::NORMAL_FONT,
            small_font: defaults::SMALL_FONT,
            large_font: defaults::LARGE_FONT,
        }
    }
}

impl Theme {
    /// Merge a partial theme object over the defaults. Unknown keys pass
    /// through unused; malformed values keep the default.
    pub fn resolve(partial: &Value) -> Theme {
        let mut theme = Theme::default();
        let Some(map) = partial.as_object() else {
            return theme;
        };
        merge_string(&mut theme.text_color, map.get("text_color"));
        merge_string(&mut theme.text_on_color, map.get("text_on_color"));
        merge_string(&mut theme.panel_bg_color, map.get("panel_bg_color"));
        merge_string(&mut theme.btn_bg_color, map.get("btn_bg_color"));
        merge_string(&mut theme.btn_pressed_color, map.get("btn_pressed_color"));
        merge_string(&mut theme.btn_on_color, map.get("btn_on_color"));
        merge_number(&mut theme.padding, map.get("padding"));
        merge_number(&mut theme.radius, map.get("radius"));
        merge_string(&mut theme.font_family, map.get("font_family"));
        merge_number(&mut theme.normal_font, map.get("normal_font"));
        merge_number(&mut theme.small_font, map.get("small_font"));
        merge_number(&mut theme.large_font, map.get("large_font"));
        theme
    }
}

fn merge_string(slot: &mut String, value: Option<&Value>) {
    if let Some(text) = value.and_then(Value::as_str) {
        *slot = text.to_string();
    }
}

fn merge_number(slot: &mut u16, value: Option<&Value>) {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    if let Some(v) = parsed {
        *slot = v;
    }
}

/// Terminal styles derived from a resolved theme.
///
/// Colors accept hex or named forms; anything unparseable falls back to the
/// default palette. The non-color parameters map onto what a terminal can
/// express: padding becomes a one cell gutter, radius picks the border
/// glyphs, and the font sizes pick text modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub text: Color,
    pub text_on: Color,
    pub accent: Color,
    pub panel_bg: Color,
    pub button_bg: Color,
    pub pressed_bg: Color,
    pub gap: u16,
    pub border_type: BorderType,
    pub value_modifier: Modifier,
    pub unit_modifier: Modifier,
}

impl StyleSheet {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            text: style_color(&theme.text_color, Color::Rgb(0xFA, 0xFA, 0xFA)),
            text_on: style_color(&theme.text_on_color, Color::Rgb(0x21, 0x21, 0x21)),
            accent: style_color(&theme.btn_on_color, Color::Rgb(0xFF, 0xEB, 0x3B)),
            panel_bg: style_color(&theme.panel_bg_color, Color::Rgb(0x42, 0x42, 0x42)),
            button_bg: style_color(&theme.btn_bg_color, Color::Rgb(0x61, 0x61, 0x61)),
            pressed_bg: style_color(&theme.btn_pressed_color, Color::Rgb(0x75, 0x75, 0x75)),
            gap: if theme.padding > 0 { 1 } else { 0 },
            border_type: if theme.radius > 0 {
                BorderType::Rounded
            } else {
                BorderType::Plain
            },
            value_modifier: if theme.large_font > theme.normal_font {
                Modifier::BOLD
            } else {
                Modifier::empty()
            },
            unit_modifier: if theme.small_font < theme.normal_font {
                Modifier::DIM
            } else {
                Modifier::empty()
            },
        }
    }
}

fn style_color(value: &str, fallback: Color) -> Color {
    value.parse().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    // A partial theme overrides only the keys it names.
    fn test_resolve_merges_over_defaults() {
        let partial = json!({ "text_color": "#112233", "radius": 0 });
        let theme = Theme::resolve(&partial);

        assert_eq!(theme.text_color, "#112233");
        assert_eq!(theme.radius, 0);
        assert_eq!(theme.panel_bg_color, defaults::PANEL_BG_COLOR);
        assert_eq!(theme.padding, defaults::PADDING);
    }

    #[test]
    // The host stringifies numbers; both forms resolve.
    fn test_resolve_accepts_numeric_strings() {
        let partial = json!({ "padding": "0", "large_font": "30" });
        let theme = Theme::resolve(&partial);

        assert_eq!(theme.padding, 0);
        assert_eq!(theme.large_font, 30);
    }

    #[test]
    // Unknown keys and unparseable values leave the defaults alone.
    fn test_resolve_ignores_junk() {
        let partial = json!({ "glow": true, "padding": "lots", "text_color": 7 });
        let theme = Theme::resolve(&partial);

        assert_eq!(theme, Theme::default());
    }

    #[test]
    // Non-object payloads resolve to the full default theme.
    fn test_resolve_non_object() {
        assert_eq!(Theme::resolve(&json!(null)), Theme::default());
        assert_eq!(Theme::resolve(&json!([1, 2])), Theme::default());
    }

    #[test]
    fn test_stylesheet_derivation() {
        let styles = StyleSheet::from_theme(&Theme::default());
        assert_eq!(styles.text, Color::Rgb(0xFA, 0xFA, 0xFA));
        assert_eq!(styles.gap, 1);
        assert_eq!(styles.border_type, BorderType::Rounded);
        assert_eq!(styles.value_modifier, Modifier::BOLD);
        assert_eq!(styles.unit_modifier, Modifier::DIM);

        let flat = Theme::resolve(&json!({
            "padding": 0, "radius": 0, "large_font": 14, "small_font": 14
        }));
        let styles = StyleSheet::from_theme(&flat);
        assert_eq!(styles.gap, 0);
        assert_eq!(styles.border_type, BorderType::Plain);
        assert_eq!(styles.value_modifier, Modifier::empty());
        assert_eq!(styles.unit_modifier, Modifier::empty());
    }

    #[test]
    // Unparseable colors fall back to the default palette.
    fn test_stylesheet_color_fallback() {
        let theme = Theme::resolve(&json!({ "btn_bg_color": "#nope" }));
        let styles = StyleSheet::from_theme(&theme);
        assert_eq!(styles.button_bg, Color::Rgb(0x61, 0x61, 0x61));
    }
}
