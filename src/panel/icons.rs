//! Icon name to glyph mapping.
//!
//! The host ships each icon as a Material Design name plus a pre-rendered
//! bitmap for pixel displays. The terminal keeps the name and substitutes a
//! glyph; unmapped names get a neutral dot.

/// Icons requested at or above this pixel size render emphasized.
pub const LARGE_ICON_MIN: u16 = 40;

/// Glyph for names the table does not know.
pub const FALLBACK_GLYPH: &str = "•";

/// Map an icon name to a terminal glyph. Accepts bare names and the
/// `mdi:` prefixed form.
pub fn glyph(name: &str) -> &'static str {
    let name = name.strip_prefix("mdi:").unwrap_or(name);
    match name {
        "home" | "home-outline" => "⌂",
        "lightbulb" | "lightbulb-outline" | "lightbulb-on" | "ceiling-light" | "lamp" => "☼",
        "power" | "power-plug" | "flash" | "lightning-bolt" => "↯",
        "thermometer" | "thermometer-low" | "thermometer-high" => "°",
        "water-percent" | "water" | "humidity" => "%",
        "weather-sunny" | "white-balance-sunny" => "☀",
        "weather-night" => "☾",
        "weather-rainy" | "weather-pouring" | "umbrella" => "☂",
        "weather-snowy" | "snowflake" => "☃",
        "fire" | "radiator" => "♨",
        "fan" => "✣",
        "music" | "music-note" | "speaker" => "♪",
        "television" | "monitor" => "▢",
        "lock" | "lock-outline" => "⊠",
        "lock-open" | "lock-open-variant" => "⊡",
        "battery" | "battery-high" => "▮",
        "battery-low" | "battery-outline" => "▯",
        "arrow-left" => "◀",
        "arrow-right" => "▶",
        "arrow-up" | "chevron-up" => "▲",
        "arrow-down" | "chevron-down" => "▼",
        "play" => "▶",
        "pause" => "‖",
        "stop" => "■",
        "check" | "check-circle" => "✓",
        "close" | "close-circle" => "✗",
        "plus" => "+",
        "minus" => "-",
        "gauge" | "speedometer" => "◔",
        "wifi" => "≋",
        _ => FALLBACK_GLYPH,
    }
}
