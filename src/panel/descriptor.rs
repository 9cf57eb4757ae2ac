//! Declarative panel descriptors as they arrive from the host.
//!
//! Everything is permissive serde: missing fields take the documented
//! defaults, explicit positions use -1 as the "not given" marker, and
//! unknown fields are ignored.

use serde::Deserialize;

fn default_layout() -> String {
    "button".to_string()
}

fn default_grid() -> u16 {
    4
}

fn default_span() -> i64 {
    1
}

fn no_position() -> i64 {
    -1
}

fn default_tracks() -> Vec<u16> {
    vec![1]
}

/// One page: a grid shape plus the ordered item list.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDef {
    #[serde(default = "default_grid")]
    pub rows: u16,
    #[serde(default = "default_grid")]
    pub cols: u16,
    #[serde(default)]
    pub items: Vec<SlotDef>,
}

/// A slot declaration inside a page: the layout tag plus placement.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotDef {
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default = "no_position")]
    pub col: i64,
    #[serde(default = "no_position")]
    pub row: i64,
    #[serde(default = "default_span")]
    pub cols: i64,
    #[serde(default = "default_span")]
    pub rows: i64,
}

/// An item value pushed by `set_value`. One shape serves every variant;
/// each renderer reads the fields it knows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueDef {
    /// Hidden flag. The host sends `{"_h": true}` alone to hide a slot.
    #[serde(rename = "_h", default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub col: String,
    #[serde(default)]
    pub ctype: String,
    #[serde(default)]
    pub icon: Option<IconDef>,
    #[serde(default)]
    pub image: Option<ImageDef>,
    /// Group cells, for the layout variant.
    #[serde(default)]
    pub items: Vec<CellDef>,
    /// Group column tracks, one `fr` weight per entry.
    #[serde(default = "default_tracks")]
    pub cols: Vec<u16>,
    /// Group row tracks, one `fr` weight per entry.
    #[serde(default = "default_tracks")]
    pub rows: Vec<u16>,
}

impl ValueDef {
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }
}

/// One cell inside a layout group.
#[derive(Debug, Clone, Deserialize)]
pub struct CellDef {
    #[serde(rename = "_h", default)]
    pub hidden: Option<bool>,
    #[serde(default)]
    pub ctype: String,
    #[serde(default)]
    pub col: String,
    #[serde(default = "no_position")]
    pub x: i64,
    #[serde(default = "no_position")]
    pub y: i64,
    #[serde(default = "default_span")]
    pub w: i64,
    #[serde(default = "default_span")]
    pub h: i64,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<IconDef>,
}

impl CellDef {
    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }
}

/// An icon reference. The host also ships a pre-rendered bitmap for pixel
/// displays; the terminal resolves the name through its own glyph table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IconDef {
    #[serde(default)]
    pub name: String,
    /// Requested pixel size. Large icons render emphasized here.
    #[serde(default)]
    pub size: u16,
}

/// An image reference for the picture variant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageDef {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// The overlay descriptor carried by `show_more`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoreInfoDef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
}
