//! Wire types shared with the host bus.
//!
//! Inbound commands arrive as `(name, data)` pairs; outbound events leave as
//! envelopes stamped with the panel's connection identifier.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A registered panel device as returned by device lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceRecord {
    /// Stable identifier attached to every envelope for this panel.
    pub connection_id: String,
    /// Human readable device name, when the host knows one.
    #[serde(default)]
    pub name: Option<String>,
}

/// One inbound command from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelCommand {
    pub name: String,
    #[serde(default)]
    pub data: Value,
}

/// A long-poll result: zero or more commands plus the cursor to resume from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandBatch {
    #[serde(default)]
    pub commands: Vec<PanelCommand>,
    pub cursor: u64,
}

/// Outbound event envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelEvent {
    pub event: String,
    pub connection_id: String,
    pub data: Value,
}

impl PanelEvent {
    pub fn new(event: &str, connection_id: &str, data: Value) -> Self {
        Self {
            event: event.to_string(),
            connection_id: connection_id.to_string(),
            data,
        }
    }

    /// Sent once, right after the device binding succeeds.
    pub fn online(connection_id: &str) -> Self {
        Self::new("online", connection_id, json!({}))
    }

    /// Sent on every page switch.
    pub fn page(connection_id: &str, page: usize) -> Self {
        Self::new("page", connection_id, json!({ "page": page }))
    }

    /// Sent on every item tap.
    pub fn click(connection_id: &str, page: usize, item: usize) -> Self {
        Self::new(
            "click",
            connection_id,
            json!({ "page": page, "item": item, "long": false }),
        )
    }

    /// Sent on overlay show ("1") and hide ("0").
    pub fn more(connection_id: &str, visible: bool) -> Self {
        let flag = if visible { "1" } else { "0" };
        Self::new("more", connection_id, json!({ "visible": flag }))
    }
}

/// Payload of the `set_theme` command.
#[derive(Debug, Clone, Deserialize)]
pub struct SetThemeArgs {
    /// JSON-encoded partial theme.
    pub json_value: String,
}

/// Payload of the `set_pages` command.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPagesArgs {
    /// JSON-encoded page definitions, one string per page.
    pub jsons: Vec<String>,
}

/// Payload of the `set_value` command.
#[derive(Debug, Clone, Deserialize)]
pub struct SetValueArgs {
    pub page: i64,
    pub item: i64,
    /// JSON-encoded item value.
    pub json_value: String,
}

/// Payload of the `show_page` command.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowPageArgs {
    pub page: i64,
}

/// Payload of the `show_more` command.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowMoreArgs {
    /// JSON-encoded `{id, title?}` overlay descriptor.
    pub json_value: String,
}

/// Payload of the `play_rtttl` command.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayRtttlArgs {
    /// RTTTL ringtone text, `name:settings:notes`.
    pub song: String,
}
