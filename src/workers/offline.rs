//! Offline workers
//!
//! Preview mode runs the full panel without a host. A feeder synthesizes the
//! same command sequence a live stream would deliver, read from a local
//! layout file, and a sink drains outbound events that would otherwise be
//! published.

use super::core::EventSender;
use crate::events::EventType;
use crate::host::protocol::{PanelCommand, PanelEvent};
use crate::logging::LogLevel;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::Path;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A local layout file: the commands a host would send on connect.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewFile {
    #[serde(default)]
    pub theme: Option<Value>,
    #[serde(default)]
    pub pages: Vec<Value>,
    #[serde(default)]
    pub values: Vec<PreviewValue>,
}

/// One initial item value in a layout file.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewValue {
    pub page: i64,
    pub item: i64,
    pub value: Value,
}

impl PreviewFile {
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Expand into the command sequence a live host would send on connect:
    /// theme first, then pages, then initial values.
    pub fn into_commands(self) -> Vec<PanelCommand> {
        let mut commands = Vec::new();
        if let Some(theme) = self.theme {
            commands.push(PanelCommand {
                name: "set_theme".to_string(),
                data: json!({ "json_value": theme.to_string() }),
            });
        }
        let jsons: Vec<String> = self.pages.iter().map(|page| page.to_string()).collect();
        commands.push(PanelCommand {
            name: "set_pages".to_string(),
            data: json!({ "jsons": jsons }),
        });
        for entry in self.values {
            commands.push(PanelCommand {
                name: "set_value".to_string(),
                data: json!({
                    "page": entry.page,
                    "item": entry.item,
                    "json_value": entry.value.to_string(),
                }),
            });
        }
        commands
    }
}

/// Spawn the preview feeder: pushes the file's commands once, then exits.
pub fn start_preview_feeder(
    preview: PreviewFile,
    sender: mpsc::Sender<PanelCommand>,
    event_sender: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let page_count = preview.pages.len();
        for command in preview.into_commands() {
            if sender.send(command).await.is_err() {
                return;
            }
        }
        event_sender
            .send_stream_event(
                format!("Loaded {} page(s) from layout file", page_count),
                EventType::Success,
                LogLevel::Info,
            )
            .await;
    })
}

/// Spawn the outbound sink: reports events that would have been published.
pub fn start_outbound_sink(
    mut outbound: mpsc::Receiver<PanelEvent>,
    event_sender: EventSender,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,

                maybe_event = outbound.recv() => match maybe_event {
                    Some(event) => {
                        event_sender
                            .send_publisher_event(
                                format!("Would send {} event {}", event.event, event.data),
                                EventType::Refresh,
                                LogLevel::Info,
                            )
                            .await;
                    }
                    None => break,
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    // A full layout file expands to theme, pages, then values, in that order.
    fn test_preview_file_expands_to_commands() {
        let preview: PreviewFile = serde_json::from_str(
            r##"{
                "theme": { "panel_bg_color": "#202020" },
                "pages": [
                    { "rows": 1, "cols": 2, "items": [{"layout": "button"}, {"layout": "sensor"}] },
                    { "rows": 1, "cols": 1, "items": [{"layout": "picture"}] }
                ],
                "values": [
                    { "page": 0, "item": 1, "value": { "value": "42", "unit": "%" } }
                ]
            }"##,
        )
        .unwrap();

        let commands = preview.into_commands();
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["set_theme", "set_pages", "set_value"]);
        assert_eq!(commands[1].data["jsons"].as_array().unwrap().len(), 2);
        assert_eq!(commands[2].data["page"], 0);
    }

    #[test]
    // Theme and values are optional; pages alone still make a valid preview.
    fn test_preview_file_pages_only() {
        let preview: PreviewFile =
            serde_json::from_str(r#"{ "pages": [{ "items": [] }] }"#).unwrap();
        let commands = preview.into_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "set_pages");
    }

    #[tokio::test]
    async fn test_outbound_sink_reports_events() {
        let (outbound_tx, outbound_rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let handle = start_outbound_sink(
            outbound_rx,
            EventSender::new(event_tx),
            CancellationToken::new(),
        );

        outbound_tx
            .send(PanelEvent::click("preview", 0, 1))
            .await
            .unwrap();
        let event = event_rx.recv().await.unwrap();
        assert!(event.msg.contains("Would send click event"));

        drop(outbound_tx);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
