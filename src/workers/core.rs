//! Core worker utilities

use crate::events::{Event, EventType};
use crate::host::protocol::PanelEvent;
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_stream_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::command_stream_with_level(
                message, event_type, log_level,
            ))
            .await;
    }

    pub async fn send_publisher_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::event_publisher_with_level(
                message, event_type, log_level,
            ))
            .await;
    }
}

/// The dashboard's non-blocking line to the event publisher.
///
/// Interaction events are fired from the synchronous UI path, so they go out
/// with `try_send`. A full queue drops the event rather than stalling a frame.
#[derive(Debug, Clone)]
pub struct OutboundLine {
    sender: mpsc::Sender<PanelEvent>,
    connection_id: String,
}

impl OutboundLine {
    pub fn new(sender: mpsc::Sender<PanelEvent>, connection_id: String) -> Self {
        Self {
            sender,
            connection_id,
        }
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    fn push(&self, event: PanelEvent) {
        if let Err(error) = self.sender.try_send(event) {
            log::warn!("outbound event dropped: {}", error);
        }
    }

    pub fn send_online(&self) {
        self.push(PanelEvent::online(&self.connection_id));
    }

    pub fn send_page(&self, page: usize) {
        self.push(PanelEvent::page(&self.connection_id, page));
    }

    pub fn send_click(&self, page: usize, item: usize) {
        self.push(PanelEvent::click(&self.connection_id, page, item));
    }

    pub fn send_more(&self, visible: bool) {
        self.push(PanelEvent::more(&self.connection_id, visible));
    }
}
