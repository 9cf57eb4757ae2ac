//! Event publisher worker
//!
//! Drains the outbound queue and posts each panel event to the host bus.
//! Events are fire and forget: a failed post is reported and dropped, never
//! retried, so a flaky link cannot back interactions up behind stale ones.

use super::core::EventSender;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::host::HostBus;
use crate::host::protocol::PanelEvent;
use crate::logging::LogLevel;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawn the event publisher worker.
pub fn start_event_publisher(
    host: Box<dyn HostBus>,
    outbound: mpsc::Receiver<PanelEvent>,
    event_sender: EventSender,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_event_publisher(host, outbound, event_sender, cancellation).await;
    })
}

async fn run_event_publisher(
    host: Box<dyn HostBus>,
    mut outbound: mpsc::Receiver<PanelEvent>,
    event_sender: EventSender,
    cancellation: CancellationToken,
) {
    let classifier = ErrorClassifier::new();

    loop {
        tokio::select! {
            _ = cancellation.cancelled() => break,

            maybe_event = outbound.recv() => match maybe_event {
                Some(event) => {
                    let name = event.event.clone();
                    match host.publish_event(&event).await {
                        Ok(()) => {
                            event_sender
                                .send_publisher_event(
                                    format!("Sent {} event", name),
                                    EventType::Success,
                                    LogLevel::Debug,
                                )
                                .await;
                        }
                        Err(e) => {
                            let log_level = classifier.classify_transport_error(&e);
                            event_sender
                                .send_publisher_event(
                                    format!("Failed to send {} event: {}", name, e),
                                    EventType::Error,
                                    log_level,
                                )
                                .await;
                        }
                    }
                }
                None => break,
            }
        }
    }
}
