//! Command stream worker
//!
//! Long-polls the host bus for panel commands and forwards them to the
//! dashboard's command queue. Transport errors are classified, reported and
//! retried; the stream itself never gives up while the session is alive.

use super::core::EventSender;
use crate::consts::cli_consts::command_stream;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::host::HostBus;
use crate::host::protocol::PanelCommand;
use crate::logging::LogLevel;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawn the command stream worker.
pub fn start_command_stream(
    host: Box<dyn HostBus>,
    connection_id: String,
    sender: mpsc::Sender<PanelCommand>,
    event_sender: EventSender,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        run_command_stream(host, connection_id, sender, event_sender, cancellation).await;
    })
}

async fn run_command_stream(
    host: Box<dyn HostBus>,
    connection_id: String,
    sender: mpsc::Sender<PanelCommand>,
    event_sender: EventSender,
    cancellation: CancellationToken,
) {
    let classifier = ErrorClassifier::new();
    // The cursor resumes after the last command the panel has seen. Zero asks
    // the host to start from its current tail.
    let mut cursor: u64 = 0;

    loop {
        tokio::select! {
            _ = cancellation.cancelled() => break,

            result = host.poll_commands(&connection_id, cursor) => match result {
                Ok(batch) => {
                    cursor = batch.cursor;
                    if !batch.commands.is_empty() {
                        event_sender
                            .send_stream_event(
                                format!("Received {} command(s)", batch.commands.len()),
                                EventType::Refresh,
                                LogLevel::Debug,
                            )
                            .await;
                    }
                    for command in batch.commands {
                        // A closed queue means the UI task is gone.
                        if sender.send(command).await.is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    let log_level = classifier.classify_transport_error(&e);
                    event_sender
                        .send_stream_event(
                            format!(
                                "Command poll failed: {}, retrying in {}s",
                                e,
                                command_stream::retry_delay().as_secs()
                            ),
                            EventType::Error,
                            log_level,
                        )
                        .await;
                    tokio::select! {
                        _ = cancellation.cancelled() => break,
                        _ = tokio::time::sleep(command_stream::retry_delay()) => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHostBus;
    use crate::host::error::HostError;
    use crate::host::protocol::CommandBatch;
    use serde_json::json;
    use std::time::Duration;

    fn command(name: &str) -> PanelCommand {
        PanelCommand {
            name: name.to_string(),
            data: json!({}),
        }
    }

    #[tokio::test]
    // Commands are forwarded in order and the cursor advances to the batch's.
    async fn test_commands_forwarded_with_cursor() {
        let mut host = MockHostBus::new();
        let cancellation = CancellationToken::new();
        let stream_cancellation = cancellation.clone();
        let mut calls = 0u32;
        host.expect_poll_commands().returning(move |_, cursor| {
            calls += 1;
            if calls == 1 {
                assert_eq!(cursor, 0);
                Ok(CommandBatch {
                    commands: vec![command("set_theme"), command("set_pages")],
                    cursor: 5,
                })
            } else {
                assert_eq!(cursor, 5);
                stream_cancellation.cancel();
                Ok(CommandBatch {
                    commands: vec![],
                    cursor: 5,
                })
            }
        });

        let (command_tx, mut command_rx) = mpsc::channel(8);
        let (event_tx, _event_rx) = mpsc::channel(8);
        let handle = start_command_stream(
            Box::new(host),
            "conn-1".to_string(),
            command_tx,
            EventSender::new(event_tx),
            cancellation,
        );

        let first = command_rx.recv().await.unwrap();
        let second = command_rx.recv().await.unwrap();
        assert_eq!(first.name, "set_theme");
        assert_eq!(second.name, "set_pages");

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    // A transport failure is reported through the event channel, not fatal.
    async fn test_poll_error_is_reported() {
        let mut host = MockHostBus::new();
        let cancellation = CancellationToken::new();
        let stream_cancellation = cancellation.clone();
        host.expect_poll_commands().returning(move |_, _| {
            stream_cancellation.cancel();
            Err(HostError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let (command_tx, _command_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let handle = start_command_stream(
            Box::new(host),
            "conn-1".to_string(),
            command_tx,
            EventSender::new(event_tx),
            cancellation,
        );

        let event = event_rx.recv().await.unwrap();
        assert!(event.msg.contains("Command poll failed"));
        assert_eq!(event.event_type, EventType::Error);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
