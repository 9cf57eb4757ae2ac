//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::panel::{Applied, Dashboard};
use std::error::Error;

/// Runs the application in headless mode
///
/// The panel state machine still runs, applying commands and emitting
/// interaction-independent events, so a host sees the panel come online and
/// bind pages even without a terminal attached.
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Command application without rendering
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    // Print session start message
    print_session_starting("headless", &session.device_label);

    let mut handles = session.handles;
    let mut dashboard = Dashboard::new(handles.outbound.clone());
    let classifier = ErrorClassifier::new();

    // Trigger shutdown on Ctrl+C
    let cancellation = handles.cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancellation.cancel();
        }
    });

    // Event loop: apply commands and log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = handles.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            Some(command) = handles.command_receiver.recv() => {
                let event = match dashboard.apply(&command) {
                    Ok(applied) => applied_event(&applied),
                    Err(e) => {
                        let log_level = classifier.classify_command_error(&e);
                        Event::controller_with_level(
                            format!("Command {} failed: {}", command.name, e),
                            EventType::Error,
                            log_level,
                        )
                    }
                };
                if event.should_display() {
                    println!("{}", event);
                }
            }
            _ = handles.cancellation.cancelled() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    for handle in handles.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}

fn applied_event(applied: &Applied) -> Event {
    let (msg, event_type) = match applied {
        Applied::Theme => ("Theme updated".to_string(), EventType::Refresh),
        Applied::Pages(count) => (format!("Loaded {} page(s)", count), EventType::Success),
        Applied::Value { page, item } => (
            format!("Updated item {} on page {}", item, page),
            EventType::Refresh,
        ),
        Applied::Page(page) => (format!("Switched to page {}", page), EventType::Refresh),
        Applied::MoreShown => ("More info overlay shown".to_string(), EventType::Refresh),
        Applied::MoreHidden => ("More info overlay hidden".to_string(), EventType::Refresh),
        Applied::Sound(song) => (format!("Ringtone: {}", song), EventType::Success),
        Applied::Ignored(what) => (format!("Ignored: {}", what), EventType::Waiting),
    };
    Event::controller_with_level(msg, event_type, crate::logging::LogLevel::Info)
}
