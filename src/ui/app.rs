//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event as WorkerEvent, EventType};
use crate::host::protocol::PanelCommand;
use crate::logging::LogLevel;
use crate::panel::{Applied, Dashboard};
use crate::ui::render::render_panel;
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use std::collections::VecDeque;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The live control panel.
    Panel,
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,

    /// The current screen being displayed in the application.
    pub screen: Screen,

    /// The panel state machine. Commands apply from the first tick, so pages
    /// arriving during the splash are already built when it ends.
    pub dashboard: Dashboard,

    /// Recent worker and controller events for the activity strip.
    pub activity: VecDeque<WorkerEvent>,

    /// Device name shown in the header.
    pub device_label: String,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Receives inbound panel commands from the stream.
    command_receiver: mpsc::Receiver<PanelCommand>,

    classifier: ErrorClassifier,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        dashboard: Dashboard,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        command_receiver: mpsc::Receiver<PanelCommand>,
        device_label: String,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            screen: Screen::Splash,
            dashboard,
            activity: VecDeque::new(),
            device_label,
            event_receiver,
            command_receiver,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Add an event to the activity queue, keeping it bounded.
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.activity.push_back(event);
        while self.activity.len() > cli_consts::MAX_ACTIVITY_LOGS {
            self.activity.pop_front();
        }
    }

    /// Drain worker events into the activity strip.
    fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.add_event(event);
        }
    }

    /// Apply every pending inbound command. A malformed payload aborts its
    /// own command only; the rest of the batch still applies.
    fn apply_pending_commands(&mut self) {
        while let Ok(command) = self.command_receiver.try_recv() {
            match self.dashboard.apply(&command) {
                Ok(applied) => self.report_applied(&applied),
                Err(e) => {
                    let log_level = self.classifier.classify_command_error(&e);
                    self.add_event(WorkerEvent::controller_with_level(
                        format!("Command {} failed: {}", command.name, e),
                        EventType::Error,
                        log_level,
                    ));
                }
            }
        }
    }

    fn report_applied(&mut self, applied: &Applied) {
        let (msg, event_type, log_level) = match applied {
            Applied::Theme => (
                "Theme updated".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            ),
            Applied::Pages(count) => (
                format!("Loaded {} page(s)", count),
                EventType::Success,
                LogLevel::Info,
            ),
            Applied::Value { page, item } => (
                format!("Updated item {} on page {}", item, page),
                EventType::Refresh,
                LogLevel::Debug,
            ),
            Applied::Page(page) => (
                format!("Switched to page {}", page),
                EventType::Refresh,
                LogLevel::Info,
            ),
            Applied::MoreShown => (
                "More info overlay shown".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            ),
            Applied::MoreHidden => (
                "More info overlay hidden".to_string(),
                EventType::Refresh,
                LogLevel::Debug,
            ),
            Applied::Sound(song) => {
                ring_bell();
                (
                    format!("Ringtone: {}", song),
                    EventType::Success,
                    LogLevel::Info,
                )
            }
            Applied::Ignored(what) => (
                format!("Ignored: {}", what),
                EventType::Waiting,
                LogLevel::Debug,
            ),
        };
        self.add_event(WorkerEvent::controller_with_level(msg, event_type, log_level));
    }
}

/// The closest a terminal gets to an RTTTL speaker.
fn ring_bell() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(cli_consts::SPLASH_DURATION_MS);

    // UI event loop
    loop {
        // Queue all incoming events and commands for processing
        app.drain_events();
        app.apply_pending_commands();

        // Expire the tap flash
        app.dashboard.update();

        terminal.draw(|f| render(f, &mut app))?;

        // Handle splash-to-panel transition
        if let Screen::Splash = app.screen {
            if splash_start.elapsed() >= splash_duration {
                app.screen = Screen::Panel;
                continue;
            }
        }

        // Poll for input events
        if event::poll(Duration::from_millis(cli_consts::TICK_INTERVAL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    // Skip events that are not KeyEventKind::Press
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }

                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Esc => {
                            // Esc closes the overlay first and quits otherwise
                            if app.dashboard.more_info().is_some() {
                                app.dashboard.dismiss_more();
                            } else {
                                return Ok(());
                            }
                        }
                        KeyCode::Backspace | KeyCode::Char('b') => {
                            app.dashboard.back_to_root();
                        }
                        _ => {
                            // Any other key press skips the splash screen
                            if app.screen == Screen::Splash {
                                app.screen = Screen::Panel;
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if app.screen == Screen::Panel
                        && mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    {
                        app.dashboard.handle_tap(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Splash => render_splash(f),
        Screen::Panel => render_panel(f, app),
    }
}
