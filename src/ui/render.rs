//! Panel screen rendering.
//!
//! Frames the control surface with a title bar, the page grid, the activity
//! strip and a key hint footer.

use crate::error_classifier::LogLevel;
use crate::events::{Event as WorkerEvent, EventType, Worker};
use crate::ui::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Render the panel screen.
pub fn render_panel(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Title block
                Constraint::Min(0),    // Panel body
                Constraint::Length(6), // Activity strip
                Constraint::Length(2), // Footer block
            ]
            .as_ref(),
        )
        .split(f.area());

    // Title section with device and page indicator
    let version = env!("CARGO_PKG_VERSION");
    let title_line = Line::from(Span::styled(
        format!("=== TILEDECK v{} ===", version),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    // Uptime in Days, Hours, Minutes, Seconds
    let uptime = app.start_time.elapsed();
    let uptime_string = format!(
        "UPTIME: {}d {}h {}m {}s",
        uptime.as_secs() / 86400,
        (uptime.as_secs() % 86400) / 3600,
        (uptime.as_secs() % 3600) / 60,
        uptime.as_secs() % 60
    );

    let mut info_spans = vec![
        Span::styled(app.device_label.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(uptime_string, Style::default().fg(Color::DarkGray)),
    ];
    if app.dashboard.page_count() > 0 {
        info_spans.push(Span::raw("   "));
        for index in 0..app.dashboard.page_count() {
            let (glyph, color) = if index == app.dashboard.active_page() {
                ("●", Color::White)
            } else {
                ("○", Color::DarkGray)
            };
            info_spans.push(Span::styled(
                format!("{} ", glyph),
                Style::default().fg(color),
            ));
        }
    }

    let title = Paragraph::new(vec![title_line, Line::from(info_spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    // Panel body
    app.dashboard.render(f, chunks[1]);

    // Activity strip, newest first
    let log_lines: Vec<Line> = app
        .activity
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .map(event_line)
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Waiting for activity...")])
    } else {
        Paragraph::new(log_lines)
    };

    let log_widget = log_paragraph
        .block(
            Block::default()
                .title("ACTIVITY")
                .borders(Borders::NONE)
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(log_widget, chunks[2]);

    // Footer with key hints
    let footer = Paragraph::new("[Q] Quit | [Esc] Close overlay | [B] Back | Click taps an item")
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, chunks[3]);
}

fn event_line(event: &WorkerEvent) -> Line<'static> {
    let main_icon = match (event.event_type, event.log_level) {
        (EventType::Success, _) => "✅",
        (EventType::Error, LogLevel::Warn) => "⚠️",
        (EventType::Error, _) => "❌",
        (EventType::Refresh, _) => "🔄",
        (EventType::Waiting, _) => "⏳",
    };

    let worker_label = match event.worker {
        Worker::CommandStream => "Stream",
        Worker::EventPublisher => "Publish",
        Worker::Controller => "Panel",
    };

    let worker_color = get_worker_color(&event.worker);
    let compact_time = format_compact_timestamp(&event.timestamp);

    // Structured line with colored spans
    Line::from(vec![
        Span::raw(format!("{} ", main_icon)),
        Span::styled(
            format!("{} ", compact_time),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("[{}] ", worker_label),
            Style::default()
                .fg(worker_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(event.msg.clone(), Style::default().fg(worker_color)),
    ])
}

/// Get a ratatui color for a worker based on its type
fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::CommandStream => Color::Cyan,
        Worker::EventPublisher => Color::White,
        Worker::Controller => Color::Green,
    }
}

/// Format timestamp to include date but no year (MM-DD HH:MM:SS)
fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format to "MM-DD HH:MM:SS"
    if let Some(date_time) = timestamp.split_once(' ') {
        let date_part = date_time.0; // "YYYY-MM-DD"
        let time_part = date_time.1; // "HH:MM:SS"

        if let Some(month_day) = date_part.get(5..) {
            // Skip "YYYY-"
            format!("{} {}", month_day, time_part)
        } else {
            timestamp.to_string()
        }
    } else {
        timestamp.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::protocol::PanelCommand;
    use crate::panel::Dashboard;
    use crate::workers::core::OutboundLine;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (_event_tx, event_rx) = mpsc::channel(4);
        let (_command_tx, command_rx) = mpsc::channel::<PanelCommand>(4);
        let (outbound_tx, _outbound_rx) = mpsc::channel(4);
        let dashboard = Dashboard::new(OutboundLine::new(outbound_tx, "conn-ui".to_string()));
        App::new(dashboard, event_rx, command_rx, "Hallway panel".to_string())
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    // The frame carries the version, the device label and the page dots.
    fn test_panel_chrome() {
        let mut app = test_app();
        app.dashboard
            .apply(&PanelCommand {
                name: "set_pages".to_string(),
                data: json!({ "jsons": [
                    json!({ "items": [{"layout": "button"}] }).to_string(),
                    json!({ "items": [{"layout": "sensor"}] }).to_string(),
                ]}),
            })
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render_panel(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("TILEDECK"));
        assert!(text.contains("Hallway panel"));
        assert!(text.contains("UPTIME: 0d"));
        assert!(text.contains("●"));
        assert!(text.contains("○"));
        assert!(text.contains("[Q] Quit"));
    }

    #[test]
    fn test_activity_strip_shows_events() {
        let mut app = test_app();
        app.add_event(crate::events::Event::controller_with_level(
            "Loaded 2 page(s)".to_string(),
            EventType::Success,
            LogLevel::Info,
        ));

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| render_panel(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Loaded 2 page(s)"));
        assert!(text.contains("[Panel]"));
    }

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(
            format_compact_timestamp("2026-03-01 09:15:00"),
            "03-01 09:15:00"
        );
        assert_eq!(format_compact_timestamp("junk"), "junk");
    }
}
