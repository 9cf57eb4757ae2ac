use crate::host::error::HostError;
use crate::panel::error::PanelError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_transport_error(&self, error: &HostError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            HostError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            HostError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            HostError::Http { status, .. } if *status == 401 => LogLevel::Error,
            HostError::Http { status, .. } if *status == 403 => LogLevel::Error,
            HostError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_command_error(&self, error: &PanelError) -> LogLevel {
        match error {
            // Malformed payloads abort the current command only
            PanelError::Payload(_) => LogLevel::Error,

            // Inert slots are expected when the host runs newer item types
            PanelError::UnsupportedLayout(_) => LogLevel::Debug,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
