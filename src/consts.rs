pub mod cli_consts {
    //! Panel Client Configuration Constants
    //!
    //! This module contains all configuration constants for the panel client,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================
    // Queue sizes are chosen to absorb a full command batch (currently capped at
    // 500 entries host-side) arriving while a frame is being drawn.

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker threads
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer size for inbound panel commands awaiting application
    pub const COMMAND_QUEUE_SIZE: usize = 512;

    /// Buffer size for outbound panel events awaiting publication
    pub const OUTBOUND_QUEUE_SIZE: usize = 64;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// Panel refresh and input poll tick (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 100;

    /// How long the splash screen stays up before the panel appears (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 1500;

    /// How long a tapped slot stays highlighted (milliseconds)
    pub const PRESS_FLASH_MS: u64 = 150;

    /// Width of the back strip on non-root pages (terminal columns)
    pub const BACK_STRIP_WIDTH: u16 = 7;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Command stream long-poll configuration
    pub mod command_stream {
        use std::time::Duration;

        /// How long the host may hold an empty long-poll open (seconds)
        pub const LONG_POLL_WAIT_SECS: u64 = 25;

        /// Delay before retrying the stream after a transport error (milliseconds)
        pub const RETRY_DELAY_MS: u64 = 3000;

        /// Helper function to get the retry delay
        pub const fn retry_delay() -> Duration {
            Duration::from_millis(RETRY_DELAY_MS)
        }
    }

    /// HTTP client configuration
    pub mod http {
        /// Connection establishment timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds), sized above the long-poll hold
        pub const REQUEST_TIMEOUT_SECS: u64 = 35;

        /// Default host URL when neither flag nor saved config supplies one
        pub const DEFAULT_HOST_URL: &str = "http://127.0.0.1:8093";
    }
}
