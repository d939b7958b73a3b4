pub mod cli_consts {
    //! Client Configuration Constants
    //!
    //! This module contains all configuration constants for the school-admin
    //! client, organized by functional area for clarity.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size for the event channel shared by loaders and the login submitter.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer size for the channel carrying request completions back to the UI loop.
    pub const COMPLETION_QUEUE_SIZE: usize = 32;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Backend endpoints consumed by the client.
    pub mod endpoints {
        /// Aggregate metrics shown on the dashboard page.
        pub const DASHBOARD: &str = "/api/school-admin/dashboard";
        /// Ordered list of student records.
        pub const STUDENTS: &str = "/api/students";
        /// Credential submission.
        pub const LOGIN: &str = "/login";
        /// Session teardown.
        pub const LOGOUT: &str = "/logout";
    }

    /// HTTP client timeouts
    pub mod http {
        use std::time::Duration;

        pub const CONNECT_TIMEOUT_SECS: u64 = 10;
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // ROUTES & MESSAGES
    // =============================================================================

    /// Client-side routes
    pub mod routes {
        /// Where a successful login lands.
        pub const DASHBOARD: &str = "/dashboard";
        pub const LOGIN: &str = "/login";
    }

    /// User-facing fallback messages for the login form
    pub mod messages {
        /// Shown when the server rejects the login without a message.
        pub const LOGIN_FAILED: &str = "Login failed";
        /// Shown when the request itself fails or the reply cannot be read.
        pub const NETWORK_ERROR: &str = "Network error. Please try again.";
    }

    // =============================================================================
    // DISPLAY CONFIGURATION
    // =============================================================================

    pub mod display {
        /// Prefix for currency amounts on the dashboard.
        pub const CURRENCY_SYMBOL: &str = "₹";
        /// Placeholder for an absent phone number in the students table.
        pub const MISSING_PHONE: &str = "-";
        /// Substitute for control characters found in server-provided text.
        pub const REPLACEMENT_CHAR: char = '\u{FFFD}';
    }

    /// Roles offered by the login form. The server decides which are valid.
    pub const ROLES: &[&str] = &["school_admin", "super_admin", "teacher", "student"];
}
