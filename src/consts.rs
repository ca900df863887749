//! Global constants for the application.

pub const APP_NAME: &str = "Todo"; // Suffix of every document title.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api"; // Base URL of the Todo API.
pub const DEFAULT_LOG_FILE: &str = "./todo-settings.log"; // Log output of the terminal front end.
pub const REQUEST_TIMEOUT_SECS: u64 = 30; // Timeout for a single API request.

/// Minimum length of usernames and passwords
pub const MIN_CREDENTIAL_LENGTH: usize = 6;

/// Symbols a password may contain, and must contain at least one of.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*)(+=._-`";
