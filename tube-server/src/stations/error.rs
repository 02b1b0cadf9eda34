//! Station data loading errors.

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// HTTP request failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The station source returned a non-success status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// The station file could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// Payload was not a JSON object of strings
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Payload parsed but contains an unusable entry
    #[error("invalid station data: {message}")]
    Invalid { message: String },
}
