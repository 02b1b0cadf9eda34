//! Directions client error types.

use super::types::DirectionsStatus;

/// Errors from a routing request.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// The service answered with a non-OK status
    #[error("directions request failed: {status}")]
    Status {
        status: DirectionsStatus,
        message: Option<String>,
    },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl RoutingError {
    /// Routing error for a service status code.
    pub fn status(status: DirectionsStatus, message: Option<String>) -> Self {
        RoutingError::Status { status, message }
    }

    /// The status code to show the rider.
    ///
    /// Transport failures have no service status; they read as
    /// `UNKNOWN_ERROR` (or the HTTP status code when there is one).
    pub fn status_code(&self) -> String {
        match self {
            RoutingError::Status { status, .. } => status.as_str().to_string(),
            RoutingError::Api { status, .. } => format!("HTTP {status}"),
            RoutingError::Http(_) | RoutingError::Json { .. } => {
                DirectionsStatus::UnknownError.as_str().to_string()
            }
        }
    }

    /// What went wrong, in words the rider understands.
    pub fn description(&self) -> &'static str {
        match self {
            RoutingError::Status { status, .. } => status.description(),
            RoutingError::Api { status: 429, .. } => {
                DirectionsStatus::OverQueryLimit.description()
            }
            RoutingError::Http(_) => "the mapping service could not be reached",
            RoutingError::Api { .. } | RoutingError::Json { .. } => {
                DirectionsStatus::UnknownError.description()
            }
        }
    }
}
