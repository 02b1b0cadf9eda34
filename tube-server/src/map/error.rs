//! Map initialization errors.

/// The mapping capability could not be made available.
///
/// Terminal for the session's map features; the rest of the page keeps
/// working.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapInitError {
    /// No API key was configured
    #[error("Google Maps not loaded: no API key configured")]
    MissingApiKey,

    /// The HTTP client for the mapping service could not be built
    #[error("Google Maps not loaded: {0}")]
    Client(String),

    /// Map operation attempted before a successful initialization
    #[error("map is not ready")]
    NotReady,
}
