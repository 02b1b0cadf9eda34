//! Domain error types.
//!
//! These errors represent a station selection that cannot be planned.
//! They are distinct from API/IO errors.

/// Why a (start, end) selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Start or end station not chosen
    #[error("Please select both start and end stations.")]
    MissingSelection,

    /// Start and end are the same station
    #[error("Please select different stations for the start and end points.")]
    IdenticalStations,
}

impl ValidationError {
    /// Short machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingSelection => "missing selection",
            ValidationError::IdenticalStations => "identical stations",
        }
    }
}
