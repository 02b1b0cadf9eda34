//! Start/end selection validation.

use super::error::ValidationError;

/// A (start, end) pair that passed [`validate`].
///
/// The only way to obtain one is through validation, so holding a
/// `ValidatedRoute` means both stations are present and distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoute {
    start: String,
    end: String,
}

impl ValidatedRoute {
    /// Start station name.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End station name.
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// Check a candidate (start, end) pair before any route request is made.
///
/// An empty string means "nothing selected". Pure; never touches the
/// network or the map.
pub fn validate(start: &str, end: &str) -> Result<ValidatedRoute, ValidationError> {
    if start.is_empty() || end.is_empty() {
        return Err(ValidationError::MissingSelection);
    }

    if start == end {
        return Err(ValidationError::IdenticalStations);
    }

    Ok(ValidatedRoute {
        start: start.to_string(),
        end: end.to_string(),
    })
}
