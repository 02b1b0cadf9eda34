//! Station name → accessibility lookup.

use indexmap::IndexMap;

use super::error::DataLoadError;

/// Accessibility text for stations missing from the directory.
pub const UNKNOWN_ACCESSIBILITY: &str = "N/A";

/// Station directory: station name → accessibility descriptor.
///
/// Keeps the order of the source document, which is the order stations
/// appear in the dropdowns. Immutable once built; share it with `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDirectory {
    stations: IndexMap<String, String>,
}

impl StationDirectory {
    /// Parse a directory from a JSON object of `"name": "descriptor"` pairs.
    pub fn from_json(body: &str) -> Result<Self, DataLoadError> {
        let stations: IndexMap<String, String> =
            serde_json::from_str(body).map_err(|e| DataLoadError::Json {
                message: e.to_string(),
            })?;

        Self::from_entries(stations)
    }

    /// Build a directory from `(name, descriptor)` pairs.
    ///
    /// Station names must be non-blank: the empty value is reserved for
    /// the "no selection" entry of the dropdowns.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, DataLoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut stations = IndexMap::new();
        for (name, descriptor) in entries {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(DataLoadError::Invalid {
                    message: "station name must not be empty".to_string(),
                });
            }
            stations.insert(name, descriptor.into());
        }

        Ok(Self { stations })
    }

    /// Accessibility descriptor for a station, if it is listed.
    pub fn accessibility(&self, name: &str) -> Option<&str> {
        self.stations.get(name).map(String::as_str)
    }

    /// Accessibility descriptor for a station, or [`UNKNOWN_ACCESSIBILITY`].
    pub fn describe(&self, name: &str) -> &str {
        self.accessibility(name).unwrap_or(UNKNOWN_ACCESSIBILITY)
    }

    /// Whether the station is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.stations.contains_key(name)
    }

    /// Station names in directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(String::as_str)
    }


    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory has no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The underlying ordered map (for JSON responses).
    pub fn as_map(&self) -> &IndexMap<String, String> {
        &self.stations
    }
}
