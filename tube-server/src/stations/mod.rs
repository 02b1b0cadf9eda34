//! Station directory: station name → accessibility descriptor.
//!
//! Loaded once at startup from a JSON document (a local file or an HTTP
//! URL) and shared read-only by every page session.

mod client;
mod directory;
mod error;
mod loader;

pub use client::{StationClient, StationClientConfig, StationSource};
pub use directory::{StationDirectory, UNKNOWN_ACCESSIBILITY};
pub use error::DataLoadError;
pub use loader::{DirectoryState, StationDirectoryCell};
