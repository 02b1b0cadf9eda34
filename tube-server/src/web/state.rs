//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::MapBackend;
use crate::domain::MapFraming;
use crate::session::{SessionConfig, SessionStore};
use crate::stations::StationDirectoryCell;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station directory (loaded once at startup)
    pub stations: StationDirectoryCell,

    /// Mapping backend shared by every session
    pub maps: Arc<MapBackend>,

    /// Live page sessions
    pub sessions: SessionStore,

    /// Map framing for requests outside a session
    pub framing: MapFraming,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        stations: StationDirectoryCell,
        maps: MapBackend,
        session_config: &SessionConfig,
    ) -> Self {
        Self {
            stations,
            maps: Arc::new(maps),
            sessions: SessionStore::new(session_config),
            framing: session_config.framing,
        }
    }
}
