//! One-shot station directory load shared by every session.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use super::client::StationClient;
use super::directory::StationDirectory;
use super::error::DataLoadError;

type LoadResult = Result<Arc<StationDirectory>, Arc<DataLoadError>>;

/// Current state of the station directory load.
#[derive(Debug, Clone)]
pub enum DirectoryState {
    /// The load has not finished yet.
    Loading,
    /// The directory is available.
    Loaded(Arc<StationDirectory>),
    /// The load failed; it is not retried.
    Failed(Arc<DataLoadError>),
}

/// Holds the result of the single station directory load.
///
/// The directory is written once and read-only afterwards.
#[derive(Clone, Default)]
pub struct StationDirectoryCell {
    inner: Arc<OnceCell<LoadResult>>,
}

impl StationDirectoryCell {
    /// Create an empty cell (state `Loading`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell holding an already-loaded directory.
    pub fn loaded(directory: StationDirectory) -> Self {
        Self {
            inner: Arc::new(OnceCell::new_with(Some(Ok(Arc::new(directory))))),
        }
    }

    /// Create a cell holding a failed load.
    pub fn failed(error: DataLoadError) -> Self {
        Self {
            inner: Arc::new(OnceCell::new_with(Some(Err(Arc::new(error))))),
        }
    }

    /// Run the load with `client`, at most once per cell.
    ///
    /// Concurrent and later callers get the state of the first load.
    pub async fn load(&self, client: &StationClient) -> DirectoryState {
        self.inner
            .get_or_init(|| async {
                match client.fetch().await {
                    Ok(directory) => {
                        info!(stations = directory.len(), "loaded station directory");
                        Ok(Arc::new(directory))
                    }
                    Err(e) => {
                        error!(error = %e, source = ?client.source(), "failed to load station data");
                        Err(Arc::new(e))
                    }
                }
            })
            .await;

        self.state()
    }

    /// Current state without waiting.
    pub fn state(&self) -> DirectoryState {
        match self.inner.get() {
            None => DirectoryState::Loading,
            Some(Ok(directory)) => DirectoryState::Loaded(directory.clone()),
            Some(Err(e)) => DirectoryState::Failed(e.clone()),
        }
    }
}
