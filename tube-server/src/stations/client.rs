//! Station data client.

use std::path::PathBuf;

use tracing::debug;

use super::directory::StationDirectory;
use super::error::DataLoadError;

/// Default station data file, also served to browsers under `/static`.
const DEFAULT_STATIONS_FILE: &str = "static/stations.json";

/// Where the station directory comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSource {
    /// Fetched with an HTTP GET.
    Url(String),
    /// Read from the local filesystem.
    File(PathBuf),
}

/// Configuration for the station client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Station data source
    pub source: StationSource,
    /// Request timeout in seconds (HTTP sources only)
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a new config reading from the given source.
    pub fn new(source: StationSource) -> Self {
        Self {
            source,
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new(StationSource::File(PathBuf::from(DEFAULT_STATIONS_FILE)))
    }
}

/// Client that loads the station directory from its source.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    source: StationSource,
}

impl StationClient {
    /// Create a new station client.
    pub fn new(config: StationClientConfig) -> Result<Self, DataLoadError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            source: config.source,
        })
    }

    /// The configured source.
    pub fn source(&self) -> &StationSource {
        &self.source
    }

    /// Fetch and parse the station directory.
    pub async fn fetch(&self) -> Result<StationDirectory, DataLoadError> {
        let body = match &self.source {
            StationSource::Url(url) => self.fetch_url(url).await?,
            StationSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| DataLoadError::Io {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?
            }
        };

        StationDirectory::from_json(&body)
    }

    async fn fetch_url(&self, url: &str) -> Result<String, DataLoadError> {
        debug!(url, "fetching station data");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DataLoadError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
