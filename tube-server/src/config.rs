//! Application configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::stations::StationSource;

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

/// Default station data file.
const DEFAULT_STATIONS_FILE: &str = "static/stations.json";

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable could not be parsed
    #[error("invalid {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Google Maps API key (empty when unset)
    pub api_key: String,
    /// Where station data is loaded from
    pub stations: StationSource,
    /// Static assets directory
    pub static_dir: PathBuf,
    /// Canned Directions response; replaces the live service when set
    pub mock_directions: Option<PathBuf>,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
    /// Sessions idle for longer than this are dropped
    pub session_idle: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_key: String::new(),
            stations: StationSource::File(PathBuf::from(DEFAULT_STATIONS_FILE)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            mock_directions: None,
            http_timeout_secs: 30,
            session_idle: Duration::from_secs(30 * 60),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup` (variable name → value).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match var("TUBE_BIND_ADDR") {
            Some(v) => v.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "TUBE_BIND_ADDR",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.bind_addr,
        };

        let stations = match (var("TUBE_STATIONS_URL"), var("TUBE_STATIONS_FILE")) {
            (Some(url), _) => StationSource::Url(url),
            (None, Some(file)) => StationSource::File(PathBuf::from(file)),
            (None, None) => defaults.stations,
        };

        Ok(Self {
            bind_addr,
            api_key: var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            stations,
            static_dir: var("TUBE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            mock_directions: var("TUBE_MOCK_DIRECTIONS").map(PathBuf::from),
            http_timeout_secs: parse_secs(&var, "TUBE_HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.http_timeout_secs),
            session_idle: parse_secs(&var, "TUBE_SESSION_IDLE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle),
        })
    }
}

fn parse_secs(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    var(name)
        .map(|v| {
            v.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
