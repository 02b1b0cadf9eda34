use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tube_server::config::AppConfig;
use tube_server::directions::{DirectionsClient, DirectionsConfig, MapBackend, MockDirections};
use tube_server::session::SessionConfig;
use tube_server::stations::{StationClient, StationClientConfig, StationDirectoryCell};
use tube_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "tube_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Station directory loads in the background; pages show "loading" until it lands
    let station_config =
        StationClientConfig::new(config.stations.clone()).with_timeout(config.http_timeout_secs);
    let station_client = StationClient::new(station_config)?;
    let stations = StationDirectoryCell::new();
    let loader = stations.clone();
    tokio::spawn(async move {
        loader.load(&station_client).await;
    });

    let maps = build_maps(&config);

    let session_config = SessionConfig {
        idle_timeout: config.session_idle,
        ..SessionConfig::default()
    };
    let state = AppState::new(stations, maps, &session_config);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("Tube Route Planner listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health        - Health check");
    info!("  GET  /api/stations  - Stations and accessibility");
    info!("  POST /api/route     - Plan a route");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Pick the mapping backend; a backend that cannot be built leaves every
/// session's map failed rather than stopping the server.
fn build_maps(config: &AppConfig) -> MapBackend {
    if let Some(path) = &config.mock_directions {
        return match MockDirections::new(path) {
            Ok(mock) => {
                info!(path = %path.display(), "using mock directions");
                MapBackend::Mock(mock)
            }
            Err(e) => {
                error!(error = %e, "failed to load mock directions");
                MapBackend::Unavailable(e)
            }
        };
    }

    if config.api_key.is_empty() {
        warn!("GOOGLE_MAPS_API_KEY not set; the map will be unavailable");
    }

    let directions_config =
        DirectionsConfig::new(&config.api_key).with_timeout(config.http_timeout_secs);
    match DirectionsClient::new(directions_config) {
        Ok(client) => MapBackend::Google(client),
        Err(e) => {
            error!(error = %e, "failed to create directions client");
            MapBackend::Unavailable(e)
        }
    }
}
