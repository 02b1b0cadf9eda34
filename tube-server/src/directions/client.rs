//! Google Directions HTTP client.
//!
//! Plans transit routes with the Directions web service and renders them
//! with the Maps Embed API.

use std::sync::Arc;

use reqwest::Url;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::RouteRequest;
use crate::map::{MapCapability, MapInitError, RenderedRoute, RouteResult};

use super::error::RoutingError;
use super::types::{DirectionsResponse, DirectionsStatus};

/// Default base URL for the Directions web service.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions";

/// Default base URL for embedded directions maps.
const DEFAULT_EMBED_URL: &str = "https://www.google.com/maps/embed/v1/directions";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the Directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key; an empty key fails map initialization
    pub api_key: String,
    /// Base URL for the Directions API
    pub base_url: String,
    /// Base URL for embedded maps
    pub embed_url: String,
    /// Region bias for geocoding station labels (ccTLD)
    pub region: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            embed_url: DEFAULT_EMBED_URL.to_string(),
            region: "uk".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google Directions API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    embed_url: String,
    region: String,
    semaphore: Arc<Semaphore>,
}

impl DirectionsClient {
    /// Create a new Directions client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, MapInitError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MapInitError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_url: config.base_url,
            embed_url: config.embed_url,
            region: config.region,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Query parameters for a routing request.
    fn query(&self, request: &RouteRequest) -> Vec<(&'static str, String)> {
        vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("mode", "transit".to_string()),
            ("transit_mode", request.transit_mode_param()),
            (
                "transit_routing_preference",
                request.preference.as_param().to_string(),
            ),
            ("region", self.region.clone()),
            ("key", self.api_key.clone()),
        ]
    }

    /// Fetch the raw Directions response for a request.
    pub async fn get_directions(
        &self,
        request: &RouteRequest,
    ) -> Result<DirectionsResponse, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| {
                RoutingError::status(
                    DirectionsStatus::UnknownError,
                    Some("request limiter closed".to_string()),
                )
            })?;

        let url = format!("{}/json", self.base_url);

        debug!(origin = %request.origin, destination = %request.destination, "requesting directions");

        let response = self
            .http
            .get(&url)
            .query(&self.query(request))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RoutingError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// URL of an embedded map showing the route for `request`.
    pub fn embed_url(&self, request: &RouteRequest) -> Option<String> {
        let framing = request.framing;
        let center = format!("{},{}", framing.lat, framing.lng);
        let zoom = framing.zoom.to_string();

        Url::parse_with_params(
            &self.embed_url,
            &[
                ("key", self.api_key.as_str()),
                ("origin", request.origin.as_str()),
                ("destination", request.destination.as_str()),
                ("mode", "transit"),
                ("center", center.as_str()),
                ("zoom", zoom.as_str()),
            ],
        )
        .ok()
        .map(String::from)
    }
}

impl MapCapability for DirectionsClient {
    async fn initialize(&self) -> Result<(), MapInitError> {
        if self.api_key.trim().is_empty() {
            return Err(MapInitError::MissingApiKey);
        }
        Ok(())
    }

    async fn plan_route(&self, request: &RouteRequest) -> Result<RouteResult, RoutingError> {
        let response = self.get_directions(request).await?;
        RouteResult::from_response(request.clone(), response)
    }

    fn render(&self, result: &RouteResult) -> RenderedRoute {
        RenderedRoute::from_result(result, self.embed_url(&result.request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MapFraming, validate};

    fn request() -> RouteRequest {
        RouteRequest::new(
            &validate("Baker Street", "Oxford Circus").unwrap(),
            MapFraming::london(),
        )
    }

    #[test]
    fn config_builder() {
        let config = DirectionsConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = DirectionsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.embed_url, DEFAULT_EMBED_URL);
        assert_eq!(config.region, "uk");
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn query_carries_transit_options() {
        let client = DirectionsClient::new(DirectionsConfig::new("test-key")).unwrap();
        let query = client.query(&request());

        let get = |name: &str| {
            query
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("origin"), Some("Baker Street Station, London"));
        assert_eq!(get("destination"), Some("Oxford Circus Station, London"));
        assert_eq!(get("mode"), Some("transit"));
        assert_eq!(get("transit_mode"), Some("bus|subway|train"));
        assert_eq!(get("transit_routing_preference"), Some("less_walking"));
        assert_eq!(get("key"), Some("test-key"));
    }

    #[test]
    fn embed_url_is_encoded() {
        let client = DirectionsClient::new(DirectionsConfig::new("test-key")).unwrap();
        let url = client.embed_url(&request()).unwrap();

        assert!(url.starts_with(DEFAULT_EMBED_URL));
        assert!(url.contains("origin=Baker+Street+Station%2C+London"));
        assert!(url.contains("mode=transit"));
        assert!(url.contains("zoom=12"));
    }

    #[tokio::test]
    async fn initialize_requires_api_key() {
        let client = DirectionsClient::new(DirectionsConfig::new("  ")).unwrap();
        assert_eq!(client.initialize().await, Err(MapInitError::MissingApiKey));

        let client = DirectionsClient::new(DirectionsConfig::new("test-key")).unwrap();
        assert_eq!(client.initialize().await, Ok(()));
    }

    #[tokio::test]
    async fn unreachable_service_is_routing_error() {
        let client = DirectionsClient::new(
            DirectionsConfig::new("test-key")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(2),
        )
        .unwrap();

        let err = client.plan_route(&request()).await.unwrap_err();
        assert!(matches!(err, RoutingError::Http(_)));
    }

    /// Serve `app` on an ephemeral loopback port and point a client at it.
    async fn client_for(app: axum::Router) -> DirectionsClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        DirectionsClient::new(
            DirectionsConfig::new("test-key")
                .with_base_url(format!("http://{addr}"))
                .with_timeout(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn server_error_is_reported_with_http_status() {
        let app = axum::Router::new().route(
            "/json",
            axum::routing::get(|| async {
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "backend exploded")
            }),
        );
        let client = client_for(app).await;

        let err = client.plan_route(&request()).await.unwrap_err();
        assert!(matches!(
            &err,
            RoutingError::Api { status: 500, message } if message == "backend exploded"
        ));
        assert_eq!(err.status_code(), "HTTP 500");
    }

    #[tokio::test]
    async fn service_status_is_reported() {
        let app = axum::Router::new().route(
            "/json",
            axum::routing::get(|| async {
                r#"{"status": "ZERO_RESULTS", "routes": []}"#
            }),
        );
        let client = client_for(app).await;

        let err = client.plan_route(&request()).await.unwrap_err();
        assert_eq!(err.status_code(), "ZERO_RESULTS");
    }

    // Live requests need a real API key and are not run here.
}
