//! The mapping backend chosen at startup.

use crate::domain::RouteRequest;
use crate::map::{MapCapability, MapInitError, RenderedRoute, RouteResult};

use super::client::DirectionsClient;
use super::error::RoutingError;
use super::mock::MockDirections;
use super::types::DirectionsStatus;

/// Mapping backend shared by all sessions.
#[derive(Debug, Clone)]
pub enum MapBackend {
    /// Live Google Directions.
    Google(DirectionsClient),
    /// Canned responses from disk.
    Mock(MockDirections),
    /// No backend could be built; every session's map fails to initialize.
    Unavailable(MapInitError),
}

impl MapCapability for MapBackend {
    async fn initialize(&self) -> Result<(), MapInitError> {
        match self {
            MapBackend::Google(client) => client.initialize().await,
            MapBackend::Mock(mock) => mock.initialize().await,
            MapBackend::Unavailable(e) => Err(e.clone()),
        }
    }

    async fn plan_route(&self, request: &RouteRequest) -> Result<RouteResult, RoutingError> {
        match self {
            MapBackend::Google(client) => client.plan_route(request).await,
            MapBackend::Mock(mock) => mock.plan_route(request).await,
            // Sessions never plan without a ready map.
            MapBackend::Unavailable(e) => Err(RoutingError::status(
                DirectionsStatus::UnknownError,
                Some(e.to_string()),
            )),
        }
    }

    fn render(&self, result: &RouteResult) -> RenderedRoute {
        match self {
            MapBackend::Google(client) => client.render(result),
            MapBackend::Mock(mock) => mock.render(result),
            MapBackend::Unavailable(_) => RenderedRoute::from_result(result, None),
        }
    }
}
