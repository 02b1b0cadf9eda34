//! Mock Directions backend for running without an API key.
//!
//! Loads a canned Directions response from a JSON file and serves it for
//! every request, substituting the requested stations into the first leg.

use std::path::Path;

use crate::domain::RouteRequest;
use crate::map::{MapCapability, MapInitError, RenderedRoute, RouteResult};

use super::error::RoutingError;
use super::types::DirectionsResponse;

/// Mock Directions backend that serves a response from a JSON file.
#[derive(Debug, Clone)]
pub struct MockDirections {
    response: DirectionsResponse,
}

impl MockDirections {
    /// Load the canned response from `path`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MapInitError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path)
            .map_err(|e| MapInitError::Client(format!("failed to read {path:?}: {e}")))?;

        let response: DirectionsResponse = serde_json::from_str(&json)
            .map_err(|e| MapInitError::Client(format!("failed to parse {path:?}: {e}")))?;

        Ok(Self::from_response(response))
    }

    /// Serve `response` for every request.
    pub fn from_response(response: DirectionsResponse) -> Self {
        Self { response }
    }
}

impl MapCapability for MockDirections {
    async fn initialize(&self) -> Result<(), MapInitError> {
        Ok(())
    }

    async fn plan_route(&self, request: &RouteRequest) -> Result<RouteResult, RoutingError> {
        let mut response = self.response.clone();
        if let Some(leg) = response.routes.first_mut().and_then(|r| r.legs.first_mut()) {
            leg.start_address = request.origin.clone();
            leg.end_address = request.destination.clone();
        }
        RouteResult::from_response(request.clone(), response)
    }

    fn render(&self, result: &RouteResult) -> RenderedRoute {
        RenderedRoute::from_result(result, None)
    }
}
