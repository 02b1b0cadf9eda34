//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::RouteRequest;
use crate::map::RenderedRoute;
use crate::report::ErrorCategory;

/// Plan-route form posted by the page.
#[derive(Debug, Default, Deserialize)]
pub struct PlanRouteForm {
    /// Start station name (empty for no selection)
    #[serde(default)]
    pub start: String,

    /// End station name (empty for no selection)
    #[serde(default)]
    pub end: String,
}

/// Request to plan a route through the JSON API.
#[derive(Debug, Deserialize)]
pub struct RouteApiRequest {
    /// Start station name
    #[serde(default)]
    pub start: String,

    /// End station name
    #[serde(default)]
    pub end: String,
}

/// Accessibility information for one station.
#[derive(Debug, Serialize)]
pub struct StationAccessibility {
    /// Station name
    pub name: String,

    /// Accessibility descriptor ("N/A" when unknown)
    pub accessibility: String,
}

/// Response for a planned route.
#[derive(Debug, Serialize)]
pub struct RouteApiResponse {
    /// Start station
    pub start: StationAccessibility,

    /// End station
    pub end: StationAccessibility,

    /// The request sent to the routing service
    pub request: RouteRequest,

    /// The rendered route
    pub route: RenderedRoute,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Which stage failed, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
}
