//! Google Directions API response types.
//!
//! These mirror the JSON returned by `/maps/api/directions/json`. Only the
//! fields we render are modelled; everything else is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level Directions response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectionsResponse {
    /// Status string, e.g. "OK" or "ZERO_RESULTS"
    pub status: String,

    #[serde(default)]
    pub routes: Vec<Route>,

    /// Present on some failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DirectionsResponse {
    /// Parsed status.
    pub fn status(&self) -> DirectionsStatus {
        DirectionsStatus::parse(&self.status)
    }
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Route {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub legs: Vec<Leg>,

    #[serde(default)]
    pub warnings: Vec<String>,

    #[serde(default)]
    pub copyrights: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fare: Option<Fare>,
}

/// A route leg (one per origin/destination pair; tube routes have one).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Leg {
    #[serde(default)]
    pub start_address: String,

    #[serde(default)]
    pub end_address: String,

    pub distance: Option<TextValue>,

    pub duration: Option<TextValue>,

    pub departure_time: Option<TimeValue>,

    pub arrival_time: Option<TimeValue>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// A distance or duration with display text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextValue {
    pub text: String,
    pub value: i64,
}

/// A transit time with display text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeValue {
    pub text: String,
    #[serde(default)]
    pub time_zone: String,
    pub value: i64,
}

/// Fare for the whole route, when known.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Fare {
    pub currency: String,
    pub text: String,
    pub value: f64,
}

/// One step of a leg: a walk or a ride.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Step {
    /// HTML-formatted instruction text
    #[serde(default)]
    pub html_instructions: String,

    /// "TRANSIT" or "WALKING"
    #[serde(default)]
    pub travel_mode: String,

    pub distance: Option<TextValue>,

    pub duration: Option<TextValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_details: Option<TransitDetails>,
}

/// Details of a transit ride.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransitDetails {
    pub departure_stop: Stop,
    pub arrival_stop: Stop,
    pub line: Line,
    #[serde(default)]
    pub num_stops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headsign: Option<String>,
}

/// A transit stop.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stop {
    pub name: String,
}

/// A transit line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Line {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    /// Hex colour, e.g. "#b26300"
    #[serde(default)]
    pub color: Option<String>,
    pub vehicle: Vehicle,
}

/// Vehicle serving a transit line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Vehicle {
    #[serde(default)]
    pub name: String,
    /// e.g. "SUBWAY", "BUS", "HEAVY_RAIL"
    #[serde(rename = "type", default)]
    pub vehicle_type: String,
}

/// Directions status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionsStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxRouteLengthExceeded,
    InvalidRequest,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    /// A status this client does not know about
    Other(String),
}

impl DirectionsStatus {
    /// Parse a status string from a response.
    pub fn parse(s: &str) -> Self {
        match s {
            "OK" => DirectionsStatus::Ok,
            "NOT_FOUND" => DirectionsStatus::NotFound,
            "ZERO_RESULTS" => DirectionsStatus::ZeroResults,
            "MAX_ROUTE_LENGTH_EXCEEDED" => DirectionsStatus::MaxRouteLengthExceeded,
            "INVALID_REQUEST" => DirectionsStatus::InvalidRequest,
            "OVER_DAILY_LIMIT" => DirectionsStatus::OverDailyLimit,
            "OVER_QUERY_LIMIT" => DirectionsStatus::OverQueryLimit,
            "REQUEST_DENIED" => DirectionsStatus::RequestDenied,
            "UNKNOWN_ERROR" => DirectionsStatus::UnknownError,
            other => DirectionsStatus::Other(other.to_string()),
        }
    }

    /// The status code as sent by the service.
    pub fn as_str(&self) -> &str {
        match self {
            DirectionsStatus::Ok => "OK",
            DirectionsStatus::NotFound => "NOT_FOUND",
            DirectionsStatus::ZeroResults => "ZERO_RESULTS",
            DirectionsStatus::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            DirectionsStatus::InvalidRequest => "INVALID_REQUEST",
            DirectionsStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            DirectionsStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            DirectionsStatus::RequestDenied => "REQUEST_DENIED",
            DirectionsStatus::UnknownError => "UNKNOWN_ERROR",
            DirectionsStatus::Other(s) => s,
        }
    }

    /// What the status means for the rider.
    pub fn description(&self) -> &'static str {
        match self {
            DirectionsStatus::Ok => "route found",
            DirectionsStatus::NotFound => "one of the stations could not be located",
            DirectionsStatus::ZeroResults => "no transit route was found between these stations",
            DirectionsStatus::MaxRouteLengthExceeded => "the route is too long to display",
            DirectionsStatus::InvalidRequest => "the route request was invalid",
            DirectionsStatus::OverDailyLimit | DirectionsStatus::OverQueryLimit => {
                "too many route requests; please try again later"
            }
            DirectionsStatus::RequestDenied => "the mapping service refused the request",
            DirectionsStatus::UnknownError | DirectionsStatus::Other(_) => {
                "the mapping service had a problem; please try again"
            }
        }
    }
}

impl fmt::Display for DirectionsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
