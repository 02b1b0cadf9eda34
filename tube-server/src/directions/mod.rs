//! Google Directions client.
//!
//! Key characteristics of the Directions web service:
//! - Origins and destinations are free text, geocoded by the service, so
//!   station names are sent as full labels ("Angel Station, London")
//! - Failures arrive as a `status` field in an HTTP 200 body, not as HTTP
//!   error codes
//! - Transit routing accepts a set of allowed vehicle types and a routing
//!   preference

mod backend;
mod client;
mod error;
mod mock;
mod types;

pub use backend::MapBackend;
pub use client::{DirectionsClient, DirectionsConfig};
pub use error::RoutingError;
pub use mock::MockDirections;
pub use types::{
    DirectionsResponse, DirectionsStatus, Fare, Leg, Line, Route, Step, Stop, TextValue,
    TimeValue, TransitDetails, Vehicle,
};
