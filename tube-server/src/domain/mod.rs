//! Domain types for choosing and validating a route.
//!
//! Nothing here does IO: the dropdown model, the validator and the
//! routing request builder are all plain values.

mod error;
mod request;
mod selection;
mod validate;

pub use error::ValidationError;
pub use request::{MapFraming, RouteRequest, RoutingPreference, TransitMode, station_label};
pub use selection::{DEFAULT_OPTION_LABEL, RouteSelection, SelectionControls, StationList};
pub use validate::{ValidatedRoute, validate};
