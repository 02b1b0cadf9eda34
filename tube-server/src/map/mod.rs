//! Map widget and the mapping capability behind it.

mod capability;
mod error;
mod presenter;

pub use capability::{MapCapability, RenderedRoute, RouteResult, StepView};
pub use error::MapInitError;
pub use presenter::{MapPresenter, MapState};
