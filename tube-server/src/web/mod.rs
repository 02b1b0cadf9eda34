//! Web layer for the tube route planner.
//!
//! Serves the planner page (form posts and redirects, one session per
//! browser) and a small JSON API over the same station data and routing.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::IndexTemplate;
