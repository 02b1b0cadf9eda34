//! Browser sessions: each one owns a page (dropdowns, accessibility text,
//! map widget, notifications).

mod page;
mod store;

pub use page::{OptionView, PageState, PageView, PlanOutcome, Session};
pub use store::{SessionConfig, SessionStore};
