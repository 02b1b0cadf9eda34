//! User-facing error notifications.
//!
//! Every failure in the page flow ends up here: it is logged and queued
//! as a notification that the next page render shows once.

use std::error::Error;
use std::fmt;

use serde::Serialize;
use tracing::warn;

/// Which stage of the page flow failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    DataLoad,
    Validation,
    MapInitialization,
    Routing,
}

impl ErrorCategory {
    /// Headline shown to the user for this category.
    pub fn headline(&self) -> &'static str {
        match self {
            ErrorCategory::DataLoad => "Station data could not be loaded",
            ErrorCategory::Validation => "Check your station selection",
            ErrorCategory::MapInitialization => {
                "The map is unavailable; accessibility information still works"
            }
            ErrorCategory::Routing => "No route could be shown",
        }
    }

    /// Category name as used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::DataLoad => "data-load",
            ErrorCategory::Validation => "validation",
            ErrorCategory::MapInitialization => "map-initialization",
            ErrorCategory::Routing => "routing",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message waiting to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub category: ErrorCategory,
    pub headline: &'static str,
    pub detail: String,
}

/// Queues notifications for one page session.
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    pending: Vec<Notification>,
}

impl ErrorReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `error` and queue it for display.
    pub fn report(&mut self, error: &dyn Error, category: ErrorCategory) {
        warn!(category = category.as_str(), error = %error, "reporting error to user");

        self.pending.push(Notification {
            category,
            headline: category.headline(),
            detail: error.to_string(),
        });
    }

    /// Queue a notification with a custom detail line.
    pub fn report_message(&mut self, detail: impl Into<String>, category: ErrorCategory) {
        let detail = detail.into();
        warn!(category = category.as_str(), detail = %detail, "reporting error to user");

        self.pending.push(Notification {
            category,
            headline: category.headline(),
            detail,
        });
    }

    /// Notifications not yet shown.
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Remove and return the pending notifications.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
