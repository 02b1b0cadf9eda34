//! The mapping capability: what the map presenter needs from a backend.

use std::future::Future;

use chrono::Local;
use serde::Serialize;

use crate::directions::{DirectionsResponse, DirectionsStatus, Route, RoutingError, Step};
use crate::domain::RouteRequest;

use super::error::MapInitError;

/// A mapping backend: can be brought up, can plan routes, can render them.
///
/// This abstraction allows the page flow to be tested without a real
/// mapping service.
pub trait MapCapability: Send + Sync {
    /// Make the capability available. Called once per page session.
    fn initialize(&self) -> impl Future<Output = Result<(), MapInitError>> + Send;

    /// Submit a routing request.
    fn plan_route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RouteResult, RoutingError>> + Send;

    /// Turn a route into what the map widget shows.
    fn render(&self, result: &RouteResult) -> RenderedRoute;
}

/// A successful routing response and the request it answers.
#[derive(Debug, Clone)]
pub struct RouteResult {
    pub request: RouteRequest,
    pub route: Route,
}

impl RouteResult {
    /// Accept a Directions response for `request`.
    ///
    /// Any status other than `OK` is a routing error, and so is an `OK`
    /// response without routes.
    pub fn from_response(
        request: RouteRequest,
        response: DirectionsResponse,
    ) -> Result<Self, RoutingError> {
        let status = response.status();
        if status != DirectionsStatus::Ok {
            return Err(RoutingError::status(status, response.error_message));
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RoutingError::status(DirectionsStatus::ZeroResults, None))?;

        Ok(Self { request, route })
    }
}

/// A route as displayed in the map container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRoute {
    pub origin: String,
    pub destination: String,
    /// Embedded map URL; `None` when the backend has no map tiles.
    pub embed_url: Option<String>,
    pub summary: String,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration: Option<String>,
    pub distance: Option<String>,
    pub fare: Option<String>,
    pub steps: Vec<StepView>,
    pub warnings: Vec<String>,
    pub copyrights: String,
    /// Local time the route was rendered, "HH:MM"
    pub rendered_at: String,
}

impl RenderedRoute {
    /// Build the view of `result`, with an optional embedded map.
    pub fn from_result(result: &RouteResult, embed_url: Option<String>) -> Self {
        let route = &result.route;
        let first_leg = route.legs.first();
        let last_leg = route.legs.last();

        Self {
            origin: result.request.origin.clone(),
            destination: result.request.destination.clone(),
            embed_url,
            summary: route.summary.clone(),
            departure: first_leg
                .and_then(|l| l.departure_time.as_ref())
                .map(|t| t.text.clone()),
            arrival: last_leg
                .and_then(|l| l.arrival_time.as_ref())
                .map(|t| t.text.clone()),
            duration: first_leg
                .filter(|_| route.legs.len() == 1)
                .and_then(|l| l.duration.as_ref())
                .map(|d| d.text.clone()),
            distance: first_leg
                .filter(|_| route.legs.len() == 1)
                .and_then(|l| l.distance.as_ref())
                .map(|d| d.text.clone()),
            fare: route.fare.as_ref().map(|f| f.text.clone()),
            steps: route
                .legs
                .iter()
                .flat_map(|l| l.steps.iter())
                .map(StepView::from_step)
                .collect(),
            warnings: route.warnings.clone(),
            copyrights: route.copyrights.clone(),
            rendered_at: Local::now().format("%H:%M").to_string(),
        }
    }
}

/// One walk or ride in a rendered route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    /// "Walk", "Subway", "Bus", ...
    pub mode: String,
    pub instruction: String,
    pub duration: String,
    pub line: Option<String>,
    pub line_color: Option<String>,
    pub from_stop: Option<String>,
    pub to_stop: Option<String>,
    pub num_stops: Option<u32>,
}

impl StepView {
    /// Create from a Directions step.
    pub fn from_step(step: &Step) -> Self {
        let details = step.transit_details.as_ref();

        let mode = match details {
            Some(d) if !d.line.vehicle.name.is_empty() => d.line.vehicle.name.clone(),
            Some(_) => "Transit".to_string(),
            None if step.travel_mode == "WALKING" => "Walk".to_string(),
            None => title_case(&step.travel_mode),
        };

        Self {
            mode,
            instruction: plain_text(&step.html_instructions),
            duration: step
                .duration
                .as_ref()
                .map(|d| d.text.clone())
                .unwrap_or_default(),
            line: details.and_then(|d| d.line.short_name.clone().or_else(|| d.line.name.clone())),
            line_color: details.and_then(|d| d.line.color.clone()),
            from_stop: details.map(|d| d.departure_stop.name.clone()),
            to_stop: details.map(|d| d.arrival_stop.name.clone()),
            num_stops: details.map(|d| d.num_stops),
        }
    }

    /// Whether this step is a ride (as opposed to a walk).
    pub fn is_transit(&self) -> bool {
        self.line.is_some() || self.from_stop.is_some()
    }
}

/// "DRIVING" → "Driving".
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Strip tags and decode the entities Directions puts in instructions.
fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                // Block elements separate sentences.
                if !out.ends_with(' ') && !out.is_empty() {
                    out.push(' ');
                }
            }
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
