//! Per-session page state and the select → validate → plan → render flow.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{
    MapFraming, RouteRequest, SelectionControls, StationList, ValidatedRoute, validate,
};
use crate::map::{MapCapability, MapPresenter, MapState, RenderedRoute};
use crate::report::{ErrorCategory, ErrorReporter, Notification};
use crate::stations::{DirectoryState, StationDirectory, UNKNOWN_ACCESSIBILITY};

/// Everything the page shows, owned by one browser session.
#[derive(Debug, Default)]
pub struct PageState {
    controls: SelectionControls,
    start_accessibility: String,
    end_accessibility: String,
    presenter: MapPresenter,
    reporter: ErrorReporter,
    directory: Option<Arc<StationDirectory>>,
    data_load_reported: bool,
    /// Advanced by every plan and reset; responses for older values are stale.
    generation: u64,
}

impl PageState {
    /// A fresh page: empty dropdowns, no accessibility text, map hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dropdowns.
    pub fn controls(&self) -> &SelectionControls {
        &self.controls
    }

    /// The map widget.
    pub fn presenter(&self) -> &MapPresenter {
        &self.presenter
    }

    /// The notification queue.
    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Accessibility text for the start and end stations.
    pub fn accessibility(&self) -> (&str, &str) {
        (&self.start_accessibility, &self.end_accessibility)
    }

    /// Catch up with the shared station directory load.
    ///
    /// Populates the dropdowns the first time the directory is seen, and
    /// reports a failed load once.
    pub fn sync_directory(&mut self, state: &DirectoryState) {
        match state {
            DirectoryState::Loading => {}
            DirectoryState::Loaded(directory) => {
                if self.directory.is_none() {
                    self.controls.populate(directory);
                    self.directory = Some(directory.clone());
                }
            }
            DirectoryState::Failed(e) => {
                if !self.data_load_reported {
                    self.data_load_reported = true;
                    self.reporter.report(e.as_ref(), ErrorCategory::DataLoad);
                }
            }
        }
    }

    /// Show accessibility text for both ends of a validated route.
    fn show_accessibility(&mut self, route: &ValidatedRoute) {
        let lookup = |name: &str| {
            self.directory
                .as_deref()
                .map_or(UNKNOWN_ACCESSIBILITY, |d| d.describe(name))
                .to_string()
        };
        let start = lookup(route.start());
        let end = lookup(route.end());

        self.start_accessibility = format!("Accessibility: {start}");
        self.end_accessibility = format!("Accessibility: {end}");
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Return the page to its initial state.
    ///
    /// Resets the dropdowns, clears the accessibility text and the map, and
    /// makes any in-flight routing response stale. Idempotent.
    pub fn reset(&mut self) {
        self.controls.reset();
        self.start_accessibility.clear();
        self.end_accessibility.clear();
        self.presenter.clear();
        self.next_generation();
    }

    /// Hide the intro overlay.
    pub fn dismiss_overlay(&mut self) {
        self.presenter.dismiss_overlay();
    }

    /// Snapshot for rendering; drains pending notifications.
    fn view(&mut self, loading: bool) -> PageView {
        let options = |list: &StationList| -> Vec<OptionView> {
            list.option_values()
                .iter()
                .enumerate()
                .map(|(i, value)| OptionView {
                    value: value.clone(),
                    selected: list.selected_index() == i + 1,
                })
                .collect()
        };

        PageView {
            loading,
            start_options: options(&self.controls.start),
            end_options: options(&self.controls.end),
            start_accessibility: self.start_accessibility.clone(),
            end_accessibility: self.end_accessibility.clone(),
            map_state: self.presenter.state().name(),
            map_failed: matches!(self.presenter.state(), MapState::Failed(_)),
            map_visible: self.presenter.container_visible(),
            overlay_visible: self.presenter.overlay_visible(),
            route: self.presenter.route().cloned(),
            notifications: self.reporter.take(),
        }
    }
}

/// A dropdown option as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub selected: bool,
}

/// Everything needed to render the page once.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub loading: bool,
    pub start_options: Vec<OptionView>,
    pub end_options: Vec<OptionView>,
    pub start_accessibility: String,
    pub end_accessibility: String,
    pub map_state: &'static str,
    pub map_failed: bool,
    pub map_visible: bool,
    pub overlay_visible: bool,
    pub route: Option<RenderedRoute>,
    pub notifications: Vec<Notification>,
}

/// How a plan request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// The selection failed validation; nothing was requested.
    Rejected,
    /// The map never became ready; accessibility text was still shown.
    MapUnavailable,
    /// The route is now shown.
    Shown,
    /// The routing service failed; the map is unchanged.
    RoutingFailed,
    /// A newer plan or a reset happened while this one was in flight.
    Superseded,
}

/// One browser session's page.
///
/// The page state sits behind a mutex that is never held across a call to
/// the mapping service.
#[derive(Debug)]
pub struct Session {
    page: Mutex<PageState>,
    framing: MapFraming,
}

impl Session {
    /// Create a session whose maps use `framing`.
    pub fn new(framing: MapFraming) -> Self {
        Self {
            page: Mutex::new(PageState::new()),
            framing,
        }
    }

    /// Bring up the map widget; failure is reported once.
    pub async fn initialize_map<M: MapCapability>(&self, maps: &M) {
        if !self.page.lock().await.presenter.begin_initialize() {
            return;
        }

        let outcome = maps.initialize().await;

        let mut page = self.page.lock().await;
        if let Err(e) = &outcome {
            page.reporter.report(e, ErrorCategory::MapInitialization);
        }
        page.presenter.finish_initialize(outcome);
    }

    /// Select `start` and `end`, validate, request a route and render it.
    pub async fn plan_route<M: MapCapability>(
        &self,
        maps: &M,
        start: &str,
        end: &str,
    ) -> PlanOutcome {
        let (generation, request) = {
            let mut page = self.page.lock().await;
            page.controls.select(start, end);
            // Any response still in flight answers an older selection.
            let generation = page.next_generation();
            let selection = page.controls.selection();

            let route = match validate(&selection.start, &selection.end) {
                Ok(route) => route,
                Err(e) => {
                    page.start_accessibility.clear();
                    page.end_accessibility.clear();
                    page.reporter.report(&e, ErrorCategory::Validation);
                    return PlanOutcome::Rejected;
                }
            };

            page.show_accessibility(&route);

            if !page.presenter.is_ready() {
                debug!(map_state = page.presenter.state().name(), "map not ready, skipping route request");
                return PlanOutcome::MapUnavailable;
            }

            (generation, RouteRequest::new(&route, self.framing))
        };

        let result = maps.plan_route(&request).await;

        let mut page = self.page.lock().await;
        if !page.is_current(generation) {
            debug!(
                generation,
                current = page.generation,
                "discarding stale routing response"
            );
            return PlanOutcome::Superseded;
        }

        match result {
            Ok(result) => {
                let rendered = maps.render(&result);
                match page.presenter.render(rendered) {
                    Ok(()) => {
                        info!(origin = %request.origin, destination = %request.destination, "route shown");
                        PlanOutcome::Shown
                    }
                    Err(e) => {
                        page.reporter.report(&e, ErrorCategory::MapInitialization);
                        PlanOutcome::MapUnavailable
                    }
                }
            }
            Err(e) => {
                let detail = format!("{} ({})", capitalize(e.description()), e.status_code());
                debug!(error = %e, "routing failed");
                page.reporter.report_message(detail, ErrorCategory::Routing);
                PlanOutcome::RoutingFailed
            }
        }
    }

    /// Reset the page to its initial state.
    pub async fn reset(&self) {
        self.page.lock().await.reset();
    }

    /// Hide the intro overlay.
    pub async fn dismiss_overlay(&self) {
        self.page.lock().await.dismiss_overlay();
    }

    /// Catch up with the directory load.
    pub async fn sync_directory(&self, directory: &DirectoryState) {
        self.page.lock().await.sync_directory(directory);
    }

    /// Catch up with the directory load and snapshot the page for rendering.
    pub async fn view(&self, directory: &DirectoryState) -> PageView {
        let mut page = self.page.lock().await;
        page.sync_directory(directory);
        page.view(matches!(directory, DirectoryState::Loading))
    }

    /// Run `f` against the page state (for inspection).
    pub async fn with_page<R>(&self, f: impl FnOnce(&PageState) -> R) -> R {
        f(&*self.page.lock().await)
    }
}

/// "no route" → "No route".
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Semaphore;

    use super::*;
    use crate::directions::{DirectionsResponse, DirectionsStatus, MockDirections, Route, RoutingError};
    use crate::domain::TransitMode;
    use crate::map::{MapInitError, RouteResult};
    use crate::stations::DataLoadError;

    /// Records requests; answers from a canned response, optionally after
    /// taking a permit from `gate`.
    struct ScriptedMap {
        init: Result<(), MapInitError>,
        status: &'static str,
        requests: std::sync::Mutex<Vec<RouteRequest>>,
        calls: AtomicUsize,
        gate: Option<Arc<Semaphore>>,
    }

    impl ScriptedMap {
        fn ok() -> Self {
            Self {
                init: Ok(()),
                status: "OK",
                requests: std::sync::Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn failing(status: &'static str) -> Self {
            Self {
                status,
                ..Self::ok()
            }
        }

        fn gated(gate: Arc<Semaphore>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::ok()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MapCapability for ScriptedMap {
        async fn initialize(&self) -> Result<(), MapInitError> {
            self.init.clone()
        }

        async fn plan_route(&self, request: &RouteRequest) -> Result<RouteResult, RoutingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            let routes = vec![Route {
                summary: "Bakerloo".into(),
                legs: vec![],
                warnings: vec![],
                copyrights: String::new(),
                fare: None,
            }];
            RouteResult::from_response(
                request.clone(),
                DirectionsResponse {
                    status: self.status.to_string(),
                    routes,
                    error_message: None,
                },
            )
        }

        fn render(&self, result: &RouteResult) -> RenderedRoute {
            RenderedRoute::from_result(result, None)
        }
    }

    fn directory() -> DirectoryState {
        DirectoryState::Loaded(Arc::new(
            StationDirectory::from_entries([
                ("Baker Street", "Step-free"),
                ("Oxford Circus", "None"),
            ])
            .unwrap(),
        ))
    }

    async fn session_with(maps: &ScriptedMap) -> Session {
        let session = Session::new(MapFraming::london());
        session.initialize_map(maps).await;
        session.view(&directory()).await;
        session
    }

    #[tokio::test]
    async fn plan_shows_route() {
        let maps = ScriptedMap::ok();
        let session = session_with(&maps).await;

        let outcome = session.plan_route(&maps, "Baker Street", "Oxford Circus").await;
        assert_eq!(outcome, PlanOutcome::Shown);

        let request = maps.requests.lock().unwrap()[0].clone();
        assert!(request.origin.contains("Baker Street"));
        assert!(request.destination.contains("Oxford Circus"));
        assert_eq!(
            request.transit_modes,
            vec![TransitMode::Bus, TransitMode::Subway, TransitMode::Rail]
        );

        let view = session.view(&directory()).await;
        assert_eq!(view.map_state, "showing");
        assert!(view.map_visible);
        assert!(!view.overlay_visible);
        assert_eq!(view.start_accessibility, "Accessibility: Step-free");
        assert_eq!(view.end_accessibility, "Accessibility: None");
        assert!(view.start_options[0].selected);
        assert!(view.end_options[1].selected);
        assert!(view.notifications.is_empty());
    }

    #[tokio::test]
    async fn identical_stations_are_rejected_without_request() {
        let maps = ScriptedMap::ok();
        let session = session_with(&maps).await;

        let outcome = session.plan_route(&maps, "Baker Street", "Baker Street").await;
        assert_eq!(outcome, PlanOutcome::Rejected);
        assert_eq!(maps.calls(), 0);

        let view = session.view(&directory()).await;
        assert!(!view.map_visible);
        assert_eq!(view.map_state, "ready");
        assert_eq!(view.notifications.len(), 1);
        assert_eq!(view.notifications[0].category, ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn missing_selection_is_rejected() {
        let maps = ScriptedMap::ok();
        let session = session_with(&maps).await;

        let outcome = session.plan_route(&maps, "", "Oxford Circus").await;
        assert_eq!(outcome, PlanOutcome::Rejected);

        let view = session.view(&directory()).await;
        assert_eq!(
            view.notifications[0].detail,
            "Please select both start and end stations."
        );
    }

    #[tokio::test]
    async fn routing_failure_is_reported_and_map_stays_ready() {
        let maps = ScriptedMap::failing("ZERO_RESULTS");
        let session = session_with(&maps).await;

        let outcome = session.plan_route(&maps, "Baker Street", "Oxford Circus").await;
        assert_eq!(outcome, PlanOutcome::RoutingFailed);

        let view = session.view(&directory()).await;
        assert_eq!(view.map_state, "ready");
        assert!(!view.map_visible);
        assert_eq!(view.notifications.len(), 1);
        assert_eq!(view.notifications[0].category, ErrorCategory::Routing);
        assert!(view.notifications[0].detail.contains("ZERO_RESULTS"));
    }

    #[tokio::test]
    async fn reset_after_showing_restores_initial_page() {
        let maps = ScriptedMap::ok();
        let session = session_with(&maps).await;
        session.plan_route(&maps, "Baker Street", "Oxford Circus").await;

        session.reset().await;

        let view = session.view(&directory()).await;
        assert!(!view.map_visible);
        assert!(view.overlay_visible);
        assert!(view.start_options.iter().all(|o| !o.selected));
        assert!(view.end_options.iter().all(|o| !o.selected));
        assert_eq!(view.start_accessibility, "");
        assert_eq!(view.end_accessibility, "");
        assert_eq!(view.map_state, "ready");
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let maps = ScriptedMap::ok();
        let session = session_with(&maps).await;
        session.plan_route(&maps, "Baker Street", "Oxford Circus").await;

        session.reset().await;
        let once = session
            .with_page(|p| {
                (
                    p.controls().clone(),
                    p.presenter().clone(),
                    p.accessibility().0.to_string(),
                    p.accessibility().1.to_string(),
                )
            })
            .await;

        session.reset().await;
        let twice = session
            .with_page(|p| {
                (
                    p.controls().clone(),
                    p.presenter().clone(),
                    p.accessibility().0.to_string(),
                    p.accessibility().1.to_string(),
                )
            })
            .await;

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn reset_discards_in_flight_response() {
        let gate = Arc::new(Semaphore::new(0));
        let maps = Arc::new(ScriptedMap::gated(gate.clone()));
        let session = Arc::new(session_with(&maps).await);

        let task = {
            let maps = maps.clone();
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .plan_route(maps.as_ref(), "Baker Street", "Oxford Circus")
                    .await
            })
        };

        // Wait until the request is in flight.
        while maps.calls() == 0 {
            tokio::task::yield_now().await;
        }
        session.reset().await;
        gate.add_permits(1);

        assert_eq!(task.await.unwrap(), PlanOutcome::Superseded);

        let view = session.view(&directory()).await;
        assert!(!view.map_visible);
        assert!(view.route.is_none());
    }

    #[tokio::test]
    async fn rejected_plan_discards_in_flight_response() {
        let gate = Arc::new(Semaphore::new(0));
        let maps = Arc::new(ScriptedMap::gated(gate.clone()));
        let session = Arc::new(session_with(&maps).await);

        let task = {
            let maps = maps.clone();
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .plan_route(maps.as_ref(), "Baker Street", "Oxford Circus")
                    .await
            })
        };
        while maps.calls() == 0 {
            tokio::task::yield_now().await;
        }

        let outcome = session
            .plan_route(maps.as_ref(), "Oxford Circus", "Oxford Circus")
            .await;
        assert_eq!(outcome, PlanOutcome::Rejected);
        gate.add_permits(1);

        assert_eq!(task.await.unwrap(), PlanOutcome::Superseded);
        assert_eq!(maps.calls(), 1);

        let view = session.view(&directory()).await;
        assert!(!view.map_visible);
        assert!(view.route.is_none());
        assert_eq!(view.start_accessibility, "");
        assert_eq!(view.end_accessibility, "");
        assert_eq!(view.notifications.len(), 1);
        assert_eq!(view.notifications[0].category, ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn newer_plan_supersedes_older() {
        let gate = Arc::new(Semaphore::new(0));
        let maps = Arc::new(ScriptedMap::gated(gate.clone()));
        let session = Arc::new(session_with(&maps).await);

        let first = {
            let maps = maps.clone();
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .plan_route(maps.as_ref(), "Baker Street", "Oxford Circus")
                    .await
            })
        };
        while maps.calls() == 0 {
            tokio::task::yield_now().await;
        }

        let second = {
            let maps = maps.clone();
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .plan_route(maps.as_ref(), "Oxford Circus", "Baker Street")
                    .await
            })
        };
        while maps.calls() < 2 {
            tokio::task::yield_now().await;
        }

        gate.add_permits(2);

        let mut outcomes = vec![first.await.unwrap(), second.await.unwrap()];
        outcomes.sort_by_key(|o| *o == PlanOutcome::Shown);
        assert_eq!(outcomes, [PlanOutcome::Superseded, PlanOutcome::Shown]);

        let view = session.view(&directory()).await;
        let route = view.route.unwrap();
        assert_eq!(route.origin, "Oxford Circus Station, London");
    }

    #[tokio::test]
    async fn failed_map_still_shows_accessibility() {
        let maps = ScriptedMap {
            init: Err(MapInitError::MissingApiKey),
            ..ScriptedMap::ok()
        };
        let session = session_with(&maps).await;

        let outcome = session.plan_route(&maps, "Baker Street", "Oxford Circus").await;
        assert_eq!(outcome, PlanOutcome::MapUnavailable);
        assert_eq!(maps.calls(), 0);

        let view = session.view(&directory()).await;
        assert!(view.map_failed);
        assert_eq!(view.start_accessibility, "Accessibility: Step-free");
        // Reported once, at initialization.
        assert!(view.notifications.is_empty());

        session.reset().await;
        assert_eq!(session.view(&directory()).await.map_state, "failed");
    }

    #[tokio::test]
    async fn map_initialization_failure_is_reported_once() {
        let maps = ScriptedMap {
            init: Err(MapInitError::MissingApiKey),
            ..ScriptedMap::ok()
        };
        let session = Session::new(MapFraming::london());
        session.initialize_map(&maps).await;
        session.initialize_map(&maps).await;

        let view = session.view(&directory()).await;
        assert_eq!(view.notifications.len(), 1);
        assert_eq!(
            view.notifications[0].category,
            ErrorCategory::MapInitialization
        );
    }

    #[tokio::test]
    async fn data_load_failure_is_reported_once() {
        let failed = DirectoryState::Failed(Arc::new(DataLoadError::Status { status: 404 }));
        let session = Session::new(MapFraming::london());

        let first = session.view(&failed).await;
        assert_eq!(first.notifications.len(), 1);
        assert_eq!(first.notifications[0].category, ErrorCategory::DataLoad);
        assert!(first.start_options.is_empty());

        let second = session.view(&failed).await;
        assert!(second.notifications.is_empty());
    }

    #[tokio::test]
    async fn loading_directory_renders_loading_page() {
        let session = Session::new(MapFraming::london());
        let view = session.view(&DirectoryState::Loading).await;
        assert!(view.loading);
        assert!(view.start_options.is_empty());
    }

    #[tokio::test]
    async fn dropdowns_follow_directory_order() {
        let session = Session::new(MapFraming::london());
        let view = session.view(&directory()).await;
        let values: Vec<_> = view.start_options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["Baker Street", "Oxford Circus"]);
    }

    #[tokio::test]
    async fn mock_backend_end_to_end() {
        let maps = MockDirections::new("data/mock_directions.json").unwrap();
        let session = Session::new(MapFraming::london());
        session.initialize_map(&maps).await;
        session.view(&directory()).await;

        let outcome = session.plan_route(&maps, "Oxford Circus", "Baker Street").await;
        assert_eq!(outcome, PlanOutcome::Shown);

        let view = session.view(&directory()).await;
        let route = view.route.unwrap();
        assert!(!route.steps.is_empty());
        assert!(route.embed_url.is_none());
    }

    #[test]
    fn routing_status_descriptions_read_as_sentences() {
        let err = RoutingError::status(DirectionsStatus::ZeroResults, None);
        assert_eq!(
            capitalize(err.description()),
            "No transit route was found between these stations"
        );
    }
}
