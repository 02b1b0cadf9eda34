//! Map widget state: the route overlay, the map container and the intro
//! overlay shown before any route.

use super::capability::{MapCapability, RenderedRoute};
use super::error::MapInitError;

/// Lifecycle of the map widget.
///
/// ```text
/// Uninitialized -> Initializing -> Ready <-> Showing
///                               \-> Failed (terminal)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MapState {
    Uninitialized,
    Initializing,
    Ready,
    Showing(Box<RenderedRoute>),
    Failed(MapInitError),
}

impl MapState {
    /// Short name for logging and templates.
    pub fn name(&self) -> &'static str {
        match self {
            MapState::Uninitialized => "uninitialized",
            MapState::Initializing => "initializing",
            MapState::Ready => "ready",
            MapState::Showing(_) => "showing",
            MapState::Failed(_) => "failed",
        }
    }
}

/// Owns the map widget and its visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPresenter {
    state: MapState,
    container_visible: bool,
    overlay_visible: bool,
}

impl Default for MapPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl MapPresenter {
    /// A presenter that has not been initialized: map hidden, overlay shown.
    pub fn new() -> Self {
        Self {
            state: MapState::Uninitialized,
            container_visible: false,
            overlay_visible: true,
        }
    }

    /// Current state.
    pub fn state(&self) -> &MapState {
        &self.state
    }

    /// Whether routes can be requested and rendered.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, MapState::Ready | MapState::Showing(_))
    }

    /// The route being shown, if any.
    pub fn route(&self) -> Option<&RenderedRoute> {
        match &self.state {
            MapState::Showing(route) => Some(&**route),
            _ => None,
        }
    }

    /// Whether the map container is visible.
    pub fn container_visible(&self) -> bool {
        self.container_visible
    }

    /// Whether the introductory overlay is visible.
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Enter `Initializing`. Returns `false` if initialization already
    /// started (or finished), in which case nothing changes.
    pub fn begin_initialize(&mut self) -> bool {
        if self.state != MapState::Uninitialized {
            return false;
        }
        self.state = MapState::Initializing;
        true
    }

    /// Record the outcome of initialization.
    pub fn finish_initialize(&mut self, outcome: Result<(), MapInitError>) {
        if self.state != MapState::Initializing {
            return;
        }
        self.state = match outcome {
            Ok(()) => MapState::Ready,
            Err(e) => MapState::Failed(e),
        };
    }

    /// Initialize against `capability` in one step.
    ///
    /// Sessions that must not hold a lock across the capability call use
    /// [`begin_initialize`](Self::begin_initialize) and
    /// [`finish_initialize`](Self::finish_initialize) instead.
    pub async fn initialize<M: MapCapability>(
        &mut self,
        capability: &M,
    ) -> Result<(), MapInitError> {
        if !self.begin_initialize() {
            return match &self.state {
                MapState::Failed(e) => Err(e.clone()),
                _ => Ok(()),
            };
        }
        let outcome = capability.initialize().await;
        self.finish_initialize(outcome.clone());
        outcome
    }

    /// Show a route: map visible, overlay hidden.
    ///
    /// Replaces any route already shown. Fails unless the map is ready.
    pub fn render(&mut self, route: RenderedRoute) -> Result<(), MapInitError> {
        if !self.is_ready() {
            return Err(MapInitError::NotReady);
        }
        self.state = MapState::Showing(Box::new(route));
        self.container_visible = true;
        self.overlay_visible = false;
        Ok(())
    }

    /// Remove the route: map hidden, overlay shown.
    ///
    /// A no-op unless the map is ready.
    pub fn clear(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.state = MapState::Ready;
        self.container_visible = false;
        self.overlay_visible = true;
    }

    /// Hide the introductory overlay without touching the map.
    pub fn dismiss_overlay(&mut self) {
        self.overlay_visible = false;
    }
}
