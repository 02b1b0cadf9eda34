//! HTTP route handlers.

use std::path::Path;
use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use indexmap::IndexMap;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::directions::RoutingError;
use crate::domain::{RouteRequest, ValidationError, validate};
use crate::map::{MapCapability, MapInitError};
use crate::report::ErrorCategory;
use crate::session::Session;
use crate::stations::{DirectoryState, StationDirectory};

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Cookie holding the session id.
const SESSION_COOKIE: &str = "tube_session";

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/route", post(plan_route))
        .route("/reset", post(reset))
        .route("/overlay/dismiss", post(dismiss_overlay))
        .route("/api/stations", get(list_stations))
        .route("/api/route", post(api_plan_route))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Session id from the request cookies, if any.
fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// Attach the session cookie when the session was just created.
fn with_session_cookie(mut response: Response, id: Uuid, created: bool) -> Response {
    if created {
        let cookie = format!("{SESSION_COOKIE}={id}; HttpOnly; SameSite=Lax; Path=/");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "could not encode session cookie"),
        }
    }
    response
}

/// Find or start the caller's session.
async fn session(state: &AppState, headers: &HeaderMap) -> (Uuid, Arc<Session>, bool) {
    state
        .sessions
        .get_or_create(session_id(headers), state.maps.as_ref())
        .await
}

/// Redirect back to the page after a form post.
fn back_to_page(id: Uuid, created: bool) -> Response {
    with_session_cookie(Redirect::to("/").into_response(), id, created)
}

/// The route planner page.
async fn index_page(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let (id, session, created) = session(&state, &headers).await;
    let view = session.view(&state.stations.state()).await;

    let html = IndexTemplate::new(view)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })?;

    Ok(with_session_cookie(Html(html).into_response(), id, created))
}

/// Plan a route from the page's dropdowns.
async fn plan_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PlanRouteForm>,
) -> Response {
    let (id, session, created) = session(&state, &headers).await;
    session.sync_directory(&state.stations.state()).await;

    let outcome = session
        .plan_route(state.maps.as_ref(), &form.start, &form.end)
        .await;
    debug!(session = %id, ?outcome, "plan route");

    back_to_page(id, created)
}

/// Reset the page.
async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, session, created) = session(&state, &headers).await;
    session.reset().await;
    back_to_page(id, created)
}

/// Hide the intro overlay.
async fn dismiss_overlay(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, session, created) = session(&state, &headers).await;
    session.dismiss_overlay().await;
    back_to_page(id, created)
}

/// The loaded directory, or the reason there isn't one.
fn loaded_directory(state: &AppState) -> Result<Arc<StationDirectory>, AppError> {
    match state.stations.state() {
        DirectoryState::Loaded(directory) => Ok(directory),
        DirectoryState::Loading => Err(AppError::Unavailable {
            message: "Station data is still loading".into(),
            category: None,
        }),
        DirectoryState::Failed(e) => Err(AppError::Unavailable {
            message: e.to_string(),
            category: Some(ErrorCategory::DataLoad),
        }),
    }
}

/// All stations with their accessibility descriptors, in load order.
async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<IndexMap<String, String>>, AppError> {
    let directory = loaded_directory(&state)?;
    Ok(Json(directory.as_map().clone()))
}

/// Plan a route without a session.
///
/// Names not in the directory are treated like the dropdown's default
/// entry.
async fn api_plan_route(
    State(state): State<AppState>,
    Json(req): Json<RouteApiRequest>,
) -> Result<Json<RouteApiResponse>, AppError> {
    let directory = loaded_directory(&state)?;
    let known = |name: &str| {
        if directory.contains(name) {
            name.to_string()
        } else {
            String::new()
        }
    };

    let route = validate(&known(&req.start), &known(&req.end))?;
    state.maps.initialize().await?;

    let request = RouteRequest::new(&route, state.framing);
    let result = state.maps.plan_route(&request).await?;
    let rendered = state.maps.render(&result);

    let accessibility = |name: &str| StationAccessibility {
        name: name.to_string(),
        accessibility: directory.describe(name).to_string(),
    };

    Ok(Json(RouteApiResponse {
        start: accessibility(route.start()),
        end: accessibility(route.end()),
        request,
        route: rendered,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Invalid {
        message: String,
    },
    Unavailable {
        message: String,
        category: Option<ErrorCategory>,
    },
    Upstream {
        message: String,
    },
    Internal {
        message: String,
    },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Invalid {
            message: e.to_string(),
        }
    }
}

impl From<MapInitError> for AppError {
    fn from(e: MapInitError) -> Self {
        AppError::Unavailable {
            message: e.to_string(),
            category: Some(ErrorCategory::MapInitialization),
        }
    }
}

impl From<RoutingError> for AppError {
    fn from(e: RoutingError) -> Self {
        AppError::Upstream {
            message: format!("{} ({})", e.description(), e.status_code()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, category) = match self {
            AppError::Invalid { message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                message,
                Some(ErrorCategory::Validation),
            ),
            AppError::Unavailable { message, category } => {
                (StatusCode::SERVICE_UNAVAILABLE, message, category)
            }
            AppError::Upstream { message } => {
                (StatusCode::BAD_GATEWAY, message, Some(ErrorCategory::Routing))
            }
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            category,
        });
        (status, body).into_response()
    }
}
