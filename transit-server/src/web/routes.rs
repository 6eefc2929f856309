//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, Timelike};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::cache::GraphLoadError;
use crate::domain::{Departure, Preference, Weights};
use crate::network::TimeProfile;
use crate::planner::{JourneyRequest, RouteError, RoutePlanner, compare_solvers, plan_journey};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Static assets are served under `/static` when `static_dir` is set.
pub fn create_router(state: AppState, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/stops/search", get(search_stops))
        .route("/api/route/plan", post(plan_route))
        .route("/api/route/compare", post(compare_route));

    let router = match static_dir {
        Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
        None => router,
    };
    router.with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stops by name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stops = state
        .directory
        .search(&req.q, limit)
        .into_iter()
        .map(StopSearchResult::from)
        .collect();

    Json(StopSearchResponse { stops })
}

/// Plan a journey, trying nearby walk-in stops as well as the origin.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Json<JourneyResponse>, AppError> {
    let (origin, destination) = endpoints(&req.origin, &req.destination)?;
    let departure = parse_departure(req.departure.as_deref())?;
    let preference = parse_preference(req.preference.as_deref())?;

    let params = TimeProfile::for_departure(&departure).params();
    let graph = state.network.graph_for(&params).await?;

    let request = JourneyRequest {
        origin,
        destination,
        departure,
        preference,
        solver: req.solver.unwrap_or_default(),
    };

    let plan = tokio::task::spawn_blocking(move || {
        let planner = RoutePlanner::new(&graph, &state.directory, state.network.corridors());
        let mut rng = state.slime.rng();
        plan_journey(
            &planner,
            &request,
            &params,
            &state.journey,
            &state.slime,
            &mut rng,
        )
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("planning task failed: {e}"),
    })??;

    Ok(Json(JourneyResponse::from_plan(&plan)))
}

/// Run both solvers on one trip and report the optimality gap.
async fn compare_route(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let (origin, destination) = endpoints(&req.origin, &req.destination)?;
    let departure = parse_departure(req.departure.as_deref())?;
    let weights = match req.weights {
        Some(w) => Weights::new(w.time, w.cost, w.transit).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?,
        None => parse_preference(req.preference.as_deref())?.weights(),
    };

    let params = TimeProfile::for_departure(&departure).params();
    let graph = state.network.graph_for(&params).await?;

    let comparison = tokio::task::spawn_blocking(move || {
        let planner = RoutePlanner::new(&graph, &state.directory, state.network.corridors());
        let mut rng = state.slime.rng();
        compare_solvers(
            &planner,
            &origin,
            &destination,
            &weights,
            &state.slime,
            &mut rng,
        )
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("comparison task failed: {e}"),
    })??;

    Ok(Json(CompareResponse::from_comparison(&comparison)))
}

/// Trimmed, non-empty origin and destination.
fn endpoints(origin: &str, destination: &str) -> Result<(String, String), AppError> {
    let origin = origin.trim();
    let destination = destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(AppError::BadRequest {
            message: "origin and destination are required".to_string(),
        });
    }
    Ok((origin.to_string(), destination.to_string()))
}

/// Parse "HH:MM", or use the current local time.
fn parse_departure(departure: Option<&str>) -> Result<Departure, AppError> {
    match departure.filter(|s| !s.trim().is_empty()) {
        Some(s) => Departure::parse_hhmm(s).map_err(|e| AppError::BadRequest {
            message: format!("Invalid departure {s:?}: {e}"),
        }),
        None => {
            let now = Local::now().time();
            Departure::from_hm(now.hour(), now.minute()).ok_or_else(|| AppError::Internal {
                message: "clock returned an invalid time".to_string(),
            })
        }
    }
}

fn parse_preference(preference: Option<&str>) -> Result<Preference, AppError> {
    match preference {
        Some(s) => Preference::parse(s).ok_or_else(|| AppError::BadRequest {
            message: format!("Unknown preference: {s}"),
        }),
        None => Ok(Preference::default()),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::EndpointNotFound { .. } => AppError::NotFound { message },
            RouteError::NoFeasibleSolution(_) | RouteError::IncompletePath(_) => {
                AppError::Unprocessable { message }
            }
            RouteError::GraphBuild(_) => AppError::Internal { message },
        }
    }
}

impl From<GraphLoadError> for AppError {
    fn from(e: GraphLoadError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
