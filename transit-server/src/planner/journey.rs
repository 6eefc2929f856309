//! Rider-facing journey planning.
//!
//! Tries the requested origin and every stop within walking distance of
//! it, and keeps the option that gets the rider there soonest counting
//! the walk and the first wait.

use petgraph::graph::NodeIndex;
use rand::Rng;
use tracing::{debug, info};

use crate::domain::{Departure, Preference, RouteResult, Weights};
use crate::network::GraphParams;
use crate::walkable::{WalkOrigin, walk_origins};

use super::config::{JourneyConfig, SlimeConfig};
use super::error::RouteError;
use super::route::{RoutePlanner, SolverKind};

/// What the rider asked for.
#[derive(Debug, Clone)]
pub struct JourneyRequest {
    pub origin: String,
    pub destination: String,
    pub departure: Departure,
    pub preference: Preference,
    pub solver: SolverKind,
}

/// Where the rider boards, and how far they walk to get there.
pub type OriginChoice = WalkOrigin;

/// The chosen journey.
#[derive(Debug, Clone)]
pub struct JourneyPlan {
    pub route: RouteResult,
    pub origin: OriginChoice,
    pub initial_wait_minutes: f64,
    pub ride_minutes: f64,
    /// Walk, first wait and ride.
    pub total_minutes: f64,
    /// Ride time in heavy traffic.
    pub congested_minutes: f64,
    pub fare: u32,
    pub preference: Preference,
    pub departure: Departure,
    pub solver: SolverKind,
}

struct Candidate {
    route: RouteResult,
    origin: OriginChoice,
    initial_wait_minutes: f64,
    ride_minutes: f64,
    total_minutes: f64,
}

/// Plan a journey on the planner's graph.
///
/// `params` must be the parameters the graph was built with; they give the
/// wait before the first ride. Origins that fail are skipped. If every one
/// fails the error for the requested origin is returned.
pub fn plan_journey<R: Rng>(
    planner: &RoutePlanner<'_>,
    request: &JourneyRequest,
    params: &GraphParams,
    config: &JourneyConfig,
    slime: &SlimeConfig,
    rng: &mut R,
) -> Result<JourneyPlan, RouteError> {
    let weights = request.preference.weights();
    let origins = walk_origins(planner.directory(), &request.origin, &config.walk_limits());

    let mut best: Option<Candidate> = None;
    let mut direct_error: Option<RouteError> = None;

    for walk in origins {
        let attempt = planner.solve(
            request.solver,
            &walk.stop,
            &request.destination,
            &weights,
            slime,
            rng,
        );
        let route = match attempt {
            Ok(route) => route,
            Err(e) => {
                debug!(origin = %walk.stop, error = %e, "origin scenario failed");
                if walk.is_direct() {
                    direct_error = Some(e);
                }
                continue;
            }
        };

        let (route, walk) = if walk.is_direct() {
            (route, walk)
        } else {
            match trim_at_origin(planner, &route, &request.origin, &weights) {
                Some(trimmed) => (trimmed, WalkOrigin::direct(&request.origin)),
                None => (route, walk),
            }
        };

        let ride_minutes = route.total_time_hours * 60.0;
        let initial_wait_minutes = if ride_minutes > 0.0 {
            params.transfer_minutes
        } else {
            0.0
        };
        let total_minutes = walk.walk_minutes + initial_wait_minutes + ride_minutes;
        debug!(
            origin = %walk.stop,
            walk_minutes = walk.walk_minutes,
            ride_minutes,
            total_minutes,
            "origin scenario"
        );

        if best.as_ref().is_none_or(|b| total_minutes < b.total_minutes) {
            best = Some(Candidate {
                route,
                origin: walk,
                initial_wait_minutes,
                ride_minutes,
                total_minutes,
            });
        }
    }

    let Some(best) = best else {
        return Err(direct_error.unwrap_or_else(|| {
            RouteError::NoFeasibleSolution(format!(
                "no route from {} to {}",
                request.origin, request.destination
            ))
        }));
    };

    info!(
        origin = %best.origin.stop,
        destination = %request.destination,
        solver = %request.solver,
        total_minutes = best.total_minutes,
        transits = best.route.transit_count,
        "journey planned"
    );

    Ok(JourneyPlan {
        congested_minutes: best.ride_minutes * config.congestion_factor,
        fare: request.departure.fare(),
        route: best.route,
        origin: best.origin,
        initial_wait_minutes: best.initial_wait_minutes,
        ride_minutes: best.ride_minutes,
        total_minutes: best.total_minutes,
        preference: request.preference,
        departure: request.departure,
        solver: request.solver,
    })
}

/// Cut `route` to start at its first node on the `origin` stop.
///
/// `None` if the route never visits `origin` after its start, or the
/// remainder is too short to ride.
fn trim_at_origin(
    planner: &RoutePlanner<'_>,
    route: &RouteResult,
    origin: &str,
    weights: &Weights,
) -> Option<RouteResult> {
    let start = route
        .path
        .iter()
        .skip(1)
        .position(|n| n.stop() == origin)?
        + 1;

    let graph = planner.graph();
    let path: Vec<NodeIndex> = route.path[start..]
        .iter()
        .map(|n| graph.index_of(n))
        .collect::<Option<_>>()?;

    planner.assemble(&path, weights).ok()
}
