//! Route planning over a transit graph.
//!
//! Two solvers answer the same question: the cheapest path between two
//! stops under a weighted cost of time, fare and transfers.
//!
//! - [`exact`] models the trip as a unit min-cost flow and solves it as a
//!   binary program, so its answer is optimal.
//! - [`slime`] is a population metaheuristic that only ever returns valid
//!   paths, but may miss the optimum.
//!
//! Both answers go through the same reconstruction and geometry steps, so
//! their [`RouteResult`](crate::domain::RouteResult)s can be compared
//! directly.

mod compare;
mod config;
mod error;
pub mod exact;
mod geometry;
mod journey;
mod operators;
mod reconstruct;
mod route;
pub mod slime;

#[cfg(test)]
mod solver_tests;

use petgraph::graph::NodeIndex;

use crate::network::TransitGraph;

pub use compare::{Comparison, compare_solvers, optimality_gap};
pub use config::{JourneyConfig, SlimeConfig};
pub use error::{Endpoint, RouteError};
pub use exact::solve_exact;
pub use geometry::{GeometryProjector, Projection, ProjectionError};
pub use journey::{JourneyPlan, JourneyRequest, OriginChoice, plan_journey};
pub use reconstruct::{Reconstruction, reconstruct};
pub use route::{RoutePlanner, SolverKind};
pub use slime::solve_slime_mould;

/// A solver's answer: node path and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedPath {
    pub path: Vec<NodeIndex>,
    pub cost: f64,
}

/// All nodes at the origin and destination stops.
pub(crate) fn resolve_endpoints(
    graph: &TransitGraph,
    origin: &str,
    destination: &str,
) -> Result<(Vec<NodeIndex>, Vec<NodeIndex>), RouteError> {
    let origins = graph.nodes_at_stop(origin);
    if origins.is_empty() {
        return Err(RouteError::EndpointNotFound {
            role: Endpoint::Origin,
            stop: origin.to_string(),
        });
    }
    let destinations = graph.nodes_at_stop(destination);
    if destinations.is_empty() {
        return Err(RouteError::EndpointNotFound {
            role: Endpoint::Destination,
            stop: destination.to_string(),
        });
    }
    Ok((origins, destinations))
}
