//! Route errors.

use std::fmt;

use crate::network::BuildError;

/// Which end of the route a stop was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Why a route could not be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// The graph could not be built from the input data.
    #[error("graph build failed: {0}")]
    GraphBuild(#[from] BuildError),

    /// No node in the graph has the requested stop name.
    #[error("{role} stop not in network: {stop}")]
    EndpointNotFound { role: Endpoint, stop: String },

    /// The solver found no route.
    #[error("no feasible solution: {0}")]
    NoFeasibleSolution(String),

    /// A route was found but does not reach the destination.
    #[error("incomplete path: {0}")]
    IncompletePath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouteError::EndpointNotFound {
            role: Endpoint::Origin,
            stop: "Atlantis".into(),
        };
        assert_eq!(err.to_string(), "origin stop not in network: Atlantis");

        let err = RouteError::NoFeasibleSolution("solver reported infeasible".into());
        assert_eq!(
            err.to_string(),
            "no feasible solution: solver reported infeasible"
        );

        let err = RouteError::IncompletePath("stopped at Kota".into());
        assert_eq!(err.to_string(), "incomplete path: stopped at Kota");

        let err = RouteError::from(BuildError::NoStops);
        assert_eq!(
            err.to_string(),
            "graph build failed: no named stops to build a graph from"
        );
    }
}
