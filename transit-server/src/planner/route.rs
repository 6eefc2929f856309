//! Route planner facade tying the solvers to reconstruction and geometry.

use petgraph::graph::NodeIndex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{CorridorFeature, RouteResult, Weights};
use crate::network::{TransitGraph, path_cost};
use crate::stops::StopDirectory;

use super::config::SlimeConfig;
use super::error::RouteError;
use super::exact::solve_exact;
use super::geometry::GeometryProjector;
use super::reconstruct::reconstruct;
use super::slime::solve_slime_mould;

/// Which solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Flow-based integer program. Always optimal.
    #[default]
    #[serde(alias = "pulp")]
    Exact,
    /// Slime-mould metaheuristic.
    #[serde(alias = "sma")]
    SlimeMould,
}

impl SolverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::SlimeMould => "slime_mould",
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solves routes on one graph and turns the answers into [`RouteResult`]s.
pub struct RoutePlanner<'a> {
    graph: &'a TransitGraph,
    directory: &'a StopDirectory,
    corridors: &'a [CorridorFeature],
}

impl<'a> RoutePlanner<'a> {
    pub fn new(
        graph: &'a TransitGraph,
        directory: &'a StopDirectory,
        corridors: &'a [CorridorFeature],
    ) -> Self {
        Self {
            graph,
            directory,
            corridors,
        }
    }

    pub fn graph(&self) -> &'a TransitGraph {
        self.graph
    }

    pub fn directory(&self) -> &'a StopDirectory {
        self.directory
    }

    /// Optimal route by the exact solver.
    pub fn solve_exact(
        &self,
        origin: &str,
        destination: &str,
        weights: &Weights,
    ) -> Result<RouteResult, RouteError> {
        let solved = solve_exact(self.graph, origin, destination, weights)?;
        self.assemble(&solved.path, weights)
    }

    /// Good route by the slime-mould search.
    pub fn solve_metaheuristic<R: Rng>(
        &self,
        origin: &str,
        destination: &str,
        weights: &Weights,
        config: &SlimeConfig,
        rng: &mut R,
    ) -> Result<RouteResult, RouteError> {
        let solved = solve_slime_mould(self.graph, origin, destination, weights, config, rng)?;
        self.assemble(&solved.path, weights)
    }

    pub fn solve<R: Rng>(
        &self,
        solver: SolverKind,
        origin: &str,
        destination: &str,
        weights: &Weights,
        config: &SlimeConfig,
        rng: &mut R,
    ) -> Result<RouteResult, RouteError> {
        match solver {
            SolverKind::Exact => self.solve_exact(origin, destination, weights),
            SolverKind::SlimeMould => {
                self.solve_metaheuristic(origin, destination, weights, config, rng)
            }
        }
    }

    /// Build the full result for a node path. The cost is recomputed from
    /// the path, whichever solver produced it.
    pub fn assemble(&self, path: &[NodeIndex], weights: &Weights) -> Result<RouteResult, RouteError> {
        let rebuilt = reconstruct(self.graph, path)?;
        let nodes = self.graph.path_nodes(path);

        let mut itinerary = rebuilt.itinerary;
        let projection =
            GeometryProjector::new(self.directory, self.corridors).project(&mut itinerary, &nodes);

        Ok(RouteResult {
            path: nodes,
            itinerary,
            total_time_hours: rebuilt.total_time_hours,
            total_distance_km: rebuilt.total_distance_km,
            transit_count: rebuilt.transit_count,
            cost: path_cost(self.graph, path, weights),
            display_coordinates: projection.coordinates,
            projection_fallback: projection.fallback.map(|e| e.to_string()),
        })
    }
}
