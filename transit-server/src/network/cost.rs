//! Cost model shared by both solvers.
//!
//! The cost of an edge is a weighted sum of its travel time, its monetary
//! cost, and a transfer penalty paid once per change between two different
//! corridors. A path costs the sum of its edges.

use petgraph::graph::NodeIndex;

use crate::domain::{Node, Weights};

use super::{TransitEdge, TransitGraph};

/// 1 for a transfer between different corridors, 0 otherwise.
pub fn transit_increment(from: &Node, to: &Node, edge: &TransitEdge) -> u32 {
    u32::from(edge.is_transfer() && !from.same_corridor(to))
}

/// Weighted cost of traversing `edge` from `from` to `to`.
pub fn edge_cost(from: &Node, to: &Node, edge: &TransitEdge, weights: &Weights) -> f64 {
    weights.time() * edge.time_hours
        + weights.cost() * edge.monetary_cost
        + weights.transit() * f64::from(transit_increment(from, to, edge))
}

/// Total cost of a path.
///
/// Infinite if the path has fewer than two nodes or any consecutive pair
/// is not joined by an edge.
pub fn path_cost(graph: &TransitGraph, path: &[NodeIndex], weights: &Weights) -> f64 {
    if path.len() < 2 {
        return f64::INFINITY;
    }

    let mut total = 0.0;
    for pair in path.windows(2) {
        match graph.edge_between(pair[0], pair[1]) {
            Some(edge) => {
                total += edge_cost(graph.node(pair[0]), graph.node(pair[1]), edge, weights);
            }
            None => return f64::INFINITY,
        }
    }
    total
}
