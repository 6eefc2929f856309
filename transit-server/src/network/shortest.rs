//! Shortest paths over the transit graph.
//!
//! Edge weights are supplied per call, so randomized searches never touch
//! the shared graph.

use petgraph::algo::astar;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rand::Rng;
use rand::seq::SliceRandom;

use super::{TransitEdge, TransitGraph};

/// Cheapest path from `from` to `to` under `edge_weight`.
///
/// Weights must be non-negative. Returns the total weight and the node
/// sequence, `from` and `to` included.
pub fn shortest_path<F>(
    graph: &TransitGraph,
    from: NodeIndex,
    to: NodeIndex,
    mut edge_weight: F,
) -> Option<(f64, Vec<NodeIndex>)>
where
    F: FnMut(EdgeIndex, &TransitEdge) -> f64,
{
    astar(
        graph.inner(),
        from,
        |n| n == to,
        |e| edge_weight(e.id(), e.weight()),
        |_| 0.0,
    )
}

/// Quickest path by travel time.
pub fn fastest_path(graph: &TransitGraph, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
    shortest_path(graph, from, to, |_, edge| edge.time_hours).map(|(_, path)| path)
}

/// One weight per edge, drawn uniformly from [0.1, 1.0).
pub fn random_weights<R: Rng>(graph: &TransitGraph, rng: &mut R) -> Vec<f64> {
    (0..graph.edge_count())
        .map(|_| rng.gen_range(0.1..1.0))
        .collect()
}

/// A path between a random origin and a random destination, cheapest
/// under freshly drawn random edge weights.
///
/// Returns `None` if either set is empty, the pair is disconnected, or
/// the path would have fewer than two nodes.
pub fn random_path<R: Rng>(
    graph: &TransitGraph,
    origins: &[NodeIndex],
    destinations: &[NodeIndex],
    rng: &mut R,
) -> Option<Vec<NodeIndex>> {
    let from = *origins.choose(rng)?;
    let to = *destinations.choose(rng)?;
    let weights = random_weights(graph, rng);

    let (_, path) = shortest_path(graph, from, to, |e, _| weights[e.index()])?;
    (path.len() >= 2).then_some(path)
}
