//! Exact solver: single-commodity min-cost flow as a binary program.
//!
//! One unit of flow leaves a chosen origin node and enters a chosen
//! destination node. Every directed edge carries a binary flow variable,
//! every candidate origin a binary source selector and every candidate
//! destination a binary sink selector. The node sets come from stop names,
//! so the solver also picks which corridor to board and alight on.

use std::collections::{BTreeSet, HashMap, HashSet};

use good_lp::{
    Expression, ProblemVariables, Solution, SolverModel, Variable, constraint, microlp, variable,
};
use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::{debug, trace};

use crate::domain::Weights;
use crate::network::{TransitGraph, edge_cost, path_cost};

use super::error::RouteError;
use super::{SolvedPath, resolve_endpoints};

/// Selector values above this count as chosen.
const SELECTED: f64 = 0.5;

/// Solve for the cheapest origin to destination path.
///
/// Blocks until the solver finishes.
pub fn solve_exact(
    graph: &TransitGraph,
    origin: &str,
    destination: &str,
    weights: &Weights,
) -> Result<SolvedPath, RouteError> {
    let (origins, destinations) = resolve_endpoints(graph, origin, destination)?;

    let mut vars = ProblemVariables::new();

    let mut edges: Vec<(EdgeIndex, NodeIndex, NodeIndex, Variable)> = Vec::new();
    let mut costs: Vec<f64> = Vec::new();
    for e in graph.edge_indices() {
        let (Some((a, b)), Some(edge)) = (graph.edge_endpoints(e), graph.edge(e)) else {
            continue;
        };
        let x = vars.add(variable().binary());
        costs.push(edge_cost(graph.node(a), graph.node(b), edge, weights));
        edges.push((e, a, b, x));
    }
    let objective: Expression = edges
        .iter()
        .zip(&costs)
        .map(|(&(_, _, _, x), &cost)| cost * x)
        .sum();

    let sources: HashMap<NodeIndex, Variable> = origins
        .iter()
        .map(|&n| (n, vars.add(variable().binary())))
        .collect();
    let sinks: HashMap<NodeIndex, Variable> = destinations
        .iter()
        .map(|&n| (n, vars.add(variable().binary())))
        .collect();

    let mut inflow: HashMap<NodeIndex, Vec<Variable>> = HashMap::new();
    let mut outflow: HashMap<NodeIndex, Vec<Variable>> = HashMap::new();
    for &(_, a, b, x) in &edges {
        outflow.entry(a).or_default().push(x);
        inflow.entry(b).or_default().push(x);
    }

    debug!(
        edges = edges.len(),
        sources = sources.len(),
        sinks = sinks.len(),
        "solving flow model"
    );

    let total_source: Expression = sources.values().copied().sum();
    let total_sink: Expression = sinks.values().copied().sum();
    let mut model = vars
        .minimise(objective)
        .using(microlp)
        .with(constraint!(total_source == 1))
        .with(constraint!(total_sink == 1));

    for node in graph.node_indices() {
        let lhs: Expression = inflow
            .get(&node)
            .into_iter()
            .flatten()
            .copied()
            .chain(sources.get(&node).copied())
            .sum();
        let rhs: Expression = outflow
            .get(&node)
            .into_iter()
            .flatten()
            .copied()
            .chain(sinks.get(&node).copied())
            .sum();
        model = model.with(constraint!(lhs == rhs));
    }

    let solution = model
        .solve()
        .map_err(|e| RouteError::NoFeasibleSolution(format!("solver status: {e}")))?;

    let start = origins
        .iter()
        .copied()
        .find(|n| sources.get(n).is_some_and(|&v| solution.value(v) > SELECTED))
        .ok_or_else(|| RouteError::NoFeasibleSolution("no origin selected".to_string()))?;

    let chosen: BTreeSet<EdgeIndex> = edges
        .iter()
        .filter(|&&(_, _, _, x)| solution.value(x) > SELECTED)
        .map(|&(e, ..)| e)
        .collect();

    let walk = follow_flow(graph, start, chosen);
    let path = erase_loops(walk);

    let end = path.last().copied();
    let reached = end.is_some_and(|n| destinations.contains(&n));
    if !reached || path.len() < 2 {
        let stopped_at = end.map(|n| graph.node(n).to_string()).unwrap_or_default();
        return Err(RouteError::IncompletePath(format!(
            "flow from {origin} stopped at {stopped_at} before reaching {destination}"
        )));
    }

    let cost = path_cost(graph, &path, weights);
    debug!(nodes = path.len(), cost, "exact solution");

    Ok(SolvedPath { path, cost })
}

/// Walk from `start` along chosen edges, consuming each edge once and
/// taking the lowest-indexed edge at every branch. Stops when no chosen
/// edge leaves the current node.
fn follow_flow(graph: &TransitGraph, start: NodeIndex, mut chosen: BTreeSet<EdgeIndex>) -> Vec<NodeIndex> {
    let mut walk = vec![start];
    let mut current = start;
    let max_steps = chosen.len();

    for _ in 0..max_steps {
        let next = graph
            .outgoing(current)
            .filter(|(e, _, _)| chosen.contains(e))
            .min_by_key(|(e, _, _)| e.index());
        let Some((e, target, _)) = next else {
            break;
        };
        chosen.remove(&e);
        walk.push(target);
        current = target;
    }

    if !chosen.is_empty() {
        trace!(unused = chosen.len(), "flow edges outside the main path");
    }
    walk
}

/// Remove cycles from a walk, keeping it a walk from the same start to
/// the same end with no repeated node.
fn erase_loops(walk: Vec<NodeIndex>) -> Vec<NodeIndex> {
    let mut path: Vec<NodeIndex> = Vec::with_capacity(walk.len());
    let mut seen: HashSet<NodeIndex> = HashSet::new();

    for node in walk {
        if seen.contains(&node) {
            while let Some(last) = path.pop() {
                if last == node {
                    break;
                }
                seen.remove(&last);
            }
        }
        seen.insert(node);
        path.push(node);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: u32) -> NodeIndex {
        NodeIndex::new(i as usize)
    }

    #[test]
    fn erase_loops_keeps_simple_walks() {
        let walk = vec![n(0), n(1), n(2)];
        assert_eq!(erase_loops(walk.clone()), walk);
    }

    #[test]
    fn erase_loops_cuts_cycles() {
        let walk = vec![n(0), n(1), n(2), n(3), n(1), n(4)];
        assert_eq!(erase_loops(walk), vec![n(0), n(1), n(4)]);
    }

    #[test]
    fn erase_loops_handles_nested_cycles() {
        let walk = vec![n(0), n(1), n(2), n(1), n(3), n(0), n(5)];
        assert_eq!(erase_loops(walk), vec![n(0), n(5)]);
    }
}
