//! Path operators for the slime-mould search.
//!
//! Both operators take a magnitude `v` and act with probability `|v|`.
//! A result that is not a valid path falls back to the input unchanged.

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;

use crate::network::{TransitGraph, fastest_path};

use super::error::RouteError;
use super::resolve_endpoints;

/// A candidate path and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub path: Vec<NodeIndex>,
    pub fitness: f64,
}

/// The graph and the two endpoint node sets a search runs over.
pub struct SearchSpace<'a> {
    pub graph: &'a TransitGraph,
    pub origins: Vec<NodeIndex>,
    pub destinations: Vec<NodeIndex>,
    origin_set: HashSet<NodeIndex>,
    destination_set: HashSet<NodeIndex>,
}

impl<'a> SearchSpace<'a> {
    pub fn new(graph: &'a TransitGraph, origin: &str, destination: &str) -> Result<Self, RouteError> {
        let (origins, destinations) = resolve_endpoints(graph, origin, destination)?;
        Ok(Self {
            graph,
            origin_set: origins.iter().copied().collect(),
            destination_set: destinations.iter().copied().collect(),
            origins,
            destinations,
        })
    }

    /// True for nodes at the origin or destination stop.
    pub fn is_endpoint(&self, node: NodeIndex) -> bool {
        self.origin_set.contains(&node) || self.destination_set.contains(&node)
    }

    /// Starts at an origin node, ends at a destination node, follows edges
    /// and never repeats a node.
    pub fn is_valid(&self, path: &[NodeIndex]) -> bool {
        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            return false;
        };
        if path.len() < 2
            || !self.origin_set.contains(first)
            || !self.destination_set.contains(last)
        {
            return false;
        }

        let mut seen = HashSet::with_capacity(path.len());
        path.iter().all(|n| seen.insert(*n)) && self.graph.is_walk(path)
    }
}

/// Replace the stretch between two random positions with the quickest
/// sub-path between them.
pub fn mutate<R: Rng>(space: &SearchSpace<'_>, path: &[NodeIndex], v: f64, rng: &mut R) -> Vec<NodeIndex> {
    if path.len() < 3 || rng.gen_range(0.0..1.0) >= v.abs() {
        return path.to_vec();
    }

    let picks = rand::seq::index::sample(rng, path.len(), 2);
    let (i, j) = {
        let (a, b) = (picks.index(0), picks.index(1));
        (a.min(b), a.max(b))
    };

    let Some(sub) = fastest_path(space.graph, path[i], path[j]) else {
        return path.to_vec();
    };

    let mut candidate = path[..i].to_vec();
    candidate.extend(sub);
    candidate.extend_from_slice(&path[j + 1..]);

    if space.is_valid(&candidate) {
        candidate
    } else {
        path.to_vec()
    }
}

/// Join the head of `incumbent` to the tail of a population member at a
/// shared intermediate node.
///
/// The member is drawn with probability proportional to `weights`, or
/// uniformly when the weights cannot be used.
pub fn crossover<R: Rng>(
    space: &SearchSpace<'_>,
    incumbent: &[NodeIndex],
    population: &[Member],
    weights: &[f64],
    v: f64,
    rng: &mut R,
) -> Vec<NodeIndex> {
    if population.is_empty() || rng.gen_range(0.0..1.0) >= v.abs() {
        return incumbent.to_vec();
    }

    let pick = match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => rng.gen_range(0..population.len()),
    };
    let Some(other) = population.get(pick).map(|m| &m.path) else {
        return incumbent.to_vec();
    };
    if other.len() < 2 {
        return incumbent.to_vec();
    }

    let positions: HashMap<NodeIndex, usize> =
        other.iter().enumerate().map(|(j, &n)| (n, j)).collect();
    let common: Vec<(usize, usize)> = incumbent
        .iter()
        .enumerate()
        .filter(|&(_, &n)| !space.is_endpoint(n))
        .filter_map(|(i, n)| positions.get(n).map(|&j| (i, j)))
        .collect();

    let Some(&(i, j)) = common.choose(rng) else {
        return incumbent.to_vec();
    };

    let mut candidate = incumbent[..i].to_vec();
    candidate.extend_from_slice(&other[j..]);

    if space.is_valid(&candidate) {
        candidate
    } else {
        incumbent.to_vec()
    }
}
