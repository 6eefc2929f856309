//! The transit graph: nodes are (stop, corridor) pairs, edges are rides or
//! transfers.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::domain::Node;

/// Whether an edge is a ride along a corridor or a change between corridors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Travel,
    Transfer,
}

/// Attributes of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitEdge {
    pub kind: EdgeKind,
    pub time_hours: f64,
    pub monetary_cost: f64,
    pub distance_km: f64,
}

impl TransitEdge {
    /// A ride between adjacent stops. Rides carry no per-edge fare.
    pub fn travel(time_hours: f64, distance_km: f64) -> Self {
        Self {
            kind: EdgeKind::Travel,
            time_hours,
            monetary_cost: 0.0,
            distance_km,
        }
    }

    /// A change of corridor at one stop.
    pub fn transfer(time_hours: f64) -> Self {
        Self {
            kind: EdgeKind::Transfer,
            time_hours,
            monetary_cost: 0.0,
            distance_km: 0.0,
        }
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == EdgeKind::Transfer
    }
}

/// Directed transit graph.
///
/// Built once per parameter set and read-only afterwards. Adding an edge
/// that already exists replaces its attributes, so there are never
/// parallel edges between two nodes.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    graph: DiGraph<Node, TransitEdge>,
    index: HashMap<Node, NodeIndex>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the index of `node`, inserting it if absent.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.index.insert(node, idx);
        idx
    }

    /// Add or replace the edge `from -> to`.
    pub fn add_edge(&mut self, from: &Node, to: &Node, edge: TransitEdge) -> EdgeIndex {
        let a = self.add_node(from.clone());
        let b = self.add_node(to.clone());
        self.graph.update_edge(a, b, edge)
    }

    /// Add a ride in both directions with identical costs.
    pub fn add_travel(&mut self, a: &Node, b: &Node, time_hours: f64, distance_km: f64) {
        let edge = TransitEdge::travel(time_hours, distance_km);
        self.add_edge(a, b, edge);
        self.add_edge(b, a, edge);
    }

    /// Add a transfer in both directions.
    pub fn add_transfer(&mut self, a: &Node, b: &Node, time_hours: f64) {
        let edge = TransitEdge::transfer(time_hours);
        self.add_edge(a, b, edge);
        self.add_edge(b, a, edge);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not come from this graph.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub fn index_of(&self, node: &Node) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    /// All nodes at the named stop, in index order.
    pub fn nodes_at_stop(&self, stop: &str) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].stop() == stop)
            .collect()
    }

    pub fn has_stop(&self, stop: &str) -> bool {
        self.graph.node_weights().any(|n| n.stop() == stop)
    }

    /// The edge `from -> to`, if present.
    pub fn edge_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&TransitEdge> {
        self.graph
            .find_edge(from, to)
            .and_then(|e| self.graph.edge_weight(e))
    }

    pub fn edge(&self, idx: EdgeIndex) -> Option<&TransitEdge> {
        self.graph.edge_weight(idx)
    }

    pub fn edge_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Outgoing edges of `node` as `(edge, target, attributes)`.
    pub fn outgoing(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &TransitEdge)> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (e.id(), e.target(), e.weight()))
    }

    /// Incoming edges of `node` as `(edge, source, attributes)`.
    pub fn incoming(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &TransitEdge)> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| (e.id(), e.source(), e.weight()))
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    /// Resolve a path of indices to owned nodes.
    pub fn path_nodes(&self, path: &[NodeIndex]) -> Vec<Node> {
        path.iter().map(|&idx| self.graph[idx].clone()).collect()
    }

    /// True if every consecutive pair of `path` is joined by an edge.
    pub fn is_walk(&self, path: &[NodeIndex]) -> bool {
        path.windows(2)
            .all(|pair| self.graph.find_edge(pair[0], pair[1]).is_some())
    }

    pub(crate) fn inner(&self) -> &DiGraph<Node, TransitEdge> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CorridorId;

    fn node(stop: &str, corridor: &str) -> Node {
        Node::new(stop, CorridorId::parse(corridor).unwrap())
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = TransitGraph::new();
        let a = g.add_node(node("Kota", "1"));
        let b = g.add_node(node("Kota", "1"));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn travel_edges_are_symmetric() {
        let mut g = TransitGraph::new();
        let a = node("Kota", "1");
        let b = node("Glodok", "1");
        g.add_travel(&a, &b, 0.1, 1.5);

        let ia = g.index_of(&a).unwrap();
        let ib = g.index_of(&b).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_between(ia, ib), g.edge_between(ib, ia));
        assert_eq!(g.edge_between(ia, ib).unwrap().kind, EdgeKind::Travel);
    }

    #[test]
    fn re_adding_edge_replaces_attributes() {
        let mut g = TransitGraph::new();
        let a = node("Kota", "1");
        let b = node("Glodok", "1");
        g.add_travel(&a, &b, 0.1, 1.5);
        g.add_travel(&a, &b, 0.2, 1.5);

        let ia = g.index_of(&a).unwrap();
        let ib = g.index_of(&b).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_between(ia, ib).unwrap().time_hours, 0.2);
    }

    #[test]
    fn transfer_edges_have_no_distance() {
        let mut g = TransitGraph::new();
        g.add_transfer(&node("Harmoni", "1"), &node("Harmoni", "2"), 5.0 / 60.0);

        let stops = g.nodes_at_stop("Harmoni");
        assert_eq!(stops.len(), 2);
        let edge = g.edge_between(stops[0], stops[1]).unwrap();
        assert!(edge.is_transfer());
        assert_eq!(edge.distance_km, 0.0);
    }

    #[test]
    fn walk_check() {
        let mut g = TransitGraph::new();
        let a = node("A", "1");
        let b = node("B", "1");
        let c = node("C", "1");
        g.add_travel(&a, &b, 0.1, 1.0);
        let ic = g.add_node(c);

        let ia = g.index_of(&a).unwrap();
        let ib = g.index_of(&b).unwrap();
        assert!(g.is_walk(&[ia, ib, ia]));
        assert!(!g.is_walk(&[ia, ib, ic]));
        assert!(g.has_stop("C"));
        assert!(!g.has_stop("D"));
        assert_eq!(g.outgoing(ia).count(), 1);
        assert_eq!(g.incoming(ia).count(), 1);
    }
}
