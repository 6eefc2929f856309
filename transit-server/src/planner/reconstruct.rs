//! Turn a node path into totals and a rider-facing itinerary.

use petgraph::graph::NodeIndex;

use crate::domain::{ItineraryStep, TransferStep, TravelSegment};
use crate::network::{EdgeKind, TransitGraph, transit_increment};

use super::error::RouteError;

/// Totals and steps for one path.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    pub itinerary: Vec<ItineraryStep>,
    pub total_time_hours: f64,
    pub total_distance_km: f64,
    pub transit_count: u32,
}

/// Walk the path, summing edge attributes and grouping consecutive rides
/// on one corridor into a single segment.
pub fn reconstruct(graph: &TransitGraph, path: &[NodeIndex]) -> Result<Reconstruction, RouteError> {
    if path.len() < 2 {
        return Err(RouteError::IncompletePath(format!(
            "path has {} node(s), need at least 2",
            path.len()
        )));
    }

    let mut itinerary = Vec::new();
    let mut riding: Option<TravelSegment> = None;
    let mut total_time_hours = 0.0;
    let mut total_distance_km = 0.0;
    let mut transit_count = 0;

    for pair in path.windows(2) {
        let (from, to) = (graph.node(pair[0]), graph.node(pair[1]));
        let edge = graph.edge_between(pair[0], pair[1]).ok_or_else(|| {
            RouteError::IncompletePath(format!("no edge from {from} to {to}"))
        })?;

        total_time_hours += edge.time_hours;
        total_distance_km += edge.distance_km;
        transit_count += transit_increment(from, to, edge);

        match edge.kind {
            EdgeKind::Travel => match riding.as_mut() {
                Some(segment) if segment.corridor == *from.corridor() => {
                    let passed = std::mem::replace(&mut segment.to, to.stop().to_string());
                    segment.via.push(passed);
                }
                _ => {
                    itinerary.extend(riding.take().map(ItineraryStep::Travel));
                    let mut segment = TravelSegment::new(from.corridor().clone(), from.stop());
                    segment.to = to.stop().to_string();
                    riding = Some(segment);
                }
            },
            EdgeKind::Transfer => {
                itinerary.extend(riding.take().map(ItineraryStep::Travel));
                itinerary.push(ItineraryStep::Transfer(TransferStep {
                    stop: from.stop().to_string(),
                    from_corridor: from.corridor().clone(),
                    to_corridor: to.corridor().clone(),
                    coord: None,
                }));
            }
        }
    }
    itinerary.extend(riding.map(ItineraryStep::Travel));

    Ok(Reconstruction {
        itinerary,
        total_time_hours,
        total_distance_km,
        transit_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CorridorId, Node};

    fn corridor(s: &str) -> CorridorId {
        CorridorId::parse(s).unwrap()
    }

    fn node(stop: &str, c: &str) -> Node {
        Node::new(stop, corridor(c))
    }

    fn network() -> TransitGraph {
        let mut g = TransitGraph::new();
        g.add_travel(&node("A", "1"), &node("B", "1"), 0.1, 1.0);
        g.add_travel(&node("B", "1"), &node("C", "1"), 0.2, 2.0);
        g.add_travel(&node("C", "2"), &node("D", "2"), 0.3, 3.0);
        g.add_transfer(&node("C", "1"), &node("C", "2"), 0.05);
        g
    }

    fn path(g: &TransitGraph, nodes: &[(&str, &str)]) -> Vec<NodeIndex> {
        nodes
            .iter()
            .map(|(s, c)| g.index_of(&node(s, c)).unwrap())
            .collect()
    }

    #[test]
    fn groups_rides_and_counts_transfers() {
        let g = network();
        let p = path(&g, &[("A", "1"), ("B", "1"), ("C", "1"), ("C", "2"), ("D", "2")]);
        let r = reconstruct(&g, &p).unwrap();

        assert_eq!(r.transit_count, 1);
        assert!((r.total_time_hours - 0.65).abs() < 1e-12);
        assert!((r.total_distance_km - 6.0).abs() < 1e-12);

        assert_eq!(r.itinerary.len(), 3);
        match &r.itinerary[0] {
            ItineraryStep::Travel(seg) => {
                assert_eq!(seg.corridor, corridor("1"));
                assert_eq!(seg.from, "A");
                assert_eq!(seg.to, "C");
                assert_eq!(seg.via, vec!["B".to_string()]);
            }
            other => panic!("expected travel, got {other:?}"),
        }
        match &r.itinerary[1] {
            ItineraryStep::Transfer(t) => {
                assert_eq!(t.stop, "C");
                assert_eq!(t.from_corridor, corridor("1"));
                assert_eq!(t.to_corridor, corridor("2"));
            }
            other => panic!("expected transfer, got {other:?}"),
        }
        match &r.itinerary[2] {
            ItineraryStep::Travel(seg) => {
                assert_eq!((seg.from.as_str(), seg.to.as_str()), ("C", "D"));
                assert!(seg.via.is_empty());
            }
            other => panic!("expected travel, got {other:?}"),
        }
    }

    #[test]
    fn single_edge_route() {
        let g = network();
        let r = reconstruct(&g, &path(&g, &[("B", "1"), ("A", "1")])).unwrap();
        assert_eq!(r.transit_count, 0);
        assert_eq!(r.itinerary.len(), 1);
    }

    #[test]
    fn rejects_short_paths() {
        let g = network();
        assert!(matches!(
            reconstruct(&g, &path(&g, &[("A", "1")])),
            Err(RouteError::IncompletePath(_))
        ));
        assert!(reconstruct(&g, &[]).is_err());
    }

    #[test]
    fn rejects_missing_edges() {
        let g = network();
        let err = reconstruct(&g, &path(&g, &[("A", "1"), ("C", "1")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "incomplete path: no edge from A [1] to C [1]"
        );
    }
}
