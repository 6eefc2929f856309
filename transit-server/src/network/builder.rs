//! Build a transit graph from stop points and corridor polylines.
//!
//! Stops are snapped to every corridor line that passes within the snap
//! threshold, ordered along the corridor, and chained with ride edges.
//! Stops served by several corridors get transfer edges between their
//! corridor nodes.

use std::collections::{BTreeMap, BTreeSet};

use geo::{BoundingRect, Closest, ClosestPoint, Distance, Euclidean, Haversine, LineLocatePoint};
use geo::{LineString, Point};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};
use tracing::{debug, trace};

use crate::domain::{CorridorFeature, CorridorId, Node, StopFeature};

use super::projection::LocalProjection;
use super::{BuildError, GraphParams, TransitGraph};

/// R-tree entry: a corridor line's bounding box and its feature index.
type LineEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Spatial index over projected corridor lines.
struct CorridorIndex<'a> {
    tree: RTree<LineEnvelope>,
    lines: &'a [LineString<f64>],
}

impl<'a> CorridorIndex<'a> {
    fn new(lines: &'a [LineString<f64>]) -> Self {
        let entries = lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                let rect = line.bounding_rect()?;
                let envelope = Rectangle::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                Some(GeomWithData::new(envelope, i))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
            lines,
        }
    }

    /// Indices of lines within `threshold` metres of `p`, ascending.
    fn within(&self, p: &Point<f64>, threshold: f64) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [p.x() - threshold, p.y() - threshold],
            [p.x() + threshold, p.y() + threshold],
        );

        let mut hits: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data)
            .filter(|&i| distance_to_line(p, &self.lines[i]) <= threshold)
            .collect();
        hits.sort_unstable();
        hits
    }
}

fn distance_to_line(p: &Point<f64>, line: &LineString<f64>) -> f64 {
    match line.closest_point(p) {
        Closest::Intersection(q) | Closest::SinglePoint(q) => Euclidean.distance(*p, q),
        Closest::Indeterminate => f64::INFINITY,
    }
}

/// Stops matched to one corridor.
struct CorridorStops<'a> {
    /// Feature used to order the stops along the corridor.
    reference: usize,
    /// Stop name to stop index. Later duplicates replace earlier ones.
    stops: BTreeMap<&'a str, usize>,
}

/// Build the transit graph.
///
/// Pure function of its inputs: the same features and parameters always
/// give the same nodes, edges and costs.
pub fn build_graph(
    stops: &[StopFeature],
    corridors: &[CorridorFeature],
    params: &GraphParams,
) -> Result<TransitGraph, BuildError> {
    params.validate()?;

    let named: Vec<(&str, Point<f64>)> = stops
        .iter()
        .filter_map(|s| s.usable_name().map(|name| (name, s.location)))
        .collect();
    if named.is_empty() {
        return Err(BuildError::NoStops);
    }

    let projection = LocalProjection::centred_on(named.iter().map(|(_, p)| *p))?;
    let stop_points = named
        .iter()
        .map(|(_, p)| projection.project_point(*p))
        .collect::<Result<Vec<_>, _>>()?;
    let lines = corridors
        .iter()
        .map(|c| projection.project_line(&c.line))
        .collect::<Result<Vec<_>, _>>()?;
    let index = CorridorIndex::new(&lines);

    let mut served: BTreeMap<&CorridorId, CorridorStops<'_>> = BTreeMap::new();
    for (stop_idx, (name, _)) in named.iter().enumerate() {
        for feature in index.within(&stop_points[stop_idx], params.snap_threshold_m) {
            let corridor = &corridors[feature].corridor;
            served
                .entry(corridor)
                .or_insert_with(|| CorridorStops {
                    reference: feature,
                    stops: BTreeMap::new(),
                })
                .stops
                .insert(*name, stop_idx);
        }
    }

    let mut graph = TransitGraph::new();
    let mut stop_corridors: BTreeMap<&str, BTreeSet<&CorridorId>> = BTreeMap::new();

    for (corridor, matched) in &served {
        if matched.stops.len() < 2 {
            trace!(%corridor, "skipping corridor with a single stop");
            continue;
        }

        let reference = &lines[matched.reference];
        let mut ordered: Vec<(f64, &str, usize)> = matched
            .stops
            .iter()
            .map(|(&name, &stop_idx)| {
                let fraction = reference
                    .line_locate_point(&stop_points[stop_idx])
                    .unwrap_or(0.0);
                (fraction, name, stop_idx)
            })
            .collect();
        ordered.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        for pair in ordered.windows(2) {
            let (_, from_name, from_idx) = pair[0];
            let (_, to_name, to_idx) = pair[1];
            let distance_km = Haversine.distance(named[from_idx].1, named[to_idx].1) / 1000.0;
            let time_hours = params.travel_time_hours(distance_km);

            graph.add_travel(
                &Node::new(from_name, (*corridor).clone()),
                &Node::new(to_name, (*corridor).clone()),
                time_hours,
                distance_km,
            );
        }

        for &(_, name, _) in &ordered {
            stop_corridors.entry(name).or_default().insert(*corridor);
        }
    }

    let transfer_hours = params.transfer_time_hours();
    let mut transfer_stops = 0usize;
    for (stop, corridors_here) in &stop_corridors {
        if corridors_here.len() < 2 {
            continue;
        }
        transfer_stops += 1;
        let ids: Vec<&CorridorId> = corridors_here.iter().copied().collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                graph.add_transfer(
                    &Node::new(*stop, (*a).clone()),
                    &Node::new(*stop, (*b).clone()),
                    transfer_hours,
                );
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        corridors = served.len(),
        transfer_stops,
        "built transit graph"
    );

    Ok(graph)
}
