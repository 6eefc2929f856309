//! Route results and the rider-facing itinerary.

use geo::Coord;

use super::{CorridorId, Node};

/// A ride along one corridor without changing.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSegment {
    pub corridor: CorridorId,
    /// Boarding stop.
    pub from: String,
    /// Alighting stop.
    pub to: String,
    /// Stops passed between boarding and alighting.
    pub via: Vec<String>,
    /// Boarding stop coordinate, filled in by the geometry projector.
    pub from_coord: Option<Coord<f64>>,
    /// Alighting stop coordinate, filled in by the geometry projector.
    pub to_coord: Option<Coord<f64>>,
}

impl TravelSegment {
    pub fn new(corridor: CorridorId, from: impl Into<String>) -> Self {
        let from = from.into();
        Self {
            corridor,
            to: from.clone(),
            from,
            via: Vec::new(),
            from_coord: None,
            to_coord: None,
        }
    }

    /// Number of stops visited, boarding and alighting included.
    pub fn stop_count(&self) -> usize {
        self.via.len() + 2
    }
}

/// A change of corridor at one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferStep {
    pub stop: String,
    pub from_corridor: CorridorId,
    pub to_corridor: CorridorId,
    /// Marker position, filled in by the geometry projector.
    pub coord: Option<Coord<f64>>,
}

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum ItineraryStep {
    Travel(TravelSegment),
    Transfer(TransferStep),
}

impl ItineraryStep {
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer(_))
    }
}

/// A solved route.
///
/// Both solvers return this shape so their answers can be compared.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    /// Visited nodes in order.
    pub path: Vec<Node>,
    pub itinerary: Vec<ItineraryStep>,
    pub total_time_hours: f64,
    pub total_distance_km: f64,
    /// Number of changes between different corridors.
    pub transit_count: u32,
    /// Objective value of `path` under the weights used to solve.
    pub cost: f64,
    /// Polyline for display, `(lon, lat)` order.
    pub display_coordinates: Vec<Coord<f64>>,
    /// Set when geometry stitching failed and straight lines were used.
    pub projection_fallback: Option<String>,
}

impl RouteResult {
    /// Stop name of the first node.
    pub fn origin_stop(&self) -> Option<&str> {
        self.path.first().map(Node::stop)
    }

    /// Stop name of the last node.
    pub fn destination_stop(&self) -> Option<&str> {
        self.path.last().map(Node::stop)
    }

    /// Travel time in whole minutes, rounded.
    pub fn total_time_minutes(&self) -> f64 {
        (self.total_time_hours * 60.0).round()
    }
}
