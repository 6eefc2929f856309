//! Display geometry for a route.
//!
//! Each ride is drawn along its corridor polyline, cut between the
//! vertices nearest the boarding and alighting stops. Transfers add a
//! single marker point. If stitching fails the route is drawn as straight
//! lines between its stops instead; the failure is reported, never raised.

use geo::{Coord, Distance, Haversine, LineString, Point};
use tracing::warn;

use crate::domain::{CorridorFeature, CorridorId, ItineraryStep, Node};
use crate::stops::StopDirectory;

/// Why corridor geometry could not be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// A polyline vertex is NaN or infinite.
    #[error("corridor {corridor} has a non-finite vertex")]
    InvalidVertex { corridor: CorridorId },
}

/// Stitched coordinates, and the stitching error if the fallback was used.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub coordinates: Vec<Coord<f64>>,
    pub fallback: Option<ProjectionError>,
}

/// Draws itineraries using stop coordinates and corridor polylines.
pub struct GeometryProjector<'a> {
    directory: &'a StopDirectory,
    corridors: &'a [CorridorFeature],
}

impl<'a> GeometryProjector<'a> {
    pub fn new(directory: &'a StopDirectory, corridors: &'a [CorridorFeature]) -> Self {
        Self {
            directory,
            corridors,
        }
    }

    /// Draw the route. Fills in step coordinates as a side effect.
    pub fn project(&self, steps: &mut [ItineraryStep], path: &[Node]) -> Projection {
        match self.stitch(steps) {
            Ok(coordinates) => Projection {
                coordinates,
                fallback: None,
            },
            Err(e) => {
                warn!(error = %e, "geometry stitching failed, drawing straight lines");
                Projection {
                    coordinates: self.straight_lines(path),
                    fallback: Some(e),
                }
            }
        }
    }

    fn stitch(&self, steps: &mut [ItineraryStep]) -> Result<Vec<Coord<f64>>, ProjectionError> {
        let mut coords = Vec::new();

        for step in steps.iter_mut() {
            match step {
                ItineraryStep::Travel(segment) => {
                    let start = self.directory.coord(&segment.from);
                    let end = self.directory.coord(&segment.to);
                    segment.from_coord = start.map(|p| p.0);
                    segment.to_coord = end.map(|p| p.0);

                    let (Some(start), Some(end)) = (start, end) else {
                        for p in start.into_iter().chain(end) {
                            push_distinct(&mut coords, p.0);
                        }
                        continue;
                    };

                    match self.corridor_slice(&segment.corridor, start, end)? {
                        Some(slice) => {
                            for c in slice {
                                push_distinct(&mut coords, c);
                            }
                        }
                        None => {
                            push_distinct(&mut coords, start.0);
                            push_distinct(&mut coords, end.0);
                        }
                    }
                }
                ItineraryStep::Transfer(transfer) => {
                    let marker = self.directory.coord(&transfer.stop);
                    transfer.coord = marker.map(|p| p.0);
                    if let Some(p) = marker {
                        push_distinct(&mut coords, p.0);
                    }
                }
            }
        }

        Ok(coords)
    }

    /// The part of the first non-empty polyline of `corridor` between the
    /// vertices nearest `start` and `end`, in travel order.
    fn corridor_slice(
        &self,
        corridor: &CorridorId,
        start: Point<f64>,
        end: Point<f64>,
    ) -> Result<Option<Vec<Coord<f64>>>, ProjectionError> {
        let Some(feature) = self
            .corridors
            .iter()
            .find(|f| &f.corridor == corridor && !f.line.0.is_empty())
        else {
            return Ok(None);
        };

        let line = &feature.line;
        if line.coords().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(ProjectionError::InvalidVertex {
                corridor: corridor.clone(),
            });
        }

        let (Some(i0), Some(i1)) = (nearest_vertex(line, start), nearest_vertex(line, end)) else {
            return Ok(None);
        };

        let slice = if i0 <= i1 {
            line.0[i0..=i1].to_vec()
        } else {
            line.0[i1..=i0].iter().rev().copied().collect()
        };
        Ok(Some(slice))
    }

    /// Straight lines through every node's stop, skipping repeats.
    fn straight_lines(&self, path: &[Node]) -> Vec<Coord<f64>> {
        let mut coords = Vec::new();
        for node in path {
            if let Some(p) = self.directory.coord(node.stop()) {
                push_distinct(&mut coords, p.0);
            }
        }
        coords
    }
}

fn nearest_vertex(line: &LineString<f64>, target: Point<f64>) -> Option<usize> {
    line.0
        .iter()
        .enumerate()
        .map(|(i, c)| (i, Haversine.distance(Point(*c), target)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

fn push_distinct(coords: &mut Vec<Coord<f64>>, c: Coord<f64>) {
    if coords.last() != Some(&c) {
        coords.push(c);
    }
}
