//! Input features: stop points and corridor polylines.
//!
//! These are the two datasets the graph builder consumes. Coordinates are
//! WGS84 longitude/latitude in degrees.

use geo::{Coord, LineString, Point};

use super::CorridorId;

/// A stop location, possibly unnamed.
///
/// Unnamed or blank-named stops are kept here so that loading never
/// silently drops data; the graph builder discards them.
#[derive(Debug, Clone, PartialEq)]
pub struct StopFeature {
    pub name: Option<String>,
    pub location: Point<f64>,
}

impl StopFeature {
    pub fn new(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: Some(name.into()),
            location: Point::new(lon, lat),
        }
    }

    /// An unnamed stop.
    pub fn unnamed(lon: f64, lat: f64) -> Self {
        Self {
            name: None,
            location: Point::new(lon, lat),
        }
    }

    /// The trimmed stop name, or `None` if missing or blank.
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// One polyline of a corridor.
///
/// A corridor may be made of several features (one per direction or
/// branch). Each feature carries the corridor it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorFeature {
    pub corridor: CorridorId,
    pub line: LineString<f64>,
}

impl CorridorFeature {
    /// Build a feature from `(lon, lat)` vertices.
    pub fn new(corridor: CorridorId, vertices: &[(f64, f64)]) -> Self {
        let coords: Vec<Coord<f64>> = vertices.iter().map(|&(x, y)| Coord { x, y }).collect();
        Self {
            corridor,
            line: LineString::new(coords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_name_filters_blank() {
        assert_eq!(StopFeature::new(" Kota ", 106.8, -6.1).usable_name(), Some("Kota"));
        assert_eq!(StopFeature::new("   ", 106.8, -6.1).usable_name(), None);
        assert_eq!(StopFeature::unnamed(106.8, -6.1).usable_name(), None);
    }

    #[test]
    fn corridor_feature_keeps_vertex_order() {
        let id = CorridorId::parse("1").unwrap();
        let feature = CorridorFeature::new(id, &[(106.80, -6.10), (106.81, -6.11)]);

        let coords: Vec<_> = feature.line.coords().map(|c| (c.x, c.y)).collect();
        assert_eq!(coords, vec![(106.80, -6.10), (106.81, -6.11)]);
    }
}
