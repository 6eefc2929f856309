//! Local metric projection.
//!
//! Snapping compares distances in metres. Stops and corridor lines are
//! projected onto a plane tangent at the centroid of the stops
//! (equirectangular), which keeps distances accurate to well under a
//! percent across a city-sized network.

use geo::{Coord, LineString, Point};

use super::BuildError;

/// Mean earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Equirectangular projection around a fixed origin.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjection {
    origin: Coord<f64>,
    cos_lat: f64,
}

impl LocalProjection {
    /// Centre the projection on the mean of `points`.
    ///
    /// Fails with [`BuildError::NoStops`] if there are no points, or with
    /// [`BuildError::Projection`] if any point is not a valid lon/lat.
    pub fn centred_on(points: impl IntoIterator<Item = Point<f64>>) -> Result<Self, BuildError> {
        let mut sum = Coord { x: 0.0, y: 0.0 };
        let mut count = 0usize;
        for p in points {
            check(p.0)?;
            sum.x += p.x();
            sum.y += p.y();
            count += 1;
        }
        if count == 0 {
            return Err(BuildError::NoStops);
        }

        let origin = Coord {
            x: sum.x / count as f64,
            y: sum.y / count as f64,
        };
        Ok(Self {
            origin,
            cos_lat: origin.y.to_radians().cos(),
        })
    }

    /// Project one lon/lat coordinate to metres east/north of the origin.
    pub fn project(&self, c: Coord<f64>) -> Result<Coord<f64>, BuildError> {
        check(c)?;
        Ok(Coord {
            x: EARTH_RADIUS_M * (c.x - self.origin.x).to_radians() * self.cos_lat,
            y: EARTH_RADIUS_M * (c.y - self.origin.y).to_radians(),
        })
    }

    pub fn project_point(&self, p: Point<f64>) -> Result<Point<f64>, BuildError> {
        self.project(p.0).map(Point)
    }

    pub fn project_line(&self, line: &LineString<f64>) -> Result<LineString<f64>, BuildError> {
        let coords = line
            .coords()
            .map(|c| self.project(*c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LineString::new(coords))
    }
}

fn check(c: Coord<f64>) -> Result<(), BuildError> {
    let valid = c.x.is_finite() && c.y.is_finite() && c.x.abs() <= 180.0 && c.y.abs() <= 90.0;
    if valid {
        Ok(())
    } else {
        Err(BuildError::Projection { lon: c.x, lat: c.y })
    }
}
