//! Walkable origins.
//!
//! A rider may get a better route by walking to a nearby stop first. This
//! module lists the stops within walking distance of an origin, with the
//! walking time to each.

use geo::{Distance, Haversine};

use crate::stops::StopDirectory;

/// A stop the rider could start from.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkOrigin {
    pub stop: String,
    pub distance_km: f64,
    pub walk_minutes: f64,
}

impl WalkOrigin {
    /// Starting at the requested stop itself.
    pub fn direct(stop: &str) -> Self {
        Self {
            stop: stop.to_string(),
            distance_km: 0.0,
            walk_minutes: 0.0,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.distance_km == 0.0
    }
}

/// Walking radius and pace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkLimits {
    pub max_distance_km: f64,
    pub speed_kmh: f64,
}

impl WalkLimits {
    pub fn minutes_for(&self, distance_km: f64) -> f64 {
        distance_km / self.speed_kmh * 60.0
    }
}

/// The origin itself, then every other stop within the walk radius,
/// nearest first.
///
/// If the origin has no known coordinate only the origin is returned.
pub fn walk_origins(directory: &StopDirectory, origin: &str, limits: &WalkLimits) -> Vec<WalkOrigin> {
    let mut origins = vec![WalkOrigin::direct(origin)];
    let Some(here) = directory.coord(origin) else {
        return origins;
    };

    let mut nearby: Vec<WalkOrigin> = directory
        .names()
        .iter()
        .filter(|name| name.as_str() != origin)
        .filter_map(|name| {
            let there = directory.coord(name)?;
            let distance_km = Haversine.distance(here, there) / 1000.0;
            (distance_km <= limits.max_distance_km).then(|| WalkOrigin {
                stop: name.clone(),
                distance_km,
                walk_minutes: limits.minutes_for(distance_km),
            })
        })
        .collect();
    nearby.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| a.stop.cmp(&b.stop))
    });

    origins.extend(nearby);
    origins
}
