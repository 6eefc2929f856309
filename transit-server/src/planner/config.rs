//! Solver and journey configuration.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::walkable::WalkLimits;

/// Configuration for the slime-mould metaheuristic.
#[derive(Debug, Clone)]
pub struct SlimeConfig {
    /// Number of candidate paths kept in the population.
    pub population_size: usize,

    /// Number of improvement rounds.
    pub iterations: usize,

    /// Chance per member per round of replacing it with a fresh random path.
    pub exploration: f64,

    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SlimeConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(population_size: usize, iterations: usize, exploration: f64) -> Self {
        Self {
            population_size,
            iterations,
            exploration,
            seed: None,
        }
    }

    /// Use a fixed seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A fresh RNG for one solve.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SlimeConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            iterations: 100,
            exploration: 0.03,
            seed: None,
        }
    }
}

/// Configuration for rider-facing journey planning.
#[derive(Debug, Clone)]
pub struct JourneyConfig {
    /// Furthest stop a rider will walk to before boarding (km).
    pub walk_radius_km: f64,

    /// Walking pace (km/h).
    pub walk_speed_kmh: f64,

    /// Multiplier giving the ride time in heavy traffic.
    pub congestion_factor: f64,
}

impl JourneyConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(walk_radius_km: f64, walk_speed_kmh: f64, congestion_factor: f64) -> Self {
        Self {
            walk_radius_km,
            walk_speed_kmh,
            congestion_factor,
        }
    }

    pub fn walk_limits(&self) -> WalkLimits {
        WalkLimits {
            max_distance_km: self.walk_radius_km,
            speed_kmh: self.walk_speed_kmh,
        }
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            walk_radius_km: 1.0,
            walk_speed_kmh: 5.0,
            congestion_factor: 1.8,
        }
    }
}
