//! Objective weights and named route preferences.

use std::fmt;

/// Error returned when a weight component is negative or not finite.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid weight for {component}: {value}")]
pub struct InvalidWeights {
    component: &'static str,
    value: f64,
}

/// Trade-off between travel time, monetary cost and transfers.
///
/// All components are non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    time: f64,
    cost: f64,
    transit: f64,
}

impl Weights {
    /// Create a weight vector, rejecting negative or non-finite components.
    pub fn new(time: f64, cost: f64, transit: f64) -> Result<Self, InvalidWeights> {
        for (component, value) in [("time", time), ("cost", cost), ("transit", transit)] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidWeights { component, value });
            }
        }
        Ok(Self {
            time,
            cost,
            transit,
        })
    }

    /// Weight applied to edge travel time (hours).
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Weight applied to edge monetary cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Weight added once per transfer between different corridors.
    pub fn transit(&self) -> f64 {
        self.transit
    }
}

impl Default for Weights {
    fn default() -> Self {
        Preference::default().weights()
    }
}

/// Named weight presets offered to riders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    /// Avoid changing corridors.
    MinTransit,
    /// Shortest travel time.
    Fastest,
    /// Even split between time and transfers.
    #[default]
    Balanced,
}

impl Preference {
    /// Parse a preference name. Accepts the canonical snake_case names
    /// plus the short aliases used by the rider-facing form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min_transit" | "transit" => Some(Self::MinTransit),
            "fastest" | "cepat" => Some(Self::Fastest),
            "balanced" | "efisien" => Some(Self::Balanced),
            _ => None,
        }
    }

    pub fn weights(self) -> Weights {
        let (time, cost, transit) = match self {
            Self::MinTransit => (0.1, 0.1, 0.8),
            Self::Fastest => (0.8, 0.1, 0.1),
            Self::Balanced => (0.45, 0.1, 0.45),
        };
        Weights {
            time,
            cost,
            transit,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MinTransit => "min_transit",
            Self::Fastest => "fastest",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
