//! Graph build parameters and time-of-day profiles.

use crate::domain::Departure;

use super::BuildError;

/// Parameters controlling edge costs and stop snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphParams {
    /// Average bus speed between stops (km/h).
    pub avg_speed_kmh: f64,

    /// Top speed. Validated but not used in edge costs.
    pub max_speed_kmh: f64,

    /// Time to change corridor at a stop (minutes).
    pub transfer_minutes: f64,

    /// Time spent at each stop (seconds).
    pub dwell_seconds: f64,

    /// Traffic delay per kilometre travelled (seconds).
    pub delay_per_km_seconds: f64,

    /// Stops further than this from a corridor line are not on it (metres).
    pub snap_threshold_m: f64,
}

impl GraphParams {
    /// Create parameters with the default snap threshold and top speed.
    pub fn new(
        avg_speed_kmh: f64,
        transfer_minutes: f64,
        dwell_seconds: f64,
        delay_per_km_seconds: f64,
    ) -> Self {
        Self {
            avg_speed_kmh,
            transfer_minutes,
            dwell_seconds,
            delay_per_km_seconds,
            ..Self::default()
        }
    }

    /// Check every parameter is finite and in range.
    pub fn validate(&self) -> Result<(), BuildError> {
        let positive = [
            ("avg_speed_kmh", self.avg_speed_kmh),
            ("max_speed_kmh", self.max_speed_kmh),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BuildError::InvalidParameter { name, value });
            }
        }

        let non_negative = [
            ("transfer_minutes", self.transfer_minutes),
            ("dwell_seconds", self.dwell_seconds),
            ("delay_per_km_seconds", self.delay_per_km_seconds),
            ("snap_threshold_m", self.snap_threshold_m),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(BuildError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }

    /// Hours to ride `distance_km` between two adjacent stops.
    pub fn travel_time_hours(&self, distance_km: f64) -> f64 {
        distance_km / self.avg_speed_kmh
            + self.dwell_seconds / 3600.0
            + distance_km * self.delay_per_km_seconds / 3600.0
    }

    /// Hours to change corridor.
    pub fn transfer_time_hours(&self) -> f64 {
        self.transfer_minutes / 60.0
    }

    /// Exact bit pattern of every field, for use as a cache key.
    pub fn cache_key(&self) -> [u64; 6] {
        [
            self.avg_speed_kmh.to_bits(),
            self.max_speed_kmh.to_bits(),
            self.transfer_minutes.to_bits(),
            self.dwell_seconds.to_bits(),
            self.delay_per_km_seconds.to_bits(),
            self.snap_threshold_m.to_bits(),
        ]
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            avg_speed_kmh: 25.0,
            max_speed_kmh: 50.0,
            transfer_minutes: 5.0,
            dwell_seconds: 30.0,
            delay_per_km_seconds: 15.0,
            snap_threshold_m: 500.0,
        }
    }
}

/// Traffic conditions by time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeProfile {
    Peak,
    Normal,
}

impl TimeProfile {
    pub fn for_departure(departure: &Departure) -> Self {
        if departure.is_peak() {
            Self::Peak
        } else {
            Self::Normal
        }
    }

    /// Build parameters for this profile.
    ///
    /// Rush hour is slower with longer dwells and delays, but transfers are
    /// quicker because buses come more often.
    pub fn params(self) -> GraphParams {
        match self {
            Self::Peak => GraphParams::new(15.0, 5.0, 60.0, 45.0),
            Self::Normal => GraphParams::new(20.0, 10.0, 45.0, 30.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Peak => "peak",
            Self::Normal => "normal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = GraphParams::default();
        assert_eq!(p.avg_speed_kmh, 25.0);
        assert_eq!(p.max_speed_kmh, 50.0);
        assert_eq!(p.transfer_minutes, 5.0);
        assert_eq!(p.dwell_seconds, 30.0);
        assert_eq!(p.delay_per_km_seconds, 15.0);
        assert_eq!(p.snap_threshold_m, 500.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn travel_time_formula() {
        let p = GraphParams::new(20.0, 5.0, 36.0, 18.0);
        // 2 km: 0.1 h riding + 0.01 h dwell + 0.01 h delay
        let t = p.travel_time_hours(2.0);
        assert!((t - 0.12).abs() < 1e-12);
        assert!((p.transfer_time_hours() - 5.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut p = GraphParams::default();
        p.avg_speed_kmh = 0.0;
        assert!(matches!(
            p.validate(),
            Err(BuildError::InvalidParameter {
                name: "avg_speed_kmh",
                ..
            })
        ));

        let mut p = GraphParams::default();
        p.dwell_seconds = -1.0;
        assert!(p.validate().is_err());

        let mut p = GraphParams::default();
        p.snap_threshold_m = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn profiles() {
        let peak = Departure::parse_hhmm("08:00").unwrap();
        let normal = Departure::parse_hhmm("13:00").unwrap();
        assert_eq!(TimeProfile::for_departure(&peak), TimeProfile::Peak);
        assert_eq!(TimeProfile::for_departure(&normal), TimeProfile::Normal);

        let p = TimeProfile::Peak.params();
        assert_eq!(
            (p.avg_speed_kmh, p.transfer_minutes, p.dwell_seconds, p.delay_per_km_seconds),
            (15.0, 5.0, 60.0, 45.0)
        );
        let p = TimeProfile::Normal.params();
        assert_eq!(
            (p.avg_speed_kmh, p.transfer_minutes, p.dwell_seconds, p.delay_per_km_seconds),
            (20.0, 10.0, 45.0, 30.0)
        );
        assert_eq!(p.snap_threshold_m, 500.0);
    }

    #[test]
    fn cache_key_distinguishes_params() {
        let a = TimeProfile::Peak.params();
        let b = TimeProfile::Normal.params();
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), TimeProfile::Peak.params().cache_key());
    }
}
