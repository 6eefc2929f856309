//! Departure time handling: fare rule and peak-hour windows.
//!
//! Riders give a departure as "HH:MM". The time of day decides the flat
//! fare and whether the network runs under peak-hour conditions.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Fare charged for departures in the early-morning window.
pub const EARLY_FARE: u32 = 2000;

/// Fare charged at every other time.
pub const REGULAR_FARE: u32 = 3500;

/// Error returned when parsing an invalid departure time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at which a rider wants to leave.
///
/// # Examples
///
/// ```
/// use transit_server::domain::Departure;
///
/// let dep = Departure::parse_hhmm("06:15").unwrap();
/// assert_eq!(dep.to_string(), "06:15");
/// assert_eq!(dep.fare(), 2000);
///
/// assert!(Departure::parse_hhmm("6.15").is_err());
/// assert!(Departure::parse_hhmm("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Departure(NaiveTime);

impl Departure {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Build from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time in "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hour.len() != 2 || minute.len() != 2 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let hour: u32 = hour
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| TimeError::new("invalid minute digits"))?;

        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Flat fare for this departure.
    pub fn fare(&self) -> u32 {
        base_fare(self.0)
    }

    /// True inside the morning or evening rush windows.
    pub fn is_peak(&self) -> bool {
        is_peak(self.0)
    }
}

impl fmt::Debug for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Departure({})", self)
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Fare for a departure time: the early fare from 05:00 to 07:00
/// inclusive, the regular fare otherwise.
pub fn base_fare(time: NaiveTime) -> u32 {
    if time >= hm(5, 0) && time <= hm(7, 0) {
        EARLY_FARE
    } else {
        REGULAR_FARE
    }
}

/// Rush windows 07:00-09:00 and 17:00-19:00, both ends inclusive.
pub fn is_peak(time: NaiveTime) -> bool {
    let morning = time >= hm(7, 0) && time <= hm(9, 0);
    let evening = time >= hm(17, 0) && time <= hm(19, 0);
    morning || evening
}
