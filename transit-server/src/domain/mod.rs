//! Domain types for the corridor route optimizer.
//!
//! This module contains the core domain model types: corridor and node
//! identities, input features, objective weights, departure times and the
//! route results both solvers produce. Validating types enforce their
//! invariants at construction time.

mod corridor;
mod features;
mod itinerary;
mod time;
mod weights;

pub use corridor::{CorridorId, InvalidCorridorId, Node};
pub use features::{CorridorFeature, StopFeature};
pub use itinerary::{ItineraryStep, RouteResult, TransferStep, TravelSegment};
pub use time::{Departure, EARLY_FARE, REGULAR_FARE, TimeError, base_fare, is_peak};
pub use weights::{InvalidWeights, Preference, Weights};
