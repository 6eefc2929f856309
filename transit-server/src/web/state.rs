//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedNetwork;
use crate::planner::{JourneyConfig, SlimeConfig};
use crate::stops::StopDirectory;

/// Shared application state.
///
/// Everything here is read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    /// Datasets and built graphs
    pub network: Arc<CachedNetwork>,

    /// Stop names and coordinates
    pub directory: Arc<StopDirectory>,

    /// Metaheuristic settings
    pub slime: Arc<SlimeConfig>,

    /// Walking and congestion settings
    pub journey: Arc<JourneyConfig>,
}

impl AppState {
    pub fn new(network: CachedNetwork, slime: SlimeConfig, journey: JourneyConfig) -> Self {
        let directory = StopDirectory::from_features(network.stops());
        Self {
            network: Arc::new(network),
            directory: Arc::new(directory),
            slime: Arc::new(slime),
            journey: Arc::new(journey),
        }
    }
}
