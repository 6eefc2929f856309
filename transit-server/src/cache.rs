//! Caching layer for built transit graphs.
//!
//! Building a graph snaps every stop to every corridor, which is far
//! slower than a solve. Graphs only depend on the build parameters, so
//! each parameter set is built once and shared as an `Arc` until it
//! expires.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{CorridorFeature, StopFeature};
use crate::network::{BuildError, GraphParams, TransitGraph, build_graph};

/// Cache key: the bit patterns of the build parameters.
type GraphKey = [u64; 6];

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached graphs.
    pub ttl: Duration,

    /// Maximum number of cached graphs.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 16,
        }
    }
}

/// Why a graph could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum GraphLoadError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("graph build task failed: {0}")]
    Task(String),
}

/// Cache of built graphs keyed by their parameters.
pub struct GraphCache {
    graphs: MokaCache<GraphKey, Arc<TransitGraph>>,
}

impl GraphCache {
    pub fn new(config: &CacheConfig) -> Self {
        let graphs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graphs }
    }

    pub async fn get(&self, params: &GraphParams) -> Option<Arc<TransitGraph>> {
        self.graphs.get(&params.cache_key()).await
    }

    pub async fn insert(&self, params: &GraphParams, graph: Arc<TransitGraph>) {
        self.graphs.insert(params.cache_key(), graph).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.graphs.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.graphs.invalidate_all();
    }
}

/// The loaded datasets plus a cache of graphs built from them.
pub struct CachedNetwork {
    stops: Arc<Vec<StopFeature>>,
    corridors: Arc<Vec<CorridorFeature>>,
    cache: GraphCache,
}

impl CachedNetwork {
    pub fn new(stops: Vec<StopFeature>, corridors: Vec<CorridorFeature>, config: &CacheConfig) -> Self {
        Self {
            stops: Arc::new(stops),
            corridors: Arc::new(corridors),
            cache: GraphCache::new(config),
        }
    }

    pub fn stops(&self) -> &[StopFeature] {
        &self.stops
    }

    pub fn corridors(&self) -> &[CorridorFeature] {
        &self.corridors
    }

    /// The graph for `params`, building it on the blocking pool if it is
    /// not cached.
    pub async fn graph_for(&self, params: &GraphParams) -> Result<Arc<TransitGraph>, GraphLoadError> {
        if let Some(cached) = self.cache.get(params).await {
            return Ok(cached);
        }

        let stops = Arc::clone(&self.stops);
        let corridors = Arc::clone(&self.corridors);
        let build_params = *params;
        let graph = tokio::task::spawn_blocking(move || build_graph(&stops, &corridors, &build_params))
            .await
            .map_err(|e| GraphLoadError::Task(e.to_string()))??;

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph built and cached"
        );

        let graph = Arc::new(graph);
        self.cache.insert(params, Arc::clone(&graph)).await;
        Ok(graph)
    }

    pub fn cached_graph_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
