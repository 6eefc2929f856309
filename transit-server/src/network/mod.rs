//! The transit network: graph construction, edge costs and shortest paths.
//!
//! A graph is built once per [`GraphParams`] and shared read-only by every
//! solver that runs against it.

mod builder;
mod cost;
mod error;
mod graph;
mod params;
mod projection;
mod shortest;

pub use builder::build_graph;
pub use cost::{edge_cost, path_cost, transit_increment};
pub use error::BuildError;
pub use graph::{EdgeKind, TransitEdge, TransitGraph};
pub use params::{GraphParams, TimeProfile};
pub use projection::LocalProjection;
pub use shortest::{fastest_path, random_path, random_weights, shortest_path};
