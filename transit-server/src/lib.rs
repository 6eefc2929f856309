//! Corridor transit route optimizer.
//!
//! Builds a multi-corridor transit graph from stop points and corridor
//! polylines, then finds routes that trade off travel time, fare and
//! transfers, either exactly with an integer program or approximately with
//! a slime-mould metaheuristic.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod network;
pub mod planner;
pub mod stops;
pub mod walkable;
pub mod web;
