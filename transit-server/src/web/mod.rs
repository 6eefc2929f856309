//! Web layer for the route optimizer.
//!
//! JSON endpoints for stop search, journey planning and solver comparison.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
