//! Web layer for the bus journey planner.
//!
//! Provides HTTP endpoints for stop lookups, service ratings and journey
//! planning.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
