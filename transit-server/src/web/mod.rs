//! Web layer for the route resolution engine.
//!
//! Provides the HTTP endpoints for planning trips, finding nearby
//! stops, and administering the graph snapshot.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
