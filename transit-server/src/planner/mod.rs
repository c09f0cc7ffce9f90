//! Route resolution.
//!
//! The pipeline that answers a rider's query: resolve the endpoints to
//! usable stops, try the cheap single-route case, fall back to the
//! bounded transfer search, then price and assemble the itinerary.

mod config;
mod direct;
mod plan;
mod search;

pub use config::SearchConfig;
pub use direct::{DirectMatch, find_direct};
pub use plan::{LocationRef, PlanError, PlanRequest, plan};
pub use search::{RideSegment, find_transfer_path};
