//! Domain types for the route resolution engine.
//!
//! These are the validated core types. Invariants are enforced at
//! construction time (ordered route stop lists, coordinate ranges,
//! chained itinerary legs), so the algorithms that consume them can
//! trust their validity.

mod error;
mod itinerary;
mod leg;
mod passenger;
mod route;
mod stop;

pub use error::DomainError;
pub use itinerary::{Itinerary, WalkingLegs};
pub use leg::{RideLeg, WalkLeg};
pub use passenger::PassengerClass;
pub use route::{Route, RouteId};
pub use stop::{Stop, StopId, StopKind};
