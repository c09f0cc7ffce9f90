//! Walking segment composition.
//!
//! When the rider's real coordinates differ from the chosen boarding or
//! alighting stop, the itinerary gets a walking leg at that end. Legs
//! below the negligible-distance threshold are omitted so riders don't
//! see zero-minute instructions.
//!
//! The straight-line haversine estimate is the source of truth for
//! routing; the optional OSRM client in [`osrm`] only refines the
//! numbers for display and falls back silently.

pub mod osrm;

use crate::domain::WalkLeg;
use crate::geo::{Point, haversine_km};

/// Parameters for walking-leg composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    /// Average walking speed used for ETA conversion.
    pub speed_kmh: f64,
    /// Walks shorter than this are dropped (20 m by default).
    pub min_walk_km: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            speed_kmh: 5.0,
            min_walk_km: 0.02,
        }
    }
}

/// Compose a walking leg from the rider's position to a stop, or `None`
/// when the distance is negligible.
pub fn compose_walk(
    params: WalkParams,
    from: Point,
    to: Point,
    to_name: &str,
) -> Option<WalkLeg> {
    let distance_km = haversine_km(from, to);
    if distance_km < params.min_walk_km {
        return None;
    }
    Some(WalkLeg {
        from,
        to,
        to_name: to_name.to_string(),
        distance_km,
        eta_minutes: distance_km / params.speed_kmh * 60.0,
    })
}
