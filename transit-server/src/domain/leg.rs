//! Itinerary leg types.

use crate::geo::Point;

use super::{RouteId, StopId};

/// One uninterrupted ride on a single route between a board and an
/// alight stop.
#[derive(Debug, Clone, PartialEq)]
pub struct RideLeg {
    pub route_id: RouteId,
    pub route_name: String,
    pub board_stop_id: StopId,
    pub board_stop_name: String,
    pub alight_stop_id: StopId,
    pub alight_stop_name: String,
    pub distance_km: f64,
    pub eta_minutes: f64,
}

/// A walking segment between the rider's real position and a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkLeg {
    pub from: Point,
    pub to: Point,
    pub to_name: String,
    pub distance_km: f64,
    pub eta_minutes: f64,
}
