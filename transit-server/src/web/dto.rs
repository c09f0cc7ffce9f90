//! Data transfer objects for web requests and responses.
//!
//! The wire format is camelCase JSON. Trip endpoints accept either a
//! bare stop id or a `{lat, lon}` object, which serde distinguishes via
//! the untagged representation.

use serde::{Deserialize, Serialize};

use crate::domain::{Itinerary, PassengerClass, RideLeg, StopKind, WalkLeg};
use crate::geo::Point;
use crate::graph::GraphStats;
use crate::planner::PlanError;

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripRequest {
    /// Origin: a known stop id or raw coordinates.
    pub origin: LocationDto,

    /// Destination: a known stop id or raw coordinates.
    pub destination: LocationDto,

    /// Fare class; defaults to regular.
    #[serde(default)]
    pub passenger_class: PassengerClass,

    /// Rider's real position, when `origin` is a stop id.
    pub user_origin: Option<CoordDto>,

    /// Rider's real target position, when `destination` is a stop id.
    pub user_destination: Option<CoordDto>,
}

/// A trip endpoint on the wire.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LocationDto {
    Stop(u32),
    Coord(CoordDto),
}

/// A raw coordinate pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordDto {
    pub lat: f64,
    pub lon: f64,
}

/// Successful planning response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripResponse {
    pub success: bool,
    pub legs: Vec<RideLegResult>,
    pub walking: WalkingResult,
    pub total_fare: f64,
    pub total_distance_km: f64,
    pub total_eta_minutes: f64,
    pub carbon_saved_kg: f64,
    pub transfer_count: usize,
}

impl PlanTripResponse {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            success: true,
            legs: itinerary.legs().iter().map(RideLegResult::from_leg).collect(),
            walking: WalkingResult {
                before: itinerary.walking.before.as_ref().map(WalkLegResult::from_leg),
                after: itinerary.walking.after.as_ref().map(WalkLegResult::from_leg),
            },
            total_fare: itinerary.total_fare,
            total_distance_km: itinerary.total_distance_km,
            total_eta_minutes: itinerary.total_eta_minutes,
            carbon_saved_kg: itinerary.carbon_saved_kg,
            transfer_count: itinerary.transfer_count(),
        }
    }
}

/// One ride leg in a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideLegResult {
    pub route_id: u32,
    pub route_name: String,
    pub board_stop_id: u32,
    pub board_stop_name: String,
    pub alight_stop_id: u32,
    pub alight_stop_name: String,
    pub distance_km: f64,
    pub eta_minutes: f64,
}

impl RideLegResult {
    fn from_leg(leg: &RideLeg) -> Self {
        Self {
            route_id: leg.route_id.0,
            route_name: leg.route_name.clone(),
            board_stop_id: leg.board_stop_id.0,
            board_stop_name: leg.board_stop_name.clone(),
            alight_stop_id: leg.alight_stop_id.0,
            alight_stop_name: leg.alight_stop_name.clone(),
            distance_km: leg.distance_km,
            eta_minutes: leg.eta_minutes,
        }
    }
}

/// Walking legs at the ends of the trip. Absent ends are omitted.
#[derive(Debug, Serialize)]
pub struct WalkingResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<WalkLegResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<WalkLegResult>,
}

/// One walking leg in a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkLegResult {
    pub from: Point,
    pub to: Point,
    pub to_name: String,
    pub distance_km: f64,
    pub eta_minutes: f64,
}

impl WalkLegResult {
    fn from_leg(leg: &WalkLeg) -> Self {
        Self {
            from: leg.from,
            to: leg.to,
            to_name: leg.to_name.clone(),
            distance_km: leg.distance_km,
            eta_minutes: leg.eta_minutes,
        }
    }
}

/// Planning failure envelope.
#[derive(Debug, Serialize)]
pub struct PlanFailureResponse {
    pub success: bool,
    pub reason: &'static str,
    pub message: String,
}

impl PlanFailureResponse {
    pub fn from_error(err: &PlanError) -> Self {
        Self {
            success: false,
            reason: reason_code(err),
            message: err.to_string(),
        }
    }
}

/// The stable machine-readable reason for a planning failure.
pub fn reason_code(err: &PlanError) -> &'static str {
    match err {
        PlanError::DataUnavailable => "DATA_UNAVAILABLE",
        PlanError::InvalidInput(_) => "INVALID_INPUT",
        PlanError::NoNearbyStop => "NO_NEARBY_STOP",
        PlanError::RouteNotFound => "ROUTE_NOT_FOUND",
        PlanError::Assembly(_) => "INTERNAL",
    }
}

/// Query for the nearby-stops endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStopsQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: Option<f64>,
    pub limit: Option<usize>,
}

/// One stop in a nearby-stops response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStopResult {
    pub id: u32,
    pub name: String,
    pub kind: StopKind,
    pub lat: f64,
    pub lon: f64,
    pub distance_km: f64,
}

/// Response for the nearby-stops endpoint.
#[derive(Debug, Serialize)]
pub struct NearbyStopsResponse {
    pub stops: Vec<NearbyStopResult>,
}

/// Response for a graph rebuild.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildResponse {
    pub stops: usize,
    pub routes: usize,
    pub routes_skipped: usize,
    pub edges: usize,
}

impl RebuildResponse {
    pub fn from_stats(stats: GraphStats) -> Self {
        Self {
            stops: stats.stops,
            routes: stats.routes,
            routes_skipped: stats.routes_skipped,
            edges: stats.edges,
        }
    }
}

/// Generic error body for non-plan endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
