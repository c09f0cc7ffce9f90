//! The planning pipeline.
//!
//! `plan` resolves both endpoints to boardable stops, attempts the
//! single-route case over every candidate pairing, falls back to the
//! bounded transfer search on the nearest pairing, then prices the
//! result and attaches the walking legs. All failure modes are explicit
//! variants of [`PlanError`]; riders asking for impossible trips is a
//! normal outcome, not an exception.

use thiserror::Error;

use crate::domain::{
    DomainError, Itinerary, PassengerClass, RideLeg, RouteId, StopId, WalkingLegs,
};
use crate::fare::FareSchedule;
use crate::geo::Point;
use crate::graph::RouteGraph;
use crate::locator::nearest_connected_stops;
use crate::walking::compose_walk;

use super::{SearchConfig, find_direct, find_transfer_path};

/// A trip endpoint as given by the rider: a known stop or raw
/// coordinates to resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationRef {
    Stop(StopId),
    Coord(Point),
}

/// A planning query.
///
/// `user_origin` and `user_destination` optionally give the rider's
/// real position when the endpoint itself is a stop id; walking legs
/// are then measured from there instead of from the stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub origin: LocationRef,
    pub destination: LocationRef,
    pub passenger: PassengerClass,
    pub user_origin: Option<Point>,
    pub user_destination: Option<Point>,
}

/// Why a plan could not be produced.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("no approved route data is loaded")]
    DataUnavailable,

    #[error("{0}")]
    InvalidInput(String),

    #[error("no boardable stop near the queried point")]
    NoNearbyStop,

    #[error("no route connects the endpoints within the transfer limit")]
    RouteNotFound,

    #[error("itinerary assembly failed: {0}")]
    Assembly(#[from] DomainError),
}

/// A resolved endpoint: the rider's real position plus the boardable
/// stops it may map to, nearest first.
struct Endpoint {
    point: Point,
    candidates: Vec<Candidate>,
}

#[derive(Clone, Copy)]
struct Candidate {
    stop: StopId,
    walk_km: f64,
}

/// Produce an itinerary for the request, or the specific reason none
/// exists.
pub fn plan(
    graph: &RouteGraph,
    config: &SearchConfig,
    schedule: &FareSchedule,
    request: &PlanRequest,
) -> Result<Itinerary, PlanError> {
    if graph.stats().routes == 0 {
        return Err(PlanError::DataUnavailable);
    }

    let mut origin = resolve(graph, config, request.origin, "origin")?;
    let mut destination = resolve(graph, config, request.destination, "destination")?;
    if let Some(p) = request.user_origin {
        origin.point = p;
    }
    if let Some(p) = request.user_destination {
        destination.point = p;
    }

    // Candidate pairings, cheapest combined walk first. Identical stops
    // are not a trip.
    let mut pairs: Vec<(Candidate, Candidate)> = Vec::new();
    for &o in &origin.candidates {
        for &d in &destination.candidates {
            if o.stop != d.stop {
                pairs.push((o, d));
            }
        }
    }
    if pairs.is_empty() {
        return Err(PlanError::InvalidInput(
            "origin and destination resolve to the same stop".into(),
        ));
    }
    pairs.sort_by(|a, b| {
        (a.0.walk_km + a.1.walk_km)
            .total_cmp(&(b.0.walk_km + b.1.walk_km))
            .then(a.0.stop.cmp(&b.0.stop))
            .then(a.1.stop.cmp(&b.1.stop))
    });

    for &(o, d) in &pairs {
        if let Some(m) = find_direct(graph, o.stop, d.stop) {
            let leg = ride_leg(graph, config, m.route_id, o.stop, d.stop, m.distance_km)
                .ok_or(PlanError::RouteNotFound)?;
            return assemble(graph, config, schedule, request.passenger, &origin, &destination, vec![leg]);
        }
    }

    // No single route works anywhere; search from the nearest pairing.
    let (o, d) = pairs[0];
    let segments =
        find_transfer_path(graph, config, o.stop, d.stop).ok_or(PlanError::RouteNotFound)?;
    let legs: Vec<RideLeg> = segments
        .iter()
        .map(|s| ride_leg(graph, config, s.route, s.board, s.alight, s.distance_km))
        .collect::<Option<_>>()
        .ok_or(PlanError::RouteNotFound)?;

    assemble(graph, config, schedule, request.passenger, &origin, &destination, legs)
}

fn resolve(
    graph: &RouteGraph,
    config: &SearchConfig,
    location: LocationRef,
    which: &str,
) -> Result<Endpoint, PlanError> {
    match location {
        LocationRef::Stop(id) => {
            let stop = graph.stop(id).ok_or_else(|| {
                PlanError::InvalidInput(format!("unknown {which} stop id {id}"))
            })?;
            Ok(Endpoint {
                point: stop.position,
                candidates: vec![Candidate {
                    stop: id,
                    walk_km: 0.0,
                }],
            })
        }
        LocationRef::Coord(point) => {
            let found = nearest_connected_stops(
                graph,
                point,
                config.nearest_radius_km,
                config.nearest_limit,
            );
            if found.is_empty() {
                return Err(PlanError::NoNearbyStop);
            }
            Ok(Endpoint {
                point,
                candidates: found
                    .into_iter()
                    .map(|n| Candidate {
                        stop: n.stop.id,
                        walk_km: n.distance_km,
                    })
                    .collect(),
            })
        }
    }
}

fn ride_leg(
    graph: &RouteGraph,
    config: &SearchConfig,
    route_id: RouteId,
    board: StopId,
    alight: StopId,
    distance_km: f64,
) -> Option<RideLeg> {
    let route = graph.route(route_id)?;
    let board_stop = graph.stop(board)?;
    let alight_stop = graph.stop(alight)?;
    Some(RideLeg {
        route_id,
        route_name: route.name.clone(),
        board_stop_id: board,
        board_stop_name: board_stop.name.clone(),
        alight_stop_id: alight,
        alight_stop_name: alight_stop.name.clone(),
        distance_km,
        eta_minutes: config.ride_minutes(distance_km),
    })
}

fn assemble(
    graph: &RouteGraph,
    config: &SearchConfig,
    schedule: &FareSchedule,
    passenger: PassengerClass,
    origin: &Endpoint,
    destination: &Endpoint,
    legs: Vec<RideLeg>,
) -> Result<Itinerary, PlanError> {
    let first = &legs[0];
    let last = &legs[legs.len() - 1];
    let board = graph.stop(first.board_stop_id).ok_or(PlanError::RouteNotFound)?;
    let alight = graph.stop(last.alight_stop_id).ok_or(PlanError::RouteNotFound)?;

    let walking = WalkingLegs {
        before: compose_walk(config.walk, origin.point, board.position, &board.name),
        after: compose_walk(config.walk, alight.position, destination.point, "destination"),
    };

    // Each boarding is priced as its own ride.
    let total_fare: f64 = legs
        .iter()
        .map(|l| schedule.fare(l.distance_km, passenger))
        .sum();
    let ride_km: f64 = legs.iter().map(|l| l.distance_km).sum();

    let itinerary = Itinerary::new(legs, walking, total_fare)?
        .with_carbon_saved(schedule.carbon_saved_kg(ride_km));
    Ok(itinerary)
}
