//! Nearest-stop search.
//!
//! Resolves raw coordinates to usable stops: a bounding-box pre-filter
//! discards most of the corpus cheaply, then exact haversine distances
//! rank what remains. An empty result is a normal outcome — the caller
//! decides whether it constitutes failure.

use crate::domain::Stop;
use crate::geo::{BoundingBox, Point, haversine_km};
use crate::graph::RouteGraph;

/// A stop found near a queried point.
#[derive(Debug, Clone, Copy)]
pub struct Nearby<'g> {
    pub stop: &'g Stop,
    pub distance_km: f64,
}

/// Approved stops within `radius_km` of `origin`, nearest first,
/// capped at `limit`. Equidistant stops order by ascending id so the
/// result is deterministic.
pub fn nearest_stops(
    graph: &RouteGraph,
    origin: Point,
    radius_km: f64,
    limit: usize,
) -> Vec<Nearby<'_>> {
    collect_nearest(graph, origin, radius_km, limit, |_| true)
}

/// Like [`nearest_stops`], but restricted to stops some route actually
/// passes through. Used to resolve trip endpoints: an isolated landmark
/// is a fine search result but a useless boarding point.
pub fn nearest_connected_stops(
    graph: &RouteGraph,
    origin: Point,
    radius_km: f64,
    limit: usize,
) -> Vec<Nearby<'_>> {
    collect_nearest(graph, origin, radius_km, limit, |stop| {
        graph.participates(stop.id)
    })
}

fn collect_nearest<'g>(
    graph: &'g RouteGraph,
    origin: Point,
    radius_km: f64,
    limit: usize,
    keep: impl Fn(&Stop) -> bool,
) -> Vec<Nearby<'g>> {
    let bbox = BoundingBox::around(origin, radius_km);

    let mut found: Vec<Nearby<'g>> = graph
        .stops()
        .filter(|stop| bbox.contains(stop.position))
        .filter(|stop| keep(stop))
        .filter_map(|stop| {
            let distance_km = haversine_km(origin, stop.position);
            (distance_km <= radius_km).then_some(Nearby { stop, distance_km })
        })
        .collect();

    found.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then(a.stop.id.cmp(&b.stop.id))
    });
    found.truncate(limit);
    found
}
