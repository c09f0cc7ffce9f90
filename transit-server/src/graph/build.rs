//! Route graph construction.
//!
//! Nodes are stop ids; edges connect consecutive stops of the same
//! route, weighted by real haversine distance. One-way routes get
//! forward edges only, bidirectional routes get both directions.
//! Construction cost is O(total stop-route memberships).
//!
//! A corrupt route never aborts the build: it is skipped, warned about
//! and counted in `GraphStats`.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::{Route, RouteId, Stop, StopId};
use crate::feed::FeedSnapshot;
use crate::geo::haversine_km;

/// A directed edge: ride `route` from the owning stop to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: StopId,
    pub route: RouteId,
    pub distance_km: f64,
}

/// Counters from one build, surfaced in logs and the rebuild endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub stops: usize,
    pub routes: usize,
    pub routes_skipped: usize,
    pub edges: usize,
}

/// The derived search structure. Immutable once built; any number of
/// concurrent searches may read one instance without locking.
#[derive(Debug, Default)]
pub struct RouteGraph {
    stops: HashMap<StopId, Stop>,
    routes: HashMap<RouteId, Route>,
    /// stop id → every (route, position) membership of that stop.
    stop_routes: HashMap<StopId, Vec<(RouteId, usize)>>,
    /// stop id → outgoing edges.
    edges: HashMap<StopId, Vec<Edge>>,
    stats: GraphStats,
}

impl RouteGraph {
    /// Build from a validated feed snapshot.
    pub fn build(snapshot: &FeedSnapshot) -> Self {
        let stops: HashMap<StopId, Stop> =
            snapshot.stops.iter().map(|s| (s.id, s.clone())).collect();

        let mut routes = HashMap::new();
        let mut stop_routes: HashMap<StopId, Vec<(RouteId, usize)>> = HashMap::new();
        let mut edges: HashMap<StopId, Vec<Edge>> = HashMap::new();
        let mut routes_skipped = 0usize;
        let mut edge_count = 0usize;

        for route in &snapshot.routes {
            // A route referencing a stop the approved set doesn't contain
            // is unusable as stored; skip it whole rather than guessing at
            // a partial traversal.
            if let Some(missing) = route.stops().iter().find(|id| !stops.contains_key(id)) {
                warn!(
                    route_id = %route.id,
                    stop_id = %missing,
                    "skipping route referencing unknown or unapproved stop"
                );
                routes_skipped += 1;
                continue;
            }

            for (pos, &stop_id) in route.stops().iter().enumerate() {
                stop_routes
                    .entry(stop_id)
                    .or_default()
                    .push((route.id, pos));
            }

            for pair in route.stops().windows(2) {
                let (from, to) = (pair[0], pair[1]);
                let distance_km =
                    haversine_km(stops[&from].position, stops[&to].position);

                edges.entry(from).or_default().push(Edge {
                    to,
                    route: route.id,
                    distance_km,
                });
                edge_count += 1;

                if route.bidirectional {
                    edges.entry(to).or_default().push(Edge {
                        to: from,
                        route: route.id,
                        distance_km,
                    });
                    edge_count += 1;
                }
            }

            routes.insert(route.id, route.clone());
        }

        // Deterministic membership order regardless of feed row order.
        for memberships in stop_routes.values_mut() {
            memberships.sort();
        }
        for outgoing in edges.values_mut() {
            outgoing.sort_by(|a, b| (a.route, a.to).cmp(&(b.route, b.to)));
        }

        let stats = GraphStats {
            stops: stops.len(),
            routes: routes.len(),
            routes_skipped,
            edges: edge_count,
        };
        info!(
            stops = stats.stops,
            routes = stats.routes,
            skipped = stats.routes_skipped,
            edges = stats.edges,
            "route graph built"
        );

        Self {
            stops,
            routes,
            stop_routes,
            edges,
            stats,
        }
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    /// Look up a route by id.
    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    /// Every (route, position) pair passing through a stop.
    pub fn routes_through(&self, stop: StopId) -> &[(RouteId, usize)] {
        self.stop_routes.get(&stop).map_or(&[], Vec::as_slice)
    }

    /// Outgoing edges of a stop.
    pub fn neighbors(&self, stop: StopId) -> &[Edge] {
        self.edges.get(&stop).map_or(&[], Vec::as_slice)
    }

    /// Whether the stop exists in the approved corpus.
    pub fn contains_stop(&self, id: StopId) -> bool {
        self.stops.contains_key(&id)
    }

    /// Whether any route passes through the stop.
    pub fn participates(&self, id: StopId) -> bool {
        self.stop_routes.contains_key(&id)
    }

    /// All stops in the corpus, in no particular order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// Real travel distance along `route` between two positions,
    /// summing the haversine length of every intermediate hop.
    ///
    /// Positions may be given in either order; the distance is the same.
    pub fn ride_distance_km(&self, route: &Route, from_pos: usize, to_pos: usize) -> f64 {
        let (lo, hi) = (from_pos.min(to_pos), from_pos.max(to_pos));
        route.stops()[lo..hi]
            .iter()
            .zip(&route.stops()[lo + 1..=hi])
            .map(|(&a, &b)| haversine_km(self.stops[&a].position, self.stops[&b].position))
            .sum()
    }

    /// Build counters.
    pub fn stats(&self) -> GraphStats {
        self.stats
    }
}
