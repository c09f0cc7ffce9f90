//! Direct-route matching.
//!
//! The common case: origin and destination sit on one route, in a
//! traversable order. Checking this is a small intersection over the
//! graph's stop→route index and must succeed without ever touching the
//! transfer search.

use crate::domain::{RouteId, StopId};
use crate::graph::RouteGraph;

/// A qualifying single-route connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectMatch {
    pub route_id: RouteId,
    pub board_pos: usize,
    pub alight_pos: usize,
    pub distance_km: f64,
}

impl DirectMatch {
    /// Stops ridden through, excluding board and alight.
    pub fn intermediate_stops(&self) -> usize {
        self.board_pos.abs_diff(self.alight_pos).saturating_sub(1)
    }
}

/// Find the best route serving both stops directly.
///
/// A route qualifies when the destination's position is reachable from
/// the origin's position along its allowed direction. Among qualifiers
/// the match with the fewest intermediate stops wins; ties break to the
/// lowest route id for determinism.
pub fn find_direct(graph: &RouteGraph, origin: StopId, destination: StopId) -> Option<DirectMatch> {
    let mut best: Option<DirectMatch> = None;

    for &(route_id, board_pos) in graph.routes_through(origin) {
        let Some(route) = graph.route(route_id) else {
            continue;
        };

        for &(dest_route, alight_pos) in graph.routes_through(destination) {
            if dest_route != route_id || !route.can_travel(board_pos, alight_pos) {
                continue;
            }

            let candidate = DirectMatch {
                route_id,
                board_pos,
                alight_pos,
                distance_km: graph.ride_distance_km(route, board_pos, alight_pos),
            };

            let better = match &best {
                None => true,
                Some(current) => {
                    (candidate.intermediate_stops(), candidate.route_id)
                        < (current.intermediate_stops(), current.route_id)
                }
            };
            if better {
                best = Some(candidate);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedSnapshot, RawRoute, RawRouteStop, RawStop};

    fn stop(id: u32, lat: f64, lon: f64) -> RawStop {
        RawStop {
            id,
            name: format!("Stop {id}"),
            kind: "stop".into(),
            lat,
            lon,
            status: "approved".into(),
        }
    }

    fn route(id: u32, bidirectional: bool, stop_ids: &[u32]) -> RawRoute {
        RawRoute {
            id,
            name: format!("Route {id}"),
            status: "approved".into(),
            bidirectional,
            stops: stop_ids
                .iter()
                .enumerate()
                .map(|(i, &sid)| RawRouteStop {
                    index: i as u32,
                    stop_id: sid,
                })
                .collect(),
        }
    }

    fn build(stops: Vec<RawStop>, routes: Vec<RawRoute>) -> RouteGraph {
        RouteGraph::build(&FeedSnapshot::from_raw(stops, routes))
    }

    fn line_of_stops(n: u32) -> Vec<RawStop> {
        (1..=n)
            .map(|i| stop(i, 27.70 + 0.01 * i as f64, 85.31))
            .collect()
    }

    #[test]
    fn matches_forward_on_one_way_route() {
        let g = build(line_of_stops(3), vec![route(5, false, &[1, 2, 3])]);
        let m = find_direct(&g, StopId(1), StopId(3)).unwrap();
        assert_eq!(m.route_id, RouteId(5));
        assert_eq!(m.intermediate_stops(), 1);
        assert!(m.distance_km > 0.0);
    }

    #[test]
    fn rejects_backward_on_one_way_route() {
        let g = build(line_of_stops(3), vec![route(5, false, &[1, 2, 3])]);
        assert!(find_direct(&g, StopId(3), StopId(1)).is_none());
    }

    #[test]
    fn matches_backward_on_bidirectional_route() {
        let g = build(line_of_stops(3), vec![route(5, true, &[1, 2, 3])]);
        let m = find_direct(&g, StopId(3), StopId(1)).unwrap();
        assert_eq!(m.route_id, RouteId(5));
        assert_eq!(m.intermediate_stops(), 1);
    }

    #[test]
    fn prefers_fewest_intermediate_stops() {
        // Route 1 goes 1→2→3→4, route 2 goes 1→4 express.
        let g = build(
            line_of_stops(4),
            vec![route(1, false, &[1, 2, 3, 4]), route(2, false, &[1, 4])],
        );
        let m = find_direct(&g, StopId(1), StopId(4)).unwrap();
        assert_eq!(m.route_id, RouteId(2));
        assert_eq!(m.intermediate_stops(), 0);
    }

    #[test]
    fn ties_break_to_lowest_route_id() {
        let g = build(
            line_of_stops(2),
            vec![route(9, false, &[1, 2]), route(4, false, &[1, 2])],
        );
        let m = find_direct(&g, StopId(1), StopId(2)).unwrap();
        assert_eq!(m.route_id, RouteId(4));
    }

    #[test]
    fn no_shared_route_means_no_match() {
        let g = build(
            line_of_stops(4),
            vec![route(1, false, &[1, 2]), route(2, false, &[3, 4])],
        );
        assert!(find_direct(&g, StopId(1), StopId(4)).is_none());
    }

    #[test]
    fn same_stop_never_matches() {
        let g = build(line_of_stops(2), vec![route(1, false, &[1, 2])]);
        assert!(find_direct(&g, StopId(1), StopId(1)).is_none());
    }
}
