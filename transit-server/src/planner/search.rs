//! Bounded multi-route search.
//!
//! A Dijkstra variant over (stop, boarded route) states. Riding an edge
//! costs its real distance; switching routes adds a fixed penalty so a
//! transfer has to earn its keep. Paths exceeding the transfer bound are
//! pruned before they enter the frontier, which keeps the explored state
//! space small on dense corpora.
//!
//! With `use_heuristic` enabled the frontier is ordered by cost plus the
//! straight-line distance to the goal. Edge weights are real kilometres
//! and the penalty is non-negative, so the heuristic never overestimates
//! and the first goal pop is still optimal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::domain::{RouteId, StopId};
use crate::geo::haversine_km;
use crate::graph::RouteGraph;

use super::SearchConfig;

/// One contiguous ride on a single route, as found by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideSegment {
    pub route: RouteId,
    pub board: StopId,
    pub alight: StopId,
    pub distance_km: f64,
}

/// Search state: where we are and what we rode to get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct State {
    stop: StopId,
    route: Option<RouteId>,
    transfers: usize,
}

/// Frontier entry. Ordered so the heap pops the lowest priority first,
/// with fully deterministic tie-breaks: fewer stops ridden, then lower
/// route id, then lower stop id.
struct Frontier {
    priority: f64,
    cost: f64,
    stops_ridden: usize,
    state: State,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse every component.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.stops_ridden.cmp(&self.stops_ridden))
            .then_with(|| other.state.route.cmp(&self.state.route))
            .then_with(|| other.state.stop.cmp(&self.state.stop))
    }
}

/// Find the cheapest ride sequence from `origin` to `goal` within the
/// configured transfer bound, or `None` when the stops are not connected
/// inside it.
///
/// Consecutive hops on the same route are collapsed into one segment,
/// so the result's length is the number of legs, not the number of
/// stops ridden through.
pub fn find_transfer_path(
    graph: &RouteGraph,
    config: &SearchConfig,
    origin: StopId,
    goal: StopId,
) -> Option<Vec<RideSegment>> {
    if origin == goal {
        return None;
    }
    let goal_pos = graph.stop(goal)?.position;

    let start = State {
        stop: origin,
        route: None,
        transfers: 0,
    };

    let mut best: HashMap<State, f64> = HashMap::new();
    let mut came_from: HashMap<State, (State, RouteId, f64)> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(start, 0.0);
    frontier.push(Frontier {
        priority: 0.0,
        cost: 0.0,
        stops_ridden: 0,
        state: start,
    });

    while let Some(Frontier {
        cost,
        stops_ridden,
        state,
        ..
    }) = frontier.pop()
    {
        if best.get(&state).is_some_and(|&b| cost > b) {
            continue;
        }
        if state.stop == goal {
            return Some(reconstruct(&came_from, state));
        }

        for edge in graph.neighbors(state.stop) {
            let switches = state.route.is_some_and(|r| r != edge.route);
            let transfers = state.transfers + usize::from(switches);
            if transfers > config.max_transfers {
                continue;
            }

            let next_cost = cost
                + edge.distance_km
                + if switches { config.transfer_penalty_km } else { 0.0 };
            let next = State {
                stop: edge.to,
                route: Some(edge.route),
                transfers,
            };

            if best.get(&next).is_none_or(|&b| next_cost < b) {
                best.insert(next, next_cost);
                came_from.insert(next, (state, edge.route, edge.distance_km));

                let heuristic = if config.use_heuristic {
                    graph
                        .stop(edge.to)
                        .map_or(0.0, |s| haversine_km(s.position, goal_pos))
                } else {
                    0.0
                };
                frontier.push(Frontier {
                    priority: next_cost + heuristic,
                    cost: next_cost,
                    stops_ridden: stops_ridden + 1,
                    state: next,
                });
            }
        }
    }

    None
}

/// Walk predecessors back to the start, then collapse same-route runs.
fn reconstruct(
    came_from: &HashMap<State, (State, RouteId, f64)>,
    goal_state: State,
) -> Vec<RideSegment> {
    let mut hops = Vec::new();
    let mut current = goal_state;
    while let Some(&(prev, route, distance_km)) = came_from.get(&current) {
        hops.push(RideSegment {
            route,
            board: prev.stop,
            alight: current.stop,
            distance_km,
        });
        current = prev;
    }
    hops.reverse();

    let mut segments: Vec<RideSegment> = Vec::new();
    for hop in hops {
        match segments.last_mut() {
            Some(last) if last.route == hop.route => {
                last.alight = hop.alight;
                last.distance_km += hop.distance_km;
            }
            _ => segments.push(hop),
        }
    }
    segments
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

    /// Stops 1..=n spaced roughly 1.1 km apart on a meridian.
    fn line_of_stops(n: u32) -> Vec<RawStop> {
        (1..=n)
            .map(|i| stop(i, 27.70 + 0.01 * i as f64, 85.31))
            .collect()
    }

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn single_route_path_is_one_segment() {
        let g = build(line_of_stops(4), vec![route(1, false, &[1, 2, 3, 4])]);
        let path = find_transfer_path(&g, &config(), StopId(1), StopId(4)).unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path[0].route, RouteId(1));
        assert_eq!(path[0].board, StopId(1));
        assert_eq!(path[0].alight, StopId(4));
    }

    #[test]
    fn one_transfer_path_has_two_segments() {
        // Route 1: 1→2→3, route 2: 3→4→5. Must change at stop 3.
        let g = build(
            line_of_stops(5),
            vec![route(1, false, &[1, 2, 3]), route(2, false, &[3, 4, 5])],
        );
        let path = find_transfer_path(&g, &config(), StopId(1), StopId(5)).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path[0].route, RouteId(1));
        assert_eq!(path[0].alight, StopId(3));
        assert_eq!(path[1].route, RouteId(2));
        assert_eq!(path[1].board, StopId(3));
        assert_eq!(path[1].alight, StopId(5));
    }

    #[test]
    fn respects_the_transfer_bound() {
        // A chain needing three changes: 1-2, 2-3, 3-4, 4-5 on distinct routes.
        let g = build(
            line_of_stops(5),
            vec![
                route(1, false, &[1, 2]),
                route(2, false, &[2, 3]),
                route(3, false, &[3, 4]),
                route(4, false, &[4, 5]),
            ],
        );
        assert!(find_transfer_path(&g, &config(), StopId(1), StopId(5)).is_none());

        let relaxed = SearchConfig {
            max_transfers: 3,
            ..SearchConfig::default()
        };
        let path = find_transfer_path(&g, &relaxed, StopId(1), StopId(5)).unwrap();
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn transfer_penalty_keeps_marginal_switches_away() {
        // Both routes cover 1→4; route 2 skips stop 3 but the saving is
        // far below the 2 km penalty, so the search stays on route 1.
        let g = build(
            vec![
                stop(1, 27.70, 85.31),
                stop(2, 27.71, 85.31),
                stop(3, 27.7101, 85.3101),
                stop(4, 27.72, 85.31),
            ],
            vec![
                route(1, false, &[1, 2, 3, 4]),
                route(2, false, &[2, 4]),
            ],
        );
        let path = find_transfer_path(&g, &config(), StopId(1), StopId(4)).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].route, RouteId(1));
    }

    #[test]
    fn one_way_route_is_not_ridden_backwards() {
        let g = build(line_of_stops(3), vec![route(1, false, &[1, 2, 3])]);
        assert!(find_transfer_path(&g, &config(), StopId(3), StopId(1)).is_none());
    }

    #[test]
    fn bidirectional_route_works_both_ways() {
        let g = build(line_of_stops(3), vec![route(1, true, &[1, 2, 3])]);
        let path = find_transfer_path(&g, &config(), StopId(3), StopId(1)).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].board, StopId(3));
        assert_eq!(path[0].alight, StopId(1));
    }

    #[test]
    fn disconnected_stops_yield_none() {
        let g = build(
            line_of_stops(4),
            vec![route(1, false, &[1, 2]), route(2, false, &[3, 4])],
        );
        assert!(find_transfer_path(&g, &config(), StopId(1), StopId(4)).is_none());
    }

    #[test]
    fn same_origin_and_goal_yields_none() {
        let g = build(line_of_stops(2), vec![route(1, false, &[1, 2])]);
        assert!(find_transfer_path(&g, &config(), StopId(1), StopId(1)).is_none());
    }

    #[test]
    fn heuristic_toggle_does_not_change_the_result() {
        let g = build(
            line_of_stops(5),
            vec![route(1, true, &[1, 2, 3]), route(2, true, &[3, 4, 5])],
        );
        let with = find_transfer_path(&g, &config(), StopId(1), StopId(5)).unwrap();
        let plain = SearchConfig {
            use_heuristic: false,
            ..SearchConfig::default()
        };
        let without = find_transfer_path(&g, &plain, StopId(1), StopId(5)).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn equal_cost_paths_resolve_to_the_lower_route_id() {
        // Two identical routes over the same stops; the search must pick
        // the same one every time.
        let g = build(
            line_of_stops(3),
            vec![route(7, false, &[1, 2, 3]), route(3, false, &[1, 2, 3])],
        );
        let path = find_transfer_path(&g, &config(), StopId(1), StopId(3)).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].route, RouteId(3));
    }
}
