//! Raw-row to domain conversion.
//!
//! This is where the duck-typed upstream data becomes typed: approval
//! filtering, coordinate validation, and stop-list re-ordering all
//! happen here, so nothing downstream ever re-checks them.

use tracing::warn;

use crate::domain::{Route, RouteId, Stop, StopId, StopKind};
use crate::geo::Point;

use super::types::{RawRoute, RawStop};

const APPROVED: &str = "approved";

/// A validated snapshot of the approved corpus, ready for graph
/// construction.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
}

impl FeedSnapshot {
    /// Convert raw rows, keeping only approved, well-formed entries.
    ///
    /// Individually corrupt rows are skipped with a warning; they never
    /// poison the rest of the snapshot.
    pub fn from_raw(raw_stops: Vec<RawStop>, raw_routes: Vec<RawRoute>) -> Self {
        let stops: Vec<Stop> = raw_stops
            .into_iter()
            .filter(|s| s.status == APPROVED)
            .filter_map(convert_stop)
            .collect();

        let routes: Vec<Route> = raw_routes
            .into_iter()
            .filter(|r| r.status == APPROVED)
            .filter_map(convert_route)
            .collect();

        Self { stops, routes }
    }
}

fn convert_stop(raw: RawStop) -> Option<Stop> {
    let position = match Point::new(raw.lat, raw.lon) {
        Ok(p) => p,
        Err(e) => {
            warn!(stop_id = raw.id, %e, "skipping stop with invalid coordinates");
            return None;
        }
    };

    let kind = match raw.kind.as_str() {
        "stop" => StopKind::Stop,
        "landmark" => StopKind::Landmark,
        other => {
            warn!(stop_id = raw.id, kind = other, "skipping stop with unknown kind");
            return None;
        }
    };

    Some(Stop {
        id: StopId(raw.id),
        name: raw.name,
        kind,
        position,
    })
}

fn convert_route(raw: RawRoute) -> Option<Route> {
    let entries: Vec<(u32, StopId)> = raw
        .stops
        .iter()
        .map(|e| (e.index, StopId(e.stop_id)))
        .collect();

    match Route::from_indexed(RouteId(raw.id), raw.name, entries, raw.bidirectional) {
        Ok(route) => Some(route),
        Err(e) => {
            warn!(route_id = raw.id, %e, "skipping malformed route");
            None
        }
    }
}
