//! Route types.
//!
//! Upstream storage keeps a route's stop list as a loose JSON blob of
//! `(index, stop_id)` pairs in no guaranteed order. `Route::from_indexed`
//! is the boundary that turns that into a strongly-typed ordered
//! sequence: entries are re-sorted by index, duplicate indices collapse
//! to the first occurrence, and a list with fewer than two stops is
//! rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, StopId};

/// Identifier of an approved route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An approved route: an ordered sequence of stops a bus traverses.
///
/// One-way routes are traversed in ascending stop order only;
/// bidirectional routes may be ridden either way.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    stops: Vec<StopId>,
    pub bidirectional: bool,
}

impl Route {
    /// Build a route from an already-ordered stop sequence.
    pub fn new(
        id: RouteId,
        name: String,
        stops: Vec<StopId>,
        bidirectional: bool,
    ) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::TooFewStops(stops.len()));
        }
        Ok(Self {
            id,
            name,
            stops,
            bidirectional,
        })
    }

    /// Build a route from raw `(index, stop_id)` pairs in arbitrary order.
    ///
    /// Stored order is never trusted: the pairs are sorted by index here.
    /// If two entries carry the same index the first one wins.
    pub fn from_indexed(
        id: RouteId,
        name: String,
        mut entries: Vec<(u32, StopId)>,
        bidirectional: bool,
    ) -> Result<Self, DomainError> {
        entries.sort_by_key(|(index, _)| *index);
        entries.dedup_by_key(|(index, _)| *index);
        let stops = entries.into_iter().map(|(_, stop)| stop).collect();
        Self::new(id, name, stops, bidirectional)
    }

    /// The ordered stop sequence.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    /// Position of a stop on this route, if present.
    pub fn position_of(&self, stop: StopId) -> Option<usize> {
        self.stops.iter().position(|&s| s == stop)
    }

    /// Whether a rider boarding at `from_pos` can reach `to_pos` along
    /// this route's allowed direction.
    pub fn can_travel(&self, from_pos: usize, to_pos: usize) -> bool {
        if from_pos == to_pos {
            return false;
        }
        self.bidirectional || from_pos < to_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(ids: &[u32]) -> Vec<StopId> {
        ids.iter().copied().map(StopId).collect()
    }

    #[test]
    fn rejects_fewer_than_two_stops() {
        assert!(matches!(
            Route::new(RouteId(1), "R".into(), stops(&[1]), false),
            Err(DomainError::TooFewStops(1))
        ));
        assert!(matches!(
            Route::new(RouteId(1), "R".into(), vec![], false),
            Err(DomainError::TooFewStops(0))
        ));
    }

    #[test]
    fn from_indexed_sorts_by_index() {
        let route = Route::from_indexed(
            RouteId(1),
            "Ring Road".into(),
            vec![(2, StopId(30)), (0, StopId(10)), (1, StopId(20))],
            false,
        )
        .unwrap();

        assert_eq!(route.stops(), &stops(&[10, 20, 30]));
    }

    #[test]
    fn from_indexed_drops_duplicate_indices() {
        let route = Route::from_indexed(
            RouteId(1),
            "R".into(),
            vec![(0, StopId(10)), (1, StopId(20)), (1, StopId(99))],
            false,
        )
        .unwrap();

        assert_eq!(route.stops(), &stops(&[10, 20]));
    }

    #[test]
    fn position_lookup() {
        let route = Route::new(RouteId(1), "R".into(), stops(&[10, 20, 30]), false).unwrap();
        assert_eq!(route.position_of(StopId(20)), Some(1));
        assert_eq!(route.position_of(StopId(99)), None);
    }

    #[test]
    fn one_way_travel_is_ascending_only() {
        let route = Route::new(RouteId(1), "R".into(), stops(&[10, 20, 30]), false).unwrap();
        assert!(route.can_travel(0, 2));
        assert!(!route.can_travel(2, 0));
        assert!(!route.can_travel(1, 1));
    }

    #[test]
    fn bidirectional_travel_goes_both_ways() {
        let route = Route::new(RouteId(1), "R".into(), stops(&[10, 20, 30]), true).unwrap();
        assert!(route.can_travel(0, 2));
        assert!(route.can_travel(2, 0));
        assert!(!route.can_travel(1, 1));
    }
}
