//! Caching layer for planned itineraries.
//!
//! Planning is pure given a graph snapshot, so a plan stays valid until
//! the graph is rebuilt. Entries carry a TTL as a backstop, and a
//! rebuild invalidates everything at once.
//!
//! Coordinates are quantized to six decimal places (about 10 cm) when
//! forming keys, which bounds cache cardinality for riders whose GPS
//! jitters between requests.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Itinerary;
use crate::planner::{LocationRef, PlanRequest};

/// Cached itinerary entry.
type PlanEntry = Arc<Itinerary>;

/// Configuration for the plan cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Cache of planning results, keyed by the canonical request.
pub struct PlanCache {
    plans: MokaCache<String, PlanEntry>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get a cached plan for the request.
    pub async fn get(&self, request: &PlanRequest) -> Option<PlanEntry> {
        self.plans.get(&key(request)).await
    }

    /// Insert a plan for the request.
    pub async fn insert(&self, request: &PlanRequest, entry: PlanEntry) {
        self.plans.insert(key(request), entry).await;
    }

    /// Number of cached plans (for monitoring).
    ///
    /// Eventually consistent; call [`PlanCache::run_pending_tasks`]
    /// first when an exact count matters.
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }

    /// Flush pending cache maintenance.
    pub async fn run_pending_tasks(&self) {
        self.plans.run_pending_tasks().await;
    }

    /// Drop every cached plan. Called after a graph rebuild.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}

fn key(request: &PlanRequest) -> String {
    format!(
        "{}|{}|{:?}|{}|{}",
        location_key(request.origin),
        location_key(request.destination),
        request.passenger,
        point_key(request.user_origin),
        point_key(request.user_destination),
    )
}

fn location_key(location: LocationRef) -> String {
    match location {
        LocationRef::Stop(id) => format!("s{id}"),
        LocationRef::Coord(p) => format!("c{:.6},{:.6}", p.lat, p.lon),
    }
}

fn point_key(point: Option<crate::geo::Point>) -> String {
    match point {
        Some(p) => format!("{:.6},{:.6}", p.lat, p.lon),
        None => "-".into(),
    }
}
