//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::PlanCache;
use crate::fare::FareSchedule;
use crate::feed::ApprovedFeed;
use crate::graph::GraphHandle;
use crate::planner::SearchConfig;
use crate::trips::TripSink;
use crate::walking::osrm::OsrmClient;

/// Shared application state.
///
/// Contains everything the handlers need: the live graph snapshot, the
/// feed to rebuild it from, the tunables, and the side channels.
#[derive(Clone)]
pub struct AppState {
    /// Current route graph snapshot.
    pub graph: GraphHandle,

    /// Source of approved stops and routes, for rebuilds.
    pub feed: Arc<dyn ApprovedFeed>,

    /// Planner configuration.
    pub config: Arc<SearchConfig>,

    /// Fare schedule and emission factors.
    pub schedule: Arc<FareSchedule>,

    /// Cache of planning results.
    pub cache: Arc<PlanCache>,

    /// Destination for planned-trip records.
    pub trips: Arc<dyn TripSink>,

    /// Optional walking-leg refinement client.
    pub osrm: Option<Arc<OsrmClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        graph: GraphHandle,
        feed: Arc<dyn ApprovedFeed>,
        config: SearchConfig,
        schedule: FareSchedule,
        cache: PlanCache,
        trips: Arc<dyn TripSink>,
        osrm: Option<OsrmClient>,
    ) -> Self {
        Self {
            graph,
            feed,
            config: Arc::new(config),
            schedule: Arc::new(schedule),
            cache: Arc::new(cache),
            trips,
            osrm: osrm.map(Arc::new),
        }
    }
}
