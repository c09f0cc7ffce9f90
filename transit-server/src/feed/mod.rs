//! Approved-data feed.
//!
//! The read-only boundary through which approved stops and routes reach
//! the engine. Upstream, submissions are created and mutated by the
//! contribution/approval subsystem; this module only ever sees rows
//! whose lifecycle is finished, and filters to `approved` status when
//! converting to domain types.

mod convert;
mod error;
mod file;
mod types;

pub use convert::FeedSnapshot;
pub use error::FeedError;
pub use file::FileFeed;
pub use types::{RawRoute, RawRouteStop, RawStop};

/// Source of approved stop/route data.
///
/// Implementations must return a complete, self-consistent snapshot;
/// the graph builder tolerates individually corrupt rows but not a
/// partially-read feed.
pub trait ApprovedFeed: Send + Sync {
    /// Load the current approved dataset.
    ///
    /// An `Err` here is the one fatal condition in the engine
    /// (`DATA_UNAVAILABLE`): callers should retry later rather than
    /// caching a negative result.
    fn load(&self) -> Result<FeedSnapshot, FeedError>;
}

/// In-memory feed, used by tests and seed tooling.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    pub stops: Vec<RawStop>,
    pub routes: Vec<RawRoute>,
}

impl ApprovedFeed for StaticFeed {
    fn load(&self) -> Result<FeedSnapshot, FeedError> {
        Ok(FeedSnapshot::from_raw(
            self.stops.clone(),
            self.routes.clone(),
        ))
    }
}
