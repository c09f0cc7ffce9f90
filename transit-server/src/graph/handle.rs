//! Snapshot publication.
//!
//! The graph is the one shared resource in the engine. It is rebuilt
//! off to the side and published by swapping an `Arc`, so a reader
//! always sees a fully-old or fully-new snapshot. The write lock is
//! held only for the pointer swap; searches run on their own `Arc`
//! clone and never block a rebuild.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::feed::{ApprovedFeed, FeedError};

use super::{GraphStats, RouteGraph};

/// Shared handle to the current graph snapshot.
#[derive(Clone)]
pub struct GraphHandle {
    inner: Arc<RwLock<Arc<RouteGraph>>>,
}

impl GraphHandle {
    /// Wrap an already-built graph.
    pub fn new(graph: RouteGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    /// Build the initial snapshot from a feed.
    pub fn from_feed(feed: &dyn ApprovedFeed) -> Result<Self, FeedError> {
        let snapshot = feed.load()?;
        Ok(Self::new(RouteGraph::build(&snapshot)))
    }

    /// The current snapshot. Cheap: clones an `Arc` under a read lock.
    pub async fn snapshot(&self) -> Arc<RouteGraph> {
        self.inner.read().await.clone()
    }

    /// Rebuild from the feed and publish the new snapshot.
    ///
    /// On feed failure the previous snapshot stays live and the error
    /// propagates to the caller (this is the `DATA_UNAVAILABLE` path).
    pub async fn rebuild(&self, feed: &dyn ApprovedFeed) -> Result<GraphStats, FeedError> {
        let snapshot = feed.load()?;
        let graph = RouteGraph::build(&snapshot);
        let stats = graph.stats();

        *self.inner.write().await = Arc::new(graph);
        info!(
            stops = stats.stops,
            routes = stats.routes,
            "published new graph snapshot"
        );
        Ok(stats)
    }
}
