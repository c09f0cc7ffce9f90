//! File-backed feed.
//!
//! Reads the approved dataset from a JSON document on disk. This is the
//! deployment shape where an upstream export job materialises the
//! approved corpus; the builder re-reads the file on every rebuild.

use std::path::PathBuf;

use super::types::FeedDocument;
use super::{ApprovedFeed, FeedError, FeedSnapshot};

/// Feed that loads a JSON document from a fixed path.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this feed reads from.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ApprovedFeed for FileFeed {
    fn load(&self) -> Result<FeedSnapshot, FeedError> {
        let bytes = std::fs::read(&self.path)?;
        let doc: FeedDocument = serde_json::from_slice(&bytes)?;
        Ok(FeedSnapshot::from_raw(doc.stops, doc.routes))
    }
}
