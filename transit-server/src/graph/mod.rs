//! Route graph.
//!
//! The in-memory search structure derived from the approved corpus.
//! A built `RouteGraph` is immutable; concurrency is handled by
//! `GraphHandle`, which publishes fresh snapshots atomically.

mod build;
mod handle;

pub use build::{Edge, GraphStats, RouteGraph};
pub use handle::GraphHandle;
