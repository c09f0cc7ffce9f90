//! Raw feed records.
//!
//! These mirror the loose shape of the upstream storage: stop lists are
//! arrays of `{index, stop_id}` objects in no guaranteed order, and
//! every row carries an approval status string. Validation and
//! re-ordering happen in `convert`, not here.

use serde::{Deserialize, Serialize};

/// A stop row as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStop {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub lat: f64,
    pub lon: f64,
    pub status: String,
}

fn default_kind() -> String {
    "stop".to_string()
}

/// One entry of a route's stored stop list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRouteStop {
    pub index: u32,
    pub stop_id: u32,
}

/// A route row as stored upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoute {
    pub id: u32,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub bidirectional: bool,
    #[serde(default)]
    pub stops: Vec<RawRouteStop>,
}

/// The on-disk feed document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedDocument {
    pub stops: Vec<RawStop>,
    pub routes: Vec<RawRoute>,
}
