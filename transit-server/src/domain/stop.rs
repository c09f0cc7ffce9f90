//! Stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Point;

/// Identifier of an approved stop or landmark.
///
/// `Ord` is derived so that equal-cost search states and equidistant
/// locator results can be broken deterministically by id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StopId(pub u32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a stop is a real bus stop or a named landmark riders search by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Stop,
    Landmark,
}

/// An approved boarding/alighting point.
///
/// Only approved stops ever reach this type: the approval filter lives
/// at the feed boundary, so the graph and planner never see pending or
/// rejected submissions.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub kind: StopKind,
    pub position: Point,
}
