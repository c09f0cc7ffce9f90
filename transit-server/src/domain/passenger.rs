//! Passenger classification.

use serde::{Deserialize, Serialize};

/// Fare class of the rider. Student and elderly passengers receive a
/// configured discount; the multiplier itself lives in `FareSchedule`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerClass {
    #[default]
    Regular,
    Student,
    Elderly,
}
