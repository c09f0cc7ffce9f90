//! Domain error types.
//!
//! Validation failures and data inconsistencies in the domain layer.
//! Distinct from feed/IO errors and from the planner's outcome codes.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A coordinate is outside its valid range
    #[error("invalid {axis}: {value}")]
    InvalidCoordinate { axis: &'static str, value: f64 },

    /// A route was given fewer than two stops
    #[error("route must list at least two stops, got {0}")]
    TooFewStops(usize),

    /// Consecutive itinerary legs do not meet at the same stop
    #[error("legs do not chain: leg alights at stop {alight} but next boards at stop {board}")]
    LegsDoNotChain { alight: u32, board: u32 },

    /// An itinerary was built with no ride legs
    #[error("itinerary must have at least one ride leg")]
    EmptyItinerary,

    /// A distance or fare came out negative
    #[error("negative {quantity}: {value}")]
    NegativeQuantity { quantity: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCoordinate {
            axis: "latitude",
            value: 123.0,
        };
        assert_eq!(err.to_string(), "invalid latitude: 123");

        let err = DomainError::TooFewStops(1);
        assert_eq!(err.to_string(), "route must list at least two stops, got 1");

        let err = DomainError::LegsDoNotChain {
            alight: 4,
            board: 7,
        };
        assert_eq!(
            err.to_string(),
            "legs do not chain: leg alights at stop 4 but next boards at stop 7"
        );

        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one ride leg");
    }
}
