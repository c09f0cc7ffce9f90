//! Itinerary type.
//!
//! The assembled trip plan returned to the caller. `Itinerary::new`
//! enforces the result contract: at least one ride leg, successive legs
//! chaining at an identical stop id, and non-negative money/distances.

use super::{DomainError, RideLeg, WalkLeg};

/// Optional walking legs at the head and tail of a trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkingLegs {
    pub before: Option<WalkLeg>,
    pub after: Option<WalkLeg>,
}

/// A complete trip plan.
///
/// # Invariants
///
/// - At least one ride leg
/// - Each leg boards at the stop the previous leg alighted at
/// - Fare, distances and ETAs are non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<RideLeg>,
    pub walking: WalkingLegs,
    pub total_fare: f64,
    pub total_distance_km: f64,
    pub total_eta_minutes: f64,
    pub carbon_saved_kg: f64,
}

impl Itinerary {
    /// Assemble an itinerary, validating the chaining and sign invariants.
    pub fn new(
        legs: Vec<RideLeg>,
        walking: WalkingLegs,
        total_fare: f64,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        for pair in legs.windows(2) {
            if pair[0].alight_stop_id != pair[1].board_stop_id {
                return Err(DomainError::LegsDoNotChain {
                    alight: pair[0].alight_stop_id.0,
                    board: pair[1].board_stop_id.0,
                });
            }
        }
        if total_fare < 0.0 {
            return Err(DomainError::NegativeQuantity {
                quantity: "fare",
                value: total_fare,
            });
        }
        for leg in &legs {
            if leg.distance_km < 0.0 {
                return Err(DomainError::NegativeQuantity {
                    quantity: "leg distance",
                    value: leg.distance_km,
                });
            }
        }

        let ride_distance: f64 = legs.iter().map(|l| l.distance_km).sum();
        let walk_distance: f64 = walking
            .before
            .iter()
            .chain(walking.after.iter())
            .map(|w| w.distance_km)
            .sum();
        let ride_eta: f64 = legs.iter().map(|l| l.eta_minutes).sum();
        let walk_eta: f64 = walking
            .before
            .iter()
            .chain(walking.after.iter())
            .map(|w| w.eta_minutes)
            .sum();

        Ok(Self {
            legs,
            walking,
            total_fare,
            total_distance_km: ride_distance + walk_distance,
            total_eta_minutes: ride_eta + walk_eta,
            // Only the ridden kilometres displace a car trip.
            carbon_saved_kg: 0.0,
        })
    }

    /// Set the carbon-saved estimate (computed by the fare/emissions layer).
    pub fn with_carbon_saved(mut self, kg: f64) -> Self {
        self.carbon_saved_kg = kg;
        self
    }

    /// The ride legs, in travel order.
    pub fn legs(&self) -> &[RideLeg] {
        &self.legs
    }

    /// Number of transfers (route changes) in the trip.
    pub fn transfer_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Distance covered on buses, excluding walking.
    pub fn ride_distance_km(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_km).sum()
    }
}
