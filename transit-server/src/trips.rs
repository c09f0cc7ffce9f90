//! Trip recording.
//!
//! Every successfully planned trip is handed to a [`TripSink`] after
//! the response is produced. Recording is best-effort: it runs off the
//! request path and a sink failure never affects the rider's answer.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{Itinerary, PassengerClass, StopId};

/// A summary of one planned trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub recorded_at: DateTime<Utc>,
    pub board_stop: StopId,
    pub alight_stop: StopId,
    pub passenger: PassengerClass,
    pub transfer_count: usize,
    pub total_fare: f64,
    pub total_distance_km: f64,
    pub carbon_saved_kg: f64,
}

impl TripRecord {
    /// Summarize a planned itinerary at the current time.
    pub fn from_itinerary(itinerary: &Itinerary, passenger: PassengerClass) -> Self {
        let legs = itinerary.legs();
        Self {
            recorded_at: Utc::now(),
            board_stop: legs[0].board_stop_id,
            alight_stop: legs[legs.len() - 1].alight_stop_id,
            passenger,
            transfer_count: itinerary.transfer_count(),
            total_fare: itinerary.total_fare,
            total_distance_km: itinerary.total_distance_km,
            carbon_saved_kg: itinerary.carbon_saved_kg,
        }
    }
}

/// Destination for planned-trip records.
pub trait TripSink: Send + Sync {
    fn record(&self, trip: &TripRecord);
}

/// Sink that emits each trip as a structured log event.
#[derive(Debug, Default)]
pub struct LogSink;

impl TripSink for LogSink {
    fn record(&self, trip: &TripRecord) {
        info!(
            board_stop = %trip.board_stop,
            alight_stop = %trip.alight_stop,
            passenger = ?trip.passenger,
            transfers = trip.transfer_count,
            fare = trip.total_fare,
            distance_km = trip.total_distance_km,
            carbon_saved_kg = trip.carbon_saved_kg,
            "trip planned"
        );
    }
}

/// Sink that retains records in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: std::sync::Mutex<Vec<TripRecord>>,
}

impl MemorySink {
    pub fn recorded(&self) -> Vec<TripRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TripSink for MemorySink {
    fn record(&self, trip: &TripRecord) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(trip.clone());
        }
    }
}
