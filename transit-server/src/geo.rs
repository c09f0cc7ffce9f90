//! Geospatial primitives.
//!
//! Great-circle distance and a cheap bounding-box pre-filter. Everything
//! here is pure math over validated coordinates; callers construct
//! `Point`s via `Point::new`, which rejects out-of-range values.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;

/// A validated geographic coordinate.
///
/// Guaranteed to satisfy lat ∈ [-90, 90] and lon ∈ [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    /// Construct a point, validating the coordinate ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate {
                axis: "latitude",
                value: lat,
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinate {
                axis: "longitude",
                value: lon,
            });
        }
        Ok(Self { lat, lon })
    }
}

/// Haversine great-circle distance between two points, in kilometres.
///
/// Sub-metre accurate at urban scale, which is all the fare and ETA
/// formulas need.
pub fn haversine_km(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// An axis-aligned lat/lon box used to pre-filter candidates before the
/// exact haversine computation.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl BoundingBox {
    /// Box around `center` large enough to contain every point within
    /// `radius_km`. Deliberately over-covers near the poles; the exact
    /// distance check afterwards discards the excess.
    pub fn around(center: Point, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        // Longitude degrees shrink with latitude; clamp the cosine so the
        // box stays finite near the poles.
        let cos_lat = center.lat.to_radians().cos().max(0.01);
        let lon_delta = radius_km / (KM_PER_DEGREE * cos_lat);

        Self {
            min_lat: center.lat - lat_delta,
            max_lat: center.lat + lat_delta,
            min_lon: center.lon - lon_delta,
            max_lon: center.lon + lon_delta,
        }
    }

    /// Whether the point falls inside the box.
    pub fn contains(&self, p: Point) -> bool {
        p.lat >= self.min_lat
            && p.lat <= self.max_lat
            && p.lon >= self.min_lon
            && p.lon <= self.max_lon
    }
}
