//! Search configuration for the route resolution pipeline.

use crate::walking::WalkParams;

/// Tunables for endpoint resolution and transfer search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of route changes allowed (2 means at most 3 legs).
    pub max_transfers: usize,

    /// Fixed cost, in kilometre-equivalents, added when a search path
    /// switches routes. Discourages marginal transfers that are only
    /// nominally shorter.
    pub transfer_penalty_km: f64,

    /// Average in-city bus speed, used to convert distances to ETAs.
    pub avg_bus_speed_kmh: f64,

    /// Radius for resolving raw coordinates to nearby stops.
    pub nearest_radius_km: f64,

    /// Maximum number of candidate stops per endpoint.
    pub nearest_limit: usize,

    /// Use the straight-line A* heuristic. Disabling degrades to plain
    /// Dijkstra; results are identical, exploration order is not.
    pub use_heuristic: bool,

    /// Walking-leg composition parameters.
    pub walk: WalkParams,
}

impl SearchConfig {
    /// Convert a ride distance to minutes at the configured bus speed.
    pub fn ride_minutes(&self, distance_km: f64) -> f64 {
        distance_km / self.avg_bus_speed_kmh * 60.0
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfers: 2,
            transfer_penalty_km: 2.0,
            avg_bus_speed_kmh: 15.0,
            nearest_radius_km: 2.0,
            nearest_limit: 5,
            use_heuristic: true,
            walk: WalkParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = SearchConfig::default();
        assert_eq!(config.max_transfers, 2);
        assert_eq!(config.transfer_penalty_km, 2.0);
        assert_eq!(config.avg_bus_speed_kmh, 15.0);
        assert_eq!(config.nearest_radius_km, 2.0);
        assert_eq!(config.nearest_limit, 5);
        assert!(config.use_heuristic);
    }

    #[test]
    fn ride_minutes_conversion() {
        let config = SearchConfig::default();
        // 15 km at 15 km/h is an hour.
        assert_eq!(config.ride_minutes(15.0), 60.0);
        assert_eq!(config.ride_minutes(0.0), 0.0);
    }
}
