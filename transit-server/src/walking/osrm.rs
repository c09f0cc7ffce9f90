//! OSRM foot-profile client.
//!
//! Optional enrichment for walking legs: where an OSRM instance is
//! reachable, the straight-line estimate is replaced with the actual
//! pedestrian routing distance and duration. Routing decisions are
//! never affected — any failure here falls back to the leg as composed.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::WalkLeg;
use crate::geo::Point;

/// Errors from the OSRM API.
#[derive(Debug, thiserror::Error)]
pub enum OsrmError {
    #[error("osrm request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("osrm returned code {0:?}")]
    NotOk(String),

    #[error("osrm returned no routes")]
    NoRoutes,
}

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM instance, e.g. `https://router.project-osrm.org`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Metres.
    distance: f64,
    /// Seconds.
    duration: f64,
}

/// Client for the OSRM routing API (foot profile).
pub struct OsrmClient {
    config: OsrmConfig,
    http: reqwest::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, OsrmError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Fetch pedestrian routing distance/duration between two points.
    pub async fn foot_route(&self, from: Point, to: Point) -> Result<(f64, f64), OsrmError> {
        let url = foot_route_url(&self.config.base_url, from, to);
        let response: OsrmResponse = self.http.get(&url).send().await?.json().await?;

        if response.code != "Ok" {
            return Err(OsrmError::NotOk(response.code));
        }
        let route = response.routes.first().ok_or(OsrmError::NoRoutes)?;
        Ok((route.distance / 1000.0, route.duration / 60.0))
    }

    /// Refine a walking leg with OSRM data, keeping the straight-line
    /// estimate whenever the API is unreachable or unhappy.
    pub async fn refine(&self, leg: WalkLeg) -> WalkLeg {
        match self.foot_route(leg.from, leg.to).await {
            Ok((distance_km, eta_minutes)) => WalkLeg {
                distance_km,
                eta_minutes,
                ..leg
            },
            Err(e) => {
                debug!(%e, "osrm walking refinement unavailable, using straight-line estimate");
                leg
            }
        }
    }
}

/// OSRM wants `lon,lat` pairs, the reverse of everything else here.
fn foot_route_url(base_url: &str, from: Point, to: Point) -> String {
    format!(
        "{}/route/v1/foot/{:.6},{:.6};{:.6},{:.6}?overview=false",
        base_url.trim_end_matches('/'),
        from.lon,
        from.lat,
        to.lon,
        to.lat
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_lon_lat_order() {
        let from = Point::new(27.7041, 85.3131).unwrap();
        let to = Point::new(27.6727, 85.3250).unwrap();
        let url = foot_route_url("https://router.example.org/", from, to);
        assert_eq!(
            url,
            "https://router.example.org/route/v1/foot/85.313100,27.704100;85.325000,27.672700?overview=false"
        );
    }

    #[test]
    fn parses_ok_response() {
        let json = r#"{"code":"Ok","routes":[{"distance":843.2,"duration":612.0}]}"#;
        let parsed: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.code, "Ok");
        assert_eq!(parsed.routes[0].distance, 843.2);
    }

    #[test]
    fn parses_error_response_without_routes() {
        let json = r#"{"code":"NoRoute"}"#;
        let parsed: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.code, "NoRoute");
        assert!(parsed.routes.is_empty());
    }
}
