//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::warn;

use crate::domain::{Itinerary, StopId};
use crate::geo::Point;
use crate::locator::nearest_stops;
use crate::planner::{LocationRef, PlanError, PlanRequest, plan};
use crate::trips::TripRecord;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route/plan", post(plan_trip))
        .route("/stops/nearby", get(nearby_stops))
        .route("/graph/rebuild", post(rebuild_graph))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a trip between two endpoints.
///
/// Always answers with the success/failure envelope: an unreachable
/// destination is a normal negative result (200), not a server error.
async fn plan_trip(State(state): State<AppState>, body: Bytes) -> Response {
    // Parse JSON by hand so a malformed body gets the wire envelope
    // rather than the extractor's default rejection.
    let req: PlanTripRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!(%e, "rejected unparseable plan request");
            return failure_response(&PlanError::InvalidInput(format!("invalid JSON: {e}")));
        }
    };
    let request = match to_plan_request(req) {
        Ok(request) => request,
        Err(e) => return failure_response(&e),
    };

    if let Some(cached) = state.cache.get(&request).await {
        return success_response(&state, &cached).await;
    }

    let graph = state.graph.snapshot().await;
    match plan(&graph, &state.config, &state.schedule, &request) {
        Ok(itinerary) => {
            let itinerary = Arc::new(itinerary);
            state.cache.insert(&request, itinerary.clone()).await;

            // Recording runs off the request path; the rider's answer
            // never waits on the sink.
            let record = TripRecord::from_itinerary(&itinerary, request.passenger);
            let sink = state.trips.clone();
            tokio::spawn(async move {
                sink.record(&record);
            });

            success_response(&state, &itinerary).await
        }
        Err(e) => failure_response(&e),
    }
}

fn to_plan_request(req: PlanTripRequest) -> Result<PlanRequest, PlanError> {
    Ok(PlanRequest {
        origin: to_location(req.origin)?,
        destination: to_location(req.destination)?,
        passenger: req.passenger_class,
        user_origin: req.user_origin.map(to_point).transpose()?,
        user_destination: req.user_destination.map(to_point).transpose()?,
    })
}

fn to_location(dto: LocationDto) -> Result<LocationRef, PlanError> {
    match dto {
        LocationDto::Stop(id) => Ok(LocationRef::Stop(StopId(id))),
        LocationDto::Coord(c) => Ok(LocationRef::Coord(to_point(c)?)),
    }
}

fn to_point(c: CoordDto) -> Result<Point, PlanError> {
    Point::new(c.lat, c.lon).map_err(|e| PlanError::InvalidInput(e.to_string()))
}

async fn success_response(state: &AppState, itinerary: &Itinerary) -> Response {
    // OSRM refinement happens on the response path only: the cache keeps
    // the straight-line numbers, which stay the routing source of truth.
    let mut refined = itinerary.clone();
    if let Some(osrm) = &state.osrm {
        if let Some(before) = refined.walking.before.take() {
            refined.walking.before = Some(osrm.refine(before).await);
        }
        if let Some(after) = refined.walking.after.take() {
            refined.walking.after = Some(osrm.refine(after).await);
        }
    }
    Json(PlanTripResponse::from_itinerary(&refined)).into_response()
}

fn failure_response(err: &PlanError) -> Response {
    let status = match err {
        PlanError::DataUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        PlanError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PlanError::NoNearbyStop | PlanError::RouteNotFound => StatusCode::OK,
        PlanError::Assembly(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(PlanFailureResponse::from_error(err))).into_response()
}

/// Approved stops near a point, nearest first.
async fn nearby_stops(
    State(state): State<AppState>,
    Query(query): Query<NearbyStopsQuery>,
) -> Result<Json<NearbyStopsResponse>, AppError> {
    let point = Point::new(query.lat, query.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let radius_km = query.radius_km.unwrap_or(state.config.nearest_radius_km);
    let limit = query.limit.unwrap_or(state.config.nearest_limit).min(50);

    let graph = state.graph.snapshot().await;
    let stops = nearest_stops(&graph, point, radius_km, limit)
        .into_iter()
        .map(|n| NearbyStopResult {
            id: n.stop.id.0,
            name: n.stop.name.clone(),
            kind: n.stop.kind,
            lat: n.stop.position.lat,
            lon: n.stop.position.lon,
            distance_km: n.distance_km,
        })
        .collect();

    Ok(Json(NearbyStopsResponse { stops }))
}

/// Reload the feed and publish a fresh graph snapshot.
async fn rebuild_graph(State(state): State<AppState>) -> Result<Json<RebuildResponse>, AppError> {
    let stats = state
        .graph
        .rebuild(state.feed.as_ref())
        .await
        .map_err(|e| AppError::ServiceUnavailable {
            message: e.to_string(),
        })?;

    // Cached plans may reference the previous snapshot's data.
    state.cache.invalidate_all();

    Ok(Json(RebuildResponse::from_stats(stats)))
}

/// Application error type for the non-plan endpoints.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    ServiceUnavailable { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::ServiceUnavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };
        warn!(%status, %message, "request failed");
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::cache::{CacheConfig, PlanCache};
    use crate::fare::FareSchedule;
    use crate::feed::{RawRoute, RawRouteStop, RawStop, StaticFeed};
    use crate::graph::GraphHandle;
    use crate::planner::SearchConfig;
    use crate::trips::MemorySink;

    fn stop(id: u32, lat: f64, lon: f64) -> RawStop {
        RawStop {
            id,
            name: format!("Stop {id}"),
            kind: "stop".into(),
            lat,
            lon,
            status: "approved".into(),
        }
    }

    fn route(id: u32, stop_ids: &[u32]) -> RawRoute {
        RawRoute {
            id,
            name: format!("Route {id}"),
            status: "approved".into(),
            bidirectional: false,
            stops: stop_ids
                .iter()
                .enumerate()
                .map(|(i, &sid)| RawRouteStop {
                    index: i as u32,
                    stop_id: sid,
                })
                .collect(),
        }
    }

    /// Stops 1..=5 on a line, route 1 over 1→2→3, route 2 over 3→4→5.
    fn feed() -> StaticFeed {
        StaticFeed {
            stops: (1..=5)
                .map(|i| stop(i, 27.70 + 0.01 * i as f64, 85.31))
                .collect(),
            routes: vec![route(1, &[1, 2, 3]), route(2, &[3, 4, 5])],
        }
    }

    fn state_with(feed: StaticFeed) -> (AppState, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        let state = AppState::new(
            GraphHandle::from_feed(&feed).unwrap(),
            Arc::new(feed),
            SearchConfig::default(),
            FareSchedule::default(),
            PlanCache::new(&CacheConfig::default()),
            sink.clone(),
            None,
        );
        (state, sink)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_plan(state: &AppState, body: &str) -> (StatusCode, serde_json::Value) {
        let response = plan_trip(State(state.clone()), Bytes::from(body.to_string())).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn plan_returns_the_success_envelope() {
        let (state, _) = state_with(feed());
        let (status, body) =
            post_plan(&state, r#"{"origin": 1, "destination": 5}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["transferCount"], 1);
        assert_eq!(body["legs"].as_array().unwrap().len(), 2);
        assert_eq!(body["legs"][0]["routeId"], 1);
        assert_eq!(body["legs"][0]["boardStopName"], "Stop 1");
        assert!(body["totalFare"].as_f64().unwrap() > 0.0);
        assert!(body["carbonSavedKg"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn unreachable_destination_is_a_normal_negative() {
        let (state, _) = state_with(StaticFeed {
            stops: (1..=4)
                .map(|i| stop(i, 27.70 + 0.01 * i as f64, 85.31))
                .collect(),
            routes: vec![route(1, &[1, 2]), route(2, &[3, 4])],
        });
        let (status, body) =
            post_plan(&state, r#"{"origin": 1, "destination": 4}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["reason"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn bad_input_is_a_400_with_the_envelope() {
        let (state, _) = state_with(feed());

        let (status, body) = post_plan(&state, r#"{"origin": 1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "INVALID_INPUT");

        let (status, body) = post_plan(
            &state,
            r#"{"origin": {"lat": 200.0, "lon": 85.31}, "destination": 2}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "INVALID_INPUT");

        let (status, body) = post_plan(&state, r#"{"origin": 1, "destination": 99}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["reason"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn distant_coordinates_are_no_nearby_stop() {
        let (state, _) = state_with(feed());
        let (status, body) = post_plan(
            &state,
            r#"{"origin": {"lat": 26.0, "lon": 84.0}, "destination": 2}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["reason"], "NO_NEARBY_STOP");
    }

    #[tokio::test]
    async fn empty_corpus_is_data_unavailable() {
        let (state, _) = state_with(StaticFeed::default());
        let (status, body) =
            post_plan(&state, r#"{"origin": 1, "destination": 2}"#).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["reason"], "DATA_UNAVAILABLE");
    }

    #[tokio::test]
    async fn successful_plans_are_recorded() {
        let (state, sink) = state_with(feed());
        let (status, _) = post_plan(&state, r#"{"origin": 1, "destination": 3}"#).await;
        assert_eq!(status, StatusCode::OK);

        // Recording is spawned; give the task a chance to run.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let recorded = sink.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].board_stop, StopId(1));
        assert_eq!(recorded[0].alight_stop, StopId(3));
    }

    #[tokio::test]
    async fn repeated_requests_hit_the_cache() {
        let (state, _) = state_with(feed());
        let body = r#"{"origin": 1, "destination": 3}"#;

        let (_, first) = post_plan(&state, body).await;
        state.cache.run_pending_tasks().await;
        assert_eq!(state.cache.entry_count(), 1);

        let (_, second) = post_plan(&state, body).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn nearby_endpoint_lists_stops_in_range() {
        let (state, _) = state_with(feed());
        let query = NearbyStopsQuery {
            lat: 27.71,
            lon: 85.31,
            radius_km: Some(1.5),
            limit: None,
        };
        let Json(response) = nearby_stops(State(state), Query(query)).await.unwrap();

        let ids: Vec<u32> = response.stops.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(response.stops[0].distance_km < response.stops[1].distance_km);
    }

    #[tokio::test]
    async fn rebuild_publishes_and_invalidates() {
        let (state, _) = state_with(feed());
        let _ = post_plan(&state, r#"{"origin": 1, "destination": 3}"#).await;
        state.cache.run_pending_tasks().await;
        assert_eq!(state.cache.entry_count(), 1);

        let Json(response) = rebuild_graph(State(state.clone())).await.unwrap();
        assert_eq!(response.routes, 2);
        state.cache.run_pending_tasks().await;
        assert_eq!(state.cache.entry_count(), 0);
    }
}
