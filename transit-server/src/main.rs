use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_server::cache::{CacheConfig, PlanCache};
use transit_server::fare::FareSchedule;
use transit_server::feed::FileFeed;
use transit_server::graph::GraphHandle;
use transit_server::planner::SearchConfig;
use transit_server::trips::LogSink;
use transit_server::walking::osrm::{OsrmClient, OsrmConfig};
use transit_server::web::{AppState, create_router};

/// How often to reload the feed and republish the graph (5 minutes).
const DEFAULT_REBUILD_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let feed_path =
        std::env::var("TRANSIT_FEED_PATH").unwrap_or_else(|_| "data/feed.json".to_string());
    let feed = Arc::new(FileFeed::new(&feed_path));

    // Fail fast: a server with no graph can only answer DATA_UNAVAILABLE.
    let graph = GraphHandle::from_feed(feed.as_ref())
        .expect("failed to load the approved feed at startup");
    info!(path = %feed_path, "initial graph built");

    let osrm = match std::env::var("TRANSIT_OSRM_URL") {
        Ok(url) => match OsrmClient::new(OsrmConfig::new(url)) {
            Ok(client) => Some(client),
            Err(e) => {
                error!(%e, "could not construct OSRM client, walking legs stay straight-line");
                None
            }
        },
        Err(_) => None,
    };

    let state = AppState::new(
        graph.clone(),
        feed.clone(),
        SearchConfig::default(),
        FareSchedule::default(),
        PlanCache::new(&CacheConfig::default()),
        Arc::new(LogSink),
        osrm,
    );

    // Periodic feed reload. Failures keep the previous snapshot live.
    let rebuild_interval = std::env::var("TRANSIT_REBUILD_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REBUILD_INTERVAL);
    let rebuild_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(rebuild_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match rebuild_state.graph.rebuild(rebuild_state.feed.as_ref()).await {
                Ok(stats) => {
                    rebuild_state.cache.invalidate_all();
                    info!(
                        stops = stats.stops,
                        routes = stats.routes,
                        "periodic graph rebuild complete"
                    );
                }
                Err(e) => error!(%e, "periodic graph rebuild failed, keeping previous snapshot"),
            }
        }
    });

    let app = create_router(state);

    let addr: SocketAddr = std::env::var("TRANSIT_BIND")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .expect("TRANSIT_BIND must be a socket address");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    info!(%addr, "transit server listening");

    axum::serve(listener, app).await.expect("server error");
}
