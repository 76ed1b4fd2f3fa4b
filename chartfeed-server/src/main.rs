mod error;
mod routes;
mod state;

use axum::Router;
use chartfeed::FeedConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use state::AppState;

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting chartfeed proxy server");

    let config = FeedConfig::from_env();
    if config.rapidapi_key.is_none() {
        tracing::warn!("RAPIDAPI_KEY not set; /api/coins, /api/list and /api/news will error");
    }

    let state = Arc::new(AppState::new(&config));

    let app = Router::new()
        .merge(routes::api_router())
        .route("/health", axum::routing::get(health))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = bind_addr();
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind server address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("Shutdown signal received, stopping");
}

/// Bind address, configurable via HTTP_ADDR (default: 0.0.0.0:3001).
fn bind_addr() -> SocketAddr {
    std::env::var("HTTP_ADDR")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| "0.0.0.0:3001".parse().expect("default address is valid"))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
