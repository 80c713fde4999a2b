//! # Merit Node
//!
//! Merit node binary: HTTP API over the leveling and reward dispatch
//! engine.

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod api;
mod config;
mod engine;
mod state;
#[cfg(test)]
mod testutil;

use config::NodeConfig;
use state::AppState;

/// Run the Merit node server.
pub async fn run_server(config: NodeConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config.bind_addr;
    let state = AppState::new(&config);

    let app = create_router(state);

    info!("listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router.
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Activity intake and progress query
        .route("/api/v1/activity", post(api::activity::submit_activity))
        .route("/api/v1/progress/:identity", get(api::activity::get_progress))
        // Out-of-band level-up notifications
        .route("/api/v1/notify", post(api::notify::notify_level_up))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env()?;
    info!("Merit node starting");

    run_server(config).await
}
