//! Axum web server for the UI

use crate::{api, assets, VizConfig};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Shared application state
///
/// Read-only: requests never share results with each other.
pub struct AppState {
    pub config: VizConfig,
    pub started: Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: VizConfig) -> SharedState {
        Arc::new(Self {
            config,
            started: Instant::now(),
        })
    }
}

/// Build the router with all API routes and the static frontend
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/defaults", get(api::defaults))
        .route("/api/run", post(api::run))
        .route("/api/clarify", post(api::clarify))
        .route("/api/export/:file", post(api::export))
        .fallback(assets::static_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the UI
pub async fn serve(config: VizConfig, addr: &str) -> anyhow::Result<()> {
    let app = app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /api/health
async fn health(State(app): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "tmu-viz",
        "uptime_secs": app.started.elapsed().as_secs(),
    }))
}
