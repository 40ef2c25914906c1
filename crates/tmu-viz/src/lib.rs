//! # tmu-viz
//!
//! Browser front-end for tmu.
//! Serves an embedded single-page UI and a small JSON API over an Axum web
//! server. Every API call carries the full form state, so the server keeps no
//! per-user session.

mod api;
mod assets;
mod server;

pub use api::{DefaultsResponse, RunResponse};
pub use server::{app, AppState, SharedState};

use tmu_core::ServerConfig;
use tracing::info;

/// Configuration for the UI server
#[derive(Debug, Clone)]
pub struct VizConfig {
    /// Interface to bind
    pub host: String,
    /// Port to serve on
    pub port: u16,
    /// Open browser automatically on launch
    pub open_browser: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for VizConfig {
    fn from(config: ServerConfig) -> Self {
        Self {
            host: config.host,
            port: config.port,
            open_browser: config.open_browser,
        }
    }
}

/// Run the UI server until the process is stopped
pub async fn run(config: VizConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let url = format!("http://localhost:{}", config.port);

    info!("Starting tmu-viz server on {}", addr);

    // Spawn browser opener
    if config.open_browser {
        let url_clone = url.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url_clone) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        });
    }

    println!("tmu running at {}", url);
    println!("Press Ctrl+C to stop");

    server::serve(config, &addr).await
}
