//! EcoAQI dashboard server.
//!
//! Loads the fitted model, makes sure the history log exists, and serves the
//! dashboard page and its JSON API.
//!
//! # Usage
//!
//! ```bash
//! # Train first so data/processed/model/aqi_model.json exists
//! cargo run --bin ecoaqi-pipeline
//! cargo run --bin ecoaqi-server
//! ```
//!
//! # Environment Variables
//!
//! - `ECOAQI_CONFIG`: Path to a config file (default: search for `ecoaqi.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ecoaqi::config::AppConfig;
use ecoaqi::http::{create_router, AppState};
use ecoaqi::services::DashboardService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting EcoAQI dashboard");

    let config = AppConfig::from_default_location()?.with_env_overrides();
    let dashboard = DashboardService::load(&config.paths)?;
    info!(
        history = %config.paths.history_file.display(),
        "Dashboard service initialized"
    );

    let app = create_router(AppState::new(dashboard));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
