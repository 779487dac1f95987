//! EcoAQI batch pipeline: preprocess → train → explain.
//!
//! Takes no flags. Paths come from `ecoaqi.toml` (or `$ECOAQI_CONFIG`),
//! defaulting to `data/raw` and `data/processed`. Exits non-zero when any
//! stage fails.

use std::env;

use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use ecoaqi::config::AppConfig;
use ecoaqi::services::run_pipeline;

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_default_location()?;

    if let Err(e) = run_pipeline(&config) {
        error!(error = %e, "Pipeline aborted");
        return Err(e.into());
    }

    Ok(())
}
