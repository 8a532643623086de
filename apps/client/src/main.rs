use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::config::Config;
use client::shell;
use client::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentIQ client v{}", env!("CARGO_PKG_VERSION"));
    info!("API server: {}", config.api_base_url);

    let state = AppState::new(config);

    // Restore-once before any route decision can be evaluated.
    state.session.restore();

    shell::run(state).await
}
