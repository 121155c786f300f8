mod api;
mod cli;
mod exposition;
mod router;
mod startup;
mod state;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cronwave_core::ConfigOverrides;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // .env must be loaded before clap reads CRONWAVE_CONFIG
    cronwave_core::config::load_dotenv();
    let cli = Cli::parse();

    let config = startup::resolve_config(&cli, ConfigOverrides::from_env())?;
    config.log_summary();

    let state = startup::build_app_state(&config)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_address)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_address))?;
    info!(addr = %config.listen_address, "Exporter listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Exporter stopped");
    Ok(())
}
