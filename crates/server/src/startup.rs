//! Server startup: configuration resolution, signal wiring, shutdown.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, info, warn};

use cronwave_core::{Config, ConfigOverrides};
use cronwave_signals::{standard_registry, BuildInfo};

use crate::cli::Cli;
use crate::state::AppState;

/// Resolve the process configuration: defaults, then the optional config
/// file, then `env`, then CLI flags.
pub fn resolve_config(cli: &Cli, env: ConfigOverrides) -> anyhow::Result<Config> {
    let file = match &cli.config {
        Some(path) => {
            let layer = ConfigOverrides::from_file(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            if layer.is_empty() {
                warn!(path = %path.display(), "Config file sets no values");
            } else {
                info!(path = %path.display(), "Loaded config file");
            }
            layer
        }
        None => ConfigOverrides::default(),
    };

    let flags = cli.overrides();
    for (source, layer) in [("environment", &env), ("flags", &flags)] {
        if !layer.is_empty() {
            debug!(source, "Applying configuration overrides");
        }
    }

    Config::resolve(&[file, env, flags]).context("invalid configuration")
}

/// Build the signal registry and wrap it in `AppState`.
///
/// The oscillation's phase origin is the moment this runs.
pub fn build_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let started_at = Utc::now();
    let build = BuildInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let registry =
        standard_registry(config, started_at, build).context("failed to register signals")?;
    info!(signals = registry.len(), "Signal registry ready");

    Ok(Arc::new(AppState {
        registry: Arc::new(registry),
        started_at,
    }))
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler, waiting for ctrl_c only");
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }

    info!("Shutdown signal received");
}
