//! Replay host entry point for the provenance ledger.
//!
//! Loads the host configuration (admin identity and genesis height), installs
//! structured logging, then replays a YAML call script against a fresh ledger.
//! Each step's outcome is written to stdout as one JSON line, followed by the
//! final ledger snapshot.
//!
//! ```text
//! PROVENANCE_CONFIG=provenance-config.yaml provenance-replay script.yaml
//! ```

mod config;
mod error;
mod replay;
mod script;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{HostConfig, LogFormat, LoggingConfig};
use crate::replay::Replayer;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "PROVENANCE_CONFIG";

/// Config file used when [`CONFIG_ENV`] is unset.
const DEFAULT_CONFIG_PATH: &str = "provenance-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the script, or a clock step is invalid.
fn main() -> anyhow::Result<()> {
    let config_path = std::env::var(CONFIG_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = HostConfig::from_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    init_logging(&config.logging);
    info!(
        admin = config.ledger.admin,
        genesis_height = config.ledger.genesis_height,
        "configuration loaded"
    );

    let script_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: provenance-replay <script.yaml>")?;
    let steps = script::load(&script_path)
        .with_context(|| format!("loading {}", script_path.display()))?;
    info!(steps = steps.len(), script = %script_path.display(), "script loaded");

    let replayer = Replayer::new(config.ledger.admin_principal(), config.ledger.genesis());
    let outcomes = replayer.run(&steps)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for outcome in &outcomes {
        writeln!(out, "{}", serde_json::to_string(outcome)?)?;
    }
    writeln!(out, "{}", serde_json::to_string(&replayer.snapshot())?)?;

    info!(
        steps = outcomes.len(),
        events = replayer.ledger().events().len(),
        "replay complete"
    );
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
