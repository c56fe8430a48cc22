//! Drowsiness Monitor
//!
//! Runs the DMS tracker over recorded landmark streams: settings loading,
//! logging setup and the replay driver used by the `drowsiness-monitor` binary.

pub mod replay;
pub mod settings;

pub use replay::{replay, ReplayError, ReplayRecord, ReplaySummary};
pub use settings::{Settings, SettingsError};

use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging to stderr; stdout carries the evaluations.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let max_level = Level::from_str(level)
        .map_err(|_| anyhow::anyhow!("unknown log level {:?}", level))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
