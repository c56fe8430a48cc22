//! Drowsiness Monitor - Main Entry Point
//!
//! Usage: `drowsiness-monitor [settings.toml]`

use alerting::LogAlertSink;
use anyhow::Context;
use dms::DrowsinessTracker;
use monitor::{init_logging, replay, ReplaySummary, Settings};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref()).context("loading settings")?;

    init_logging(&settings.log_level)?;

    info!("=== Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Detector settings: {:?}", settings.detector);

    let input: Box<dyn AsyncBufRead + Unpin> = if settings.input == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(&settings.input)
            .await
            .with_context(|| format!("opening replay input {}", settings.input))?;
        Box::new(BufReader::new(file))
    };

    let mut tracker = DrowsinessTracker::new(settings.detector.clone());
    let mut sink = LogAlertSink::new();

    tokio::select! {
        result = replay(input, tokio::io::stdout(), &mut tracker, &mut sink) => {
            let summary: ReplaySummary = result.context("replaying landmarks")?;
            info!(
                "Replay finished: {} frames, {} with face, {} drowsy, {} alerts",
                summary.frames, summary.faces, summary.drowsy_frames, summary.alerts
            );
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping");
        }
    }

    Ok(())
}
