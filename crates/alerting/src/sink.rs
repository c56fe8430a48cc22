//! Alert delivery

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Alert delivery errors
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alert sink unavailable")]
    Unavailable,
}

/// A fired drowsiness alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Offset from stream start
    pub timestamp: Duration,
    /// Smoothed EAR that triggered the alert
    pub smoothed_ear: f32,
    /// Length of the low-EAR streak at firing time
    pub low_ear_frames: u32,
}

/// Destination for fired alerts (speaker, log, message bus, ...)
pub trait AlertSink {
    /// Deliver one alert. Failures are reported, never retried.
    fn notify(&mut self, event: &AlertEvent) -> Result<(), AlertError>;
}

/// Sink that writes alerts to the tracing log
#[derive(Debug, Default)]
pub struct LogAlertSink {
    delivered: usize,
}

impl LogAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of alerts logged
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl AlertSink for LogAlertSink {
    fn notify(&mut self, event: &AlertEvent) -> Result<(), AlertError> {
        self.delivered += 1;
        warn!(
            timestamp_s = event.timestamp.as_secs_f64(),
            smoothed_ear = event.smoothed_ear,
            low_ear_frames = event.low_ear_frames,
            "DROWSINESS ALERT"
        );
        Ok(())
    }
}
