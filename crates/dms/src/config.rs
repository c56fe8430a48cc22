//! DMS configuration

use serde::{Deserialize, Serialize};

use crate::DmsError;

/// Lowest threshold reachable through [`DmsConfig::nudge_threshold`]
pub const MIN_EAR_THRESHOLD: f32 = 0.10;
/// Highest threshold reachable through [`DmsConfig::nudge_threshold`]
pub const MAX_EAR_THRESHOLD: f32 = 0.35;

/// DMS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmsConfig {
    /// Smoothed EAR below this counts as eyes closed
    pub ear_threshold: f32,

    /// Consecutive low-EAR frames before the driver is flagged drowsy
    pub consecutive_frames: u32,

    /// Minimum time between two fired alerts (seconds)
    pub cooldown_seconds: f64,

    /// Number of raw EAR values averaged for smoothing
    pub history_len: usize,
}

impl Default for DmsConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.21,
            consecutive_frames: 20,
            cooldown_seconds: 3.0,
            history_len: 30,
        }
    }
}

impl DmsConfig {
    /// Create strict config (reacts sooner)
    pub fn strict() -> Self {
        Self {
            ear_threshold: 0.23,
            consecutive_frames: 10,
            ..Default::default()
        }
    }

    /// Create lenient config (fewer false alarms)
    pub fn lenient() -> Self {
        Self {
            ear_threshold: 0.18,
            consecutive_frames: 30,
            cooldown_seconds: 5.0,
            ..Default::default()
        }
    }

    /// Reject values the tracker cannot work with
    pub fn validate(&self) -> Result<(), DmsError> {
        if !self.ear_threshold.is_finite() || self.ear_threshold < 0.0 {
            return Err(DmsError::Config(format!(
                "ear_threshold must be a non-negative number, got {}",
                self.ear_threshold
            )));
        }
        if self.consecutive_frames == 0 {
            return Err(DmsError::Config("consecutive_frames must be at least 1".into()));
        }
        if !self.cooldown_seconds.is_finite() || self.cooldown_seconds < 0.0 {
            return Err(DmsError::Config(format!(
                "cooldown_seconds must be a non-negative number, got {}",
                self.cooldown_seconds
            )));
        }
        if self.history_len == 0 {
            return Err(DmsError::Config("history_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Shift the threshold by `delta`, clamped to the tuning range.
    ///
    /// Returns the new threshold.
    pub fn nudge_threshold(&mut self, delta: f32) -> f32 {
        self.ear_threshold = (self.ear_threshold + delta).clamp(MIN_EAR_THRESHOLD, MAX_EAR_THRESHOLD);
        self.ear_threshold
    }
}
