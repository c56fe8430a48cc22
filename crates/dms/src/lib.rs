//! Driver Monitoring System (DMS)
//!
//! Eye-closure based drowsiness detection from facial landmarks:
//! - Eye Aspect Ratio (EAR) from six contour points per eye
//! - Rolling-mean smoothing of the per-frame EAR
//! - Debounced low-EAR streak detection
//! - Cooldown-gated alert triggering
//!
//! Face and landmark detection is delegated to an external model behind
//! [`LandmarkDetector`].

pub mod analysis;
pub mod config;
pub mod detector;
pub mod ear;
pub mod state;
pub mod tracker;

pub use analysis::FrameEvaluation;
pub use config::DmsConfig;
pub use detector::{Eye, FaceLandmarks, LandmarkDetector};
pub use ear::{combined_ear, eye_aspect_ratio, EarReading, EyeLandmarks, Point};
pub use state::DriverState;
pub use tracker::DrowsinessTracker;

use image::RgbImage;
use std::time::Duration;
use thiserror::Error;

/// DMS error types
#[derive(Error, Debug)]
pub enum DmsError {
    #[error("Landmark detection failed: {0}")]
    Detection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Face mesh too short: need {required} landmarks, got {found}")]
    KeypointsMissing { required: usize, found: usize },
}

/// Driver monitoring module: a landmark detector feeding a tracker
pub struct DmsModule<D> {
    detector: D,
    tracker: DrowsinessTracker,
}

impl<D: LandmarkDetector> DmsModule<D> {
    /// Create a new DMS module with configuration
    pub fn new(detector: D, config: DmsConfig) -> Result<Self, DmsError> {
        config.validate()?;
        Ok(Self {
            detector,
            tracker: DrowsinessTracker::new(config),
        })
    }

    /// Analyze a single frame for driver state
    pub fn analyze(&mut self, frame: &RgbImage) -> Result<FrameEvaluation, DmsError> {
        let face = self.detector.detect(frame)?;
        Ok(self.tracker.evaluate_frame(face.as_ref(), frame.width(), frame.height()))
    }

    /// Analyze a frame captured `now` after stream start
    pub fn analyze_at(&mut self, frame: &RgbImage, now: Duration) -> Result<FrameEvaluation, DmsError> {
        let face = self.detector.detect(frame)?;
        Ok(self
            .tracker
            .evaluate_frame_at(face.as_ref(), frame.width(), frame.height(), now))
    }

    pub fn tracker(&self) -> &DrowsinessTracker {
        &self.tracker
    }

    /// Runtime tuning (threshold, frames, cooldown)
    pub fn tracker_mut(&mut self) -> &mut DrowsinessTracker {
        &mut self.tracker
    }

    /// Reset driver state (on driver change)
    pub fn reset_state(&mut self) {
        self.tracker.reset();
    }
}
