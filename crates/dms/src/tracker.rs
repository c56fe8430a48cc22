//! Drowsiness state tracker
//!
//! Smooths the per-frame EAR over a rolling window, counts consecutive
//! frames below threshold and fires cooldown-gated alerts.

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::analysis::FrameEvaluation;
use crate::detector::{Eye, FaceLandmarks};
use crate::ear::EarReading;
use crate::state::DriverState;
use crate::DmsConfig;

/// Drowsiness tracker for a single video stream
#[derive(Debug, Clone)]
pub struct DrowsinessTracker {
    config: DmsConfig,
    state: DriverState,
    started: Instant,
}

impl DrowsinessTracker {
    pub fn new(config: DmsConfig) -> Self {
        info!(
            "Creating drowsiness tracker: threshold={}, frames={}, cooldown={}s",
            config.ear_threshold, config.consecutive_frames, config.cooldown_seconds
        );
        Self {
            state: DriverState::new(&config),
            config,
            started: Instant::now(),
        }
    }

    /// Evaluate a frame, timestamped by the tracker's monotonic clock
    pub fn evaluate_frame(
        &mut self,
        landmarks: Option<&FaceLandmarks>,
        frame_width: u32,
        frame_height: u32,
    ) -> FrameEvaluation {
        let now = self.started.elapsed();
        self.evaluate_frame_at(landmarks, frame_width, frame_height, now)
    }

    /// Evaluate a frame captured `now` after stream start.
    ///
    /// `landmarks` are normalized; `None` means no face was found.
    pub fn evaluate_frame_at(
        &mut self,
        landmarks: Option<&FaceLandmarks>,
        frame_width: u32,
        frame_height: u32,
        now: Duration,
    ) -> FrameEvaluation {
        let Some(face) = landmarks else {
            if self.state.low_ear_frames > 0 {
                debug!("Face lost, low-EAR streak of {} reset", self.state.low_ear_frames);
            }
            // History is kept across tracking loss
            self.state.low_ear_frames = 0;
            return FrameEvaluation::no_face(now, self.state.alert_active);
        };

        let left = face.eye_in_pixels(Eye::Left, frame_width, frame_height);
        let right = face.eye_in_pixels(Eye::Right, frame_width, frame_height);
        let reading = EarReading::measure(&left, &right);

        self.state.ear_history.push(reading.combined);
        let smoothed = self.state.smoothed_ear().unwrap_or(reading.combined);

        let mut eval = FrameEvaluation::with_reading(now, reading, smoothed);

        if smoothed < self.config.ear_threshold {
            self.state.low_ear_frames = self.state.low_ear_frames.saturating_add(1);

            if self.state.low_ear_frames >= self.config.consecutive_frames {
                eval.is_drowsy = true;

                if self.state.alert_gate.try_fire(now) {
                    eval.alert_fired = true;
                    self.state.alert_active = true;
                }
            }
        } else {
            if self.state.alert_active {
                debug!("Eyes reopened (smoothed EAR {:.3}), alert cleared", smoothed);
            }
            self.state.low_ear_frames = 0;
            self.state.alert_active = false;
        }

        eval.alert_active = self.state.alert_active;
        eval.low_ear_frames = self.state.low_ear_frames;
        eval
    }

    pub fn config(&self) -> &DmsConfig {
        &self.config
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Takes effect on the next frame
    pub fn set_threshold(&mut self, ear_threshold: f32) {
        self.config.ear_threshold = ear_threshold;
    }

    /// Shift the threshold within the tuning range, returning the new value
    pub fn nudge_threshold(&mut self, delta: f32) -> f32 {
        let threshold = self.config.nudge_threshold(delta);
        info!("EAR threshold: {:.2}", threshold);
        threshold
    }

    pub fn set_consecutive_frames(&mut self, consecutive_frames: u32) {
        self.config.consecutive_frames = consecutive_frames;
    }

    pub fn set_cooldown_seconds(&mut self, cooldown_seconds: f64) {
        self.config.cooldown_seconds = cooldown_seconds;
        self.state.alert_gate.set_cooldown(cooldown_seconds);
    }

    /// Start over as a fresh stream
    pub fn reset(&mut self) {
        self.state.reset();
        self.started = Instant::now();
    }
}

impl Default for DrowsinessTracker {
    fn default() -> Self {
        Self::new(DmsConfig::default())
    }
}
