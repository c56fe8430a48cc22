//! Per-frame evaluation results

use alerting::AlertEvent;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ear::EarReading;

/// Outcome of evaluating one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameEvaluation {
    /// Frame time (seconds since stream start)
    pub timestamp_s: f64,

    /// Whether a face was detected
    pub face_detected: bool,

    /// Raw combined EAR of this frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear: Option<f32>,

    /// Mean of the EAR history after this frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed_ear: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_ear: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_ear: Option<f32>,

    /// Low-EAR streak has reached the required length
    pub is_drowsy: bool,

    /// An alert fired on this frame
    pub alert_fired: bool,

    /// An alert fired during the current low-EAR episode
    pub alert_active: bool,

    /// Current low-EAR streak
    pub low_ear_frames: u32,
}

impl FrameEvaluation {
    /// Result for a frame without a face
    pub(crate) fn no_face(now: Duration, alert_active: bool) -> Self {
        Self {
            timestamp_s: now.as_secs_f64(),
            alert_active,
            ..Default::default()
        }
    }

    pub(crate) fn with_reading(now: Duration, reading: EarReading, smoothed_ear: f32) -> Self {
        Self {
            timestamp_s: now.as_secs_f64(),
            face_detected: true,
            ear: Some(reading.combined),
            smoothed_ear: Some(smoothed_ear),
            left_ear: Some(reading.left),
            right_ear: Some(reading.right),
            ..Default::default()
        }
    }

    /// Alert to deliver, if one fired on this frame
    pub fn alert_event(&self) -> Option<AlertEvent> {
        if !self.alert_fired {
            return None;
        }
        Some(AlertEvent {
            timestamp: Duration::try_from_secs_f64(self.timestamp_s).unwrap_or_default(),
            smoothed_ear: self.smoothed_ear.unwrap_or_default(),
            low_ear_frames: self.low_ear_frames,
        })
    }
}
