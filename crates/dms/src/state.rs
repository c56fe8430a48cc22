//! Driver state tracking

use alerting::CooldownGate;
use ring_buffer::RingBuffer;

use crate::DmsConfig;

/// Per-stream detector state, mutated once per frame
#[derive(Debug, Clone)]
pub struct DriverState {
    /// Most recent raw EAR values (smoothing window)
    pub ear_history: RingBuffer<f32>,

    /// Consecutive frames with smoothed EAR below threshold
    pub low_ear_frames: u32,

    /// Gate holding the last alert time
    pub alert_gate: CooldownGate,

    /// Set when an alert fires, cleared once the eyes reopen
    pub alert_active: bool,
}

impl DriverState {
    pub fn new(config: &DmsConfig) -> Self {
        Self {
            ear_history: RingBuffer::new(config.history_len),
            low_ear_frames: 0,
            alert_gate: CooldownGate::new(config.cooldown_seconds),
            alert_active: false,
        }
    }

    /// Mean of the EAR history
    pub fn smoothed_ear(&self) -> Option<f32> {
        self.ear_history.mean()
    }

    /// Reset state (on driver change)
    pub fn reset(&mut self) {
        self.ear_history.clear();
        self.low_ear_frames = 0;
        self.alert_gate.reset();
        self.alert_active = false;
    }
}
