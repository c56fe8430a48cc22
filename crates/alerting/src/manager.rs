//! Alert Cooldown Gate

use std::time::Duration;
use tracing::{debug, info};

/// Debounces alerts so two firings are always more than `cooldown_seconds` apart.
///
/// Timestamps are offsets from the start of the stream. The very first
/// request always fires.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    /// Minimum spacing between fired alerts (seconds)
    cooldown_seconds: f64,
    /// When the gate last fired
    last_fired: Option<Duration>,
    /// Number of times fired
    fire_count: usize,
}

impl CooldownGate {
    /// Create a new gate with the given cooldown
    pub fn new(cooldown_seconds: f64) -> Self {
        Self {
            cooldown_seconds,
            last_fired: None,
            fire_count: 0,
        }
    }

    /// Fire if the cooldown has elapsed, recording `now` as the last firing.
    ///
    /// Returns false without touching state while the cooldown is running.
    pub fn try_fire(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_fired {
            let since = now.saturating_sub(last).as_secs_f64();
            if since <= self.cooldown_seconds {
                debug!(
                    "Alert suppressed: {:.2}s since last, cooldown {:.2}s",
                    since, self.cooldown_seconds
                );
                return false;
            }
        }

        self.last_fired = Some(now);
        self.fire_count += 1;
        info!("Alert fired at {:.3}s (count: {})", now.as_secs_f64(), self.fire_count);
        true
    }

    /// Change the cooldown; applies to the next `try_fire`
    pub fn set_cooldown(&mut self, cooldown_seconds: f64) {
        self.cooldown_seconds = cooldown_seconds;
    }

    /// Current cooldown (seconds)
    pub fn cooldown_seconds(&self) -> f64 {
        self.cooldown_seconds
    }

    /// Time of the last firing, if any
    pub fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }

    /// Number of alerts fired so far
    pub fn fire_count(&self) -> usize {
        self.fire_count
    }

    /// Forget all firings
    pub fn reset(&mut self) {
        self.last_fired = None;
        self.fire_count = 0;
    }
}
