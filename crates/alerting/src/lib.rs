//! Alerting System
//!
//! Provides the cooldown gate that debounces repeated alerts and the sink
//! seam through which fired alerts are delivered (sound, log, ...).

mod manager;
mod sink;

pub use manager::CooldownGate;
pub use sink::{AlertError, AlertEvent, AlertSink, LogAlertSink};
