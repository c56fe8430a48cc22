//! Fixed-Capacity Ring Buffer
//!
//! Provides a bounded FIFO that overwrites its oldest entry once full.
//! Used for the rolling per-frame signal history of the DMS tracker.

mod buffer;

pub use buffer::RingBuffer;
