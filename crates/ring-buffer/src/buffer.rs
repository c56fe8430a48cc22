//! Ring Buffer Implementation

/// Fixed-capacity FIFO that evicts its oldest value when full.
///
/// Storage grows up to `capacity` and is then reused in place, so a full
/// buffer never reallocates.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Backing storage, at most `capacity` long
    storage: Vec<T>,
    /// Maximum number of retained values
    capacity: usize,
    /// Index of the oldest value once the buffer is full
    head: usize,
    /// Total values pushed (for statistics)
    total_written: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with given capacity.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            total_written: 0,
        }
    }

    /// Push a value into the buffer (overwrites oldest if full)
    pub fn push(&mut self, value: T) {
        if self.storage.len() < self.capacity {
            self.storage.push(value);
        } else {
            self.storage[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
        self.total_written += 1;
    }

    /// Get the number of values currently in the buffer
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.storage.len() == self.capacity
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get fill ratio (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f64 {
        self.len() as f64 / self.capacity as f64
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        let (newer, older) = self.storage.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Most recently pushed value
    pub fn latest(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Get total values written (for statistics)
    pub fn total_written(&self) -> usize {
        self.total_written
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = 0;
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Read the last N values (most recent first)
    pub fn read_last(&self, count: usize) -> Vec<T> {
        self.iter().rev().take(count).cloned().collect()
    }
}

impl RingBuffer<f32> {
    /// Arithmetic mean of the buffered values.
    ///
    /// Accumulates in f64 so that a buffer filled with one repeated value
    /// averages to exactly that value.
    pub fn mean(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self.storage.iter().map(|&v| f64::from(v)).sum();
        Some((sum / self.len() as f64) as f32)
    }
}
