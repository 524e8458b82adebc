use crate::error::{AlertError, Result};
use fabmon_common::types::Reading;
use std::collections::VecDeque;

/// Bounded, time-ordered buffer of the most recent readings for one
/// device, oldest first.
///
/// Fixed-capacity ring semantics: pushing at capacity silently evicts the
/// oldest reading.
pub struct ReadingWindow {
    capacity: usize,
    data: VecDeque<Reading>,
}

impl ReadingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            data: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a reading, evicting the oldest when capacity is exceeded.
    pub fn push(&mut self, reading: Reading) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(reading);
    }

    /// The most recent reading.
    pub fn latest(&self) -> Result<&Reading> {
        self.data.back().ok_or(AlertError::EmptyWindow)
    }

    /// The last `k` readings, oldest first.
    ///
    /// Callers treat [`AlertError::InsufficientData`] as "skip analysis",
    /// not as a failure.
    pub fn tail(&mut self, k: usize) -> Result<&[Reading]> {
        let held = self.data.len();
        if held < k {
            return Err(AlertError::InsufficientData { needed: k, held });
        }
        let slice = self.data.make_contiguous();
        Ok(&slice[held - k..])
    }

    /// All held readings, oldest first, as one contiguous slice.
    pub fn as_contiguous_slice(&mut self) -> &[Reading] {
        self.data.make_contiguous()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
