use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::Sample;

// ─── Point store ─────────────────────────────────────────────────

/// Arrival-ordered trailing window of samples.
///
/// Samples are appended at the back and expire from the front, so the
/// deque never needs compaction. The window length is owned by the
/// caller and passed to every eviction.
///
/// Timestamps passed to [`PointStore::push`] must be non-decreasing; a sample pushed with an older timestamp than
/// its predecessor is kept until everything in front of it has expired.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    samples: VecDeque<Sample>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sample`, then evict everything that fell out of the window
    /// relative to the new sample's timestamp. Returns the evicted count.
    pub fn push(&mut self, sample: Sample, window: Duration) -> usize {
        let now = sample.timestamp;
        self.samples.push_back(sample);
        self.evict_expired(now, window)
    }

    /// Pop every sample at the head whose age relative to `now` is at
    /// least the window, stopping at the first survivor.
    ///
    /// When nothing survives the deque ends up empty.
    pub fn evict_expired(&mut self, now: Instant, window: Duration) -> usize {
        let mut evicted = 0;
        while self
            .samples
            .front()
            .is_some_and(|s| now.saturating_duration_since(s.timestamp) >= window)
        {
            self.samples.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Copy of the retained values in arrival order.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Timestamp of the oldest retained sample.
    pub fn oldest(&self) -> Option<Instant> {
        self.samples.front().map(|s| s.timestamp)
    }
}
