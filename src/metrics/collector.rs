use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;

use super::percentiles::{estimate_percentiles, PercentileRank};
use super::stats::mean_and_std_dev;
use super::store::PointStore;
use super::Sample;
use crate::config::AggregatorConfig;
use crate::error::AggregatorError;

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe sliding-window aggregator.
/// Producers call `add_point()`, reporters call `snapshot()`.
///
/// Eviction only runs on writes (and on `evict_expired()`), so a snapshot
/// reflects the window as of the last eviction pass, not as of "now".
/// After a long quiet period it may include samples slightly older than
/// the window.
#[derive(Debug)]
pub struct WindowAggregator {
    window: Duration,
    ranks: Vec<f64>,
    store: RwLock<PointStore>,
}

/// Summary of the retained samples at the moment of the call.
/// Owned by the caller; the aggregator keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub percentiles: BTreeMap<PercentileRank, f64>,
}

impl Snapshot {
    /// All-zero result for an empty window.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            std_dev: 0.0,
            percentiles: BTreeMap::new(),
        }
    }

    /// Look up an estimate by rank; `None` if it wasn't requested or the
    /// window was empty.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        PercentileRank::new(p).and_then(|rank| self.percentiles.get(&rank).copied())
    }

    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

// ─── WindowAggregator impl ───────────────────────────────────────

impl WindowAggregator {
    /// Ranks outside `[0, 100]` are kept but never appear in snapshots.
    pub fn new(
        window: Duration,
        ranks: impl IntoIterator<Item = f64>,
    ) -> Result<Self, AggregatorError> {
        if window.is_zero() {
            return Err(AggregatorError::InvalidConfiguration {
                reason: "window duration must be greater than zero".into(),
            });
        }

        let ranks: Vec<f64> = ranks.into_iter().collect();
        if !ranks.is_empty() && ranks.iter().all(|&p| PercentileRank::new(p).is_none()) {
            tracing::warn!(?ranks, "No requested percentile rank is within [0, 100]");
        }
        tracing::debug!(window_ms = window.as_millis() as u64, ?ranks, "Aggregator created");

        Ok(Self {
            window,
            ranks,
            store: RwLock::new(PointStore::new()),
        })
    }

    pub fn from_config(config: &AggregatorConfig) -> Result<Self, AggregatorError> {
        let window = config
            .window()
            .map_err(|err| AggregatorError::InvalidConfiguration {
                reason: err.to_string(),
            })?;
        Self::new(window, config.percentiles.iter().copied())
    }

    /// Record a value observed now.
    pub fn add_point(&self, value: f64) {
        self.add_point_at(value, Instant::now());
    }

    /// Record a value with a caller-supplied timestamp.
    /// Timestamps must be non-decreasing across calls. A NaN value is not
    /// stored, but the eviction pass still runs against `timestamp`.
    pub fn add_point_at(&self, value: f64, timestamp: Instant) {
        let mut store = self.store.write();
        let evicted = if value.is_nan() {
            tracing::debug!("Dropping NaN sample");
            store.evict_expired(timestamp, self.window)
        } else {
            store.push(Sample::new(value, timestamp), self.window)
        };
        drop(store);

        if evicted > 0 {
            tracing::trace!(evicted, "Evicted expired samples");
        }
    }

    /// Evict against the current clock without adding a sample.
    /// Used by the background sweeper.
    pub fn evict_expired(&self) -> usize {
        self.store.write().evict_expired(Instant::now(), self.window)
    }

    /// Copy the retained values under the read lock, then sort and
    /// summarise the copy outside it. Never evicts.
    pub fn snapshot(&self) -> Snapshot {
        let mut values = self.store.read().values();
        if values.is_empty() {
            return Snapshot::empty();
        }

        values.sort_by(f64::total_cmp);
        let (mean, std_dev) = mean_and_std_dev(&values);

        Snapshot {
            count: values.len(),
            mean,
            std_dev,
            percentiles: estimate_percentiles(&values, &self.ranks),
        }
    }

    /// Wipe all retained samples.
    pub fn reset(&self) {
        self.store.write().clear();
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn ranks(&self) -> &[f64] {
        &self.ranks
    }
}
