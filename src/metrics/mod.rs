pub mod collector;
pub mod percentiles;
pub mod report;
pub mod stats;
pub mod store;
pub mod sweeper;

use std::time::Instant;

pub use collector::{Snapshot, WindowAggregator};
pub use percentiles::{estimate_percentiles, PercentileRank};
pub use report::Report;
pub use stats::mean_and_std_dev;
pub use store::PointStore;

/// A single measurement held by the point store.
/// Created by `add_point`, dropped only by eviction — never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// When the value was observed (producer clock, non-decreasing)
    pub timestamp: Instant,
    /// The observed scalar
    pub value: f64,
}

impl Sample {
    pub fn new(value: f64, timestamp: Instant) -> Self {
        Self { timestamp, value }
    }
}
