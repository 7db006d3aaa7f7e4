//! Sliding-window metrics aggregation.
//!
//! A [`WindowAggregator`] retains the samples of a trailing time window
//! and summarises them on demand (mean, population standard deviation,
//! interpolated percentiles). It is safe to share behind an `Arc` between
//! any number of producers and reporters.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod sampler;

pub use config::{AggregatorConfig, RunConfig};
pub use error::{AggregatorError, AppError, AppResult, ConfigError};
pub use metrics::{PercentileRank, Report, Sample, Snapshot, WindowAggregator};
