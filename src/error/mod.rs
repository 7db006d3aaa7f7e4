mod aggregator;
mod app;
mod config;

pub use aggregator::AggregatorError;
pub use app::{AppError, AppResult};
pub use config::ConfigError;
