use thiserror::Error;

use super::{AggregatorError, ConfigError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Config error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
    #[error("Aggregator error: {source}")]
    Aggregator {
        #[from]
        source: AggregatorError,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

pub type AppResult<T> = Result<T, AppError>;
