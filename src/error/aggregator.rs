use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregatorError {
    /// Raised only at construction; no aggregator is produced.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}
