//! Runner errors

use thiserror::Error;
use vwap_gateway::GatewayError;
use vwap_strategy::{ConfigError, DriverError};

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to read '{path}': {error}")]
    Io { path: String, error: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Bar at row {row} is not after the previous bar")]
    Unordered { row: usize },

    #[error("History file holds no bars")]
    EmptyHistory,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Driver task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
