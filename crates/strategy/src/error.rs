//! Driver errors

use thiserror::Error;
use vwap_ports::PortError;
use vwap_scheduler::SchedulerError;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scheduling failed: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Execution primitive failed: {0}")]
    Execution(#[from] PortError),

    #[error("Update stream closed")]
    StreamClosed,
}

pub type Result<T> = std::result::Result<T, DriverError>;
