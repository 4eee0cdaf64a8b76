//! Scheduler errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Insufficient history: need {required} complete trading days before today, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("No historical bars fall inside the trading window")]
    EmptyWindow,

    #[error("Volume share curve is empty")]
    EmptyCurve,

    #[error("History day length must be positive")]
    InvalidHistoryLength,
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
