use thiserror::Error;

/// Errors raised by collaborator implementations behind the ports
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("Target position rejected for {symbol}: {reason}")]
    TargetRejected { symbol: String, reason: String },

    #[error("Target position task for {0} is cancelled")]
    TaskCancelled(String),
}

pub type PortResult<T> = std::result::Result<T, PortError>;
