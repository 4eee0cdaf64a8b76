//! VWAP Ports
//!
//! Port definitions (traits) for the VWAP execution scheduler.
//! These define the boundaries between the scheduling core and the
//! collaborators it treats as black boxes: time, market data and the
//! target-position execution primitive.

mod clock;
mod error;
mod execution;
mod market_data;

pub use clock::Clock;
pub use error::{PortError, PortResult};
pub use execution::{TargetPosition, TargetPositionGuard};
pub use market_data::{BarSeries, SeriesRequest};
