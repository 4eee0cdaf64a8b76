//! VWAP Core Domain
//!
//! Pure domain types for the VWAP execution scheduler.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! - [`entities`]: bars and position snapshots as delivered by market data
//! - [`session`]: time buckets, trading days, the trading window and the
//!   calendar that maps bar timestamps onto them

pub mod entities;
pub mod session;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Bar, PositionSnapshot};
pub use session::{SessionCalendar, TimeBucket, TradingDay, TradingWindow};
pub use values::{NANOS_PER_SEC, Quantity, Symbol, Timestamp, Volume};
