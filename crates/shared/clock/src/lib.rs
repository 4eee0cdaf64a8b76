//! VWAP Clock Infrastructure
//!
//! Two implementations of the [`Clock`] port:
//!
//! - [`SystemClock`]: wall-clock UTC time for live sessions
//! - [`FixedClock`]: frozen time that only moves when told to. Replays pin it
//!   to each live bar as it is pushed, so the driver plans its window and
//!   "today" from the replayed session instead of the wall clock.
//!
//! ## Usage
//!
//! ```ignore
//! use vwap_clock::{FixedClock, Clock};
//! use chrono::Duration;
//!
//! let clock = FixedClock::new(session_start);
//! clock.advance(Duration::minutes(5));
//! assert_eq!(clock.now(), session_start + Duration::minutes(5));
//! ```

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use vwap_ports::Clock;
