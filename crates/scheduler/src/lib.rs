//! VWAP Scheduler
//!
//! The forecasting half of the VWAP execution scheduler:
//! - **Profile Estimation**: predicts the share of a session's volume that
//!   each time bucket of the trading window captures, from history
//! - **Schedule Building**: turns that fractional profile into an integer
//!   per-bucket order quantity that sums exactly to the target
//!
//! ## Pipeline
//!
//! ```text
//! historical bars ──► ProfileEstimator ──► VolumeShareCurve
//!                      │ tag (day, bucket)
//!                      │ filter to window
//!                      │ keep complete days
//!                      │ last N days before today
//!                      │ per-day share, averaged
//!                                              │
//!                                              ▼
//!                     OrderSchedule::build (waterfall) ──► OrderSchedule
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vwap_scheduler::{OrderSchedule, ProfileEstimator};
//!
//! let estimator = ProfileEstimator::new(calendar, window, 20);
//! let curve = estimator.estimate(&bars, today)?;
//! let schedule = OrderSchedule::build(&curve, 300)?;
//! assert_eq!(schedule.total(), 300);
//! ```

pub mod error;
pub mod profile;
pub mod schedule;

// Re-export main types
pub use error::{Result, SchedulerError};
pub use profile::{ProfileEstimator, VolumeShareCurve};
pub use schedule::{OrderSchedule, ScheduledSlice};
