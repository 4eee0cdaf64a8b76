//! VWAP Runner - Historical Replay
//!
//! Replays one VWAP execution over a CSV bar history:
//!
//! - **History**: CSV loading and the history / live-session split
//! - **Session**: wiring of the driver, the simulators and a pinned clock
//!
//! ## Architecture
//!
//! ```text
//!   bars.csv ──► history::load_bars ──► split_session
//!                                          │
//!                     ┌────────────────────┴──────────────────┐
//!                     ▼                                       ▼
//!              history bars                            live bars (paced)
//!                     │                                       │
//!          ┌──────────▼───────────────────────────────────────▼───┐
//!          │ ReplaySession                                         │
//!          │   SimulatedBarSeries ─┐                               │
//!          │   SimulatedTargetPosition ─┼─► Update ─► VwapDriver   │
//!          │   FixedClock ──────────────────────────────┘          │
//!          └───────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod session;

// Re-export main types
pub use config::RunnerConfig;
pub use error::{Result, RunnerError};
pub use history::{load_bars, read_bars, split_session};
pub use session::ReplaySession;
