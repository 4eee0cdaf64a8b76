//! VWAP Strategy
//!
//! The live half of the VWAP execution scheduler:
//! - Configuration of one execution ([`VwapConfig`])
//! - The execution state machine ([`DriverState`], [`ExecutionState`])
//! - The driver task that ties the bar series, the update stream and the
//!   target-position primitive together ([`VwapDriver`])
//!
//! ## Architecture
//!
//! ```text
//!   BarSeries ──snapshot──► ProfileEstimator ──► OrderSchedule
//!       │                                             │
//!       │ live bars                                   ▼
//!       └──────► Update stream ──────────────► ┌────────────┐
//!   TargetPosition ── position changes ──────► │ VwapDriver │
//!        ▲                                     └─────┬──────┘
//!        └──────────── set_target_volume ────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vwap_strategy::{VwapConfig, VwapDriver};
//!
//! let config = VwapConfig::from_file("vwap.json")?;
//! let driver = VwapDriver::new(config, series, target, updates, clock)?;
//! let report = driver.run_until(shutdown_rx).await?;
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod state;

// Re-export main types
pub use config::{ConfigError, VwapConfig};
pub use driver::{DriverOutcome, ExecutionReport, VwapDriver};
pub use error::{DriverError, Result};
pub use state::{DriverState, ExecutionState, Step};
