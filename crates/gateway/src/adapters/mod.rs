//! Market adapters
//!
//! Adapters implement the ports (bar series, target position) on top of a
//! concrete market. Only the in-process simulator ships here.

pub mod simulator;

pub use simulator::{SimulatedBarSeries, SimulatedTargetPosition, TargetPositionConfig};
