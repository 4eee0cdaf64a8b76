//! Simulator adapters
//!
//! In-memory bar series and target-position task publishing onto the
//! update stream, for tests and historical replays.

mod series;
mod target_position;

pub use series::SimulatedBarSeries;
pub use target_position::{SimulatedTargetPosition, TargetPositionConfig};
