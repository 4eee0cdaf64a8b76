//! Replay configuration

use std::path::PathBuf;
use std::time::Duration;
use vwap_core::Quantity;
use vwap_strategy::VwapConfig;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// The execution to replay
    pub vwap: VwapConfig,
    /// CSV bar history, the last trading day is replayed live
    pub history_path: PathBuf,
    /// Lots the simulator fills per tick
    pub lot_step: Quantity,
    /// Delay between live bars, also the simulator tick
    pub pace: Duration,
    /// Time allowed for fills after the last live bar
    pub grace: Duration,
}

impl RunnerConfig {
    pub fn new(vwap: VwapConfig, history_path: impl Into<PathBuf>) -> Self {
        Self {
            vwap,
            history_path: history_path.into(),
            lot_step: 1,
            pace: Duration::from_millis(10),
            grace: Duration::from_secs(1),
        }
    }

    pub fn with_lot_step(mut self, lot_step: Quantity) -> Self {
        self.lot_step = lot_step.max(1);
        self
    }

    /// Pace in milliseconds, at least 1
    pub fn with_pace_ms(mut self, pace_ms: u64) -> Self {
        self.pace = Duration::from_millis(pace_ms.max(1));
        self
    }

    pub fn with_grace_ms(mut self, grace_ms: u64) -> Self {
        self.grace = Duration::from_millis(grace_ms);
        self
    }
}
