//! Replay session
//!
//! Wires the driver to the simulators and replays the last trading day of a
//! bar history as the live session:
//!
//! ```text
//! CSV ──► history bars ──► SimulatedBarSeries ──┐
//!    └──► live bars ─────► push_live (paced) ───┤ Update stream
//!              SimulatedTargetPosition fills ───┴──► VwapDriver
//! ```
//!
//! The clock is pinned to the first live bar and follows the replay. Once
//! the live bars run out, the fills get a grace period; a driver still
//! trading after that is shut down and reports `Cancelled`.

use log::{info, warn};
use std::sync::Arc;
use tokio::sync::oneshot;
use vwap_clock::FixedClock;
use vwap_core::Bar;
use vwap_gateway::adapters::{SimulatedBarSeries, SimulatedTargetPosition, TargetPositionConfig};
use vwap_gateway::{ChannelPublisher, GatewayError, TransportError, Update};
use vwap_strategy::{ExecutionReport, VwapDriver};

use crate::config::RunnerConfig;
use crate::error::{Result, RunnerError};
use crate::history::{load_bars, split_session};

const UPDATE_CAPACITY: usize = 1024;

pub struct ReplaySession {
    config: RunnerConfig,
}

impl ReplaySession {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Load the configured CSV and replay it
    pub async fn run_from_file(&self) -> Result<ExecutionReport> {
        let bars = load_bars(&self.config.history_path)?;
        self.run(bars).await
    }

    /// Replay `bars`: all but the last trading day form the history
    pub async fn run(&self, bars: Vec<Bar>) -> Result<ExecutionReport> {
        let vwap = self.config.vwap.clone();
        let calendar = vwap.calendar()?;
        let (history, live) = split_session(bars, &calendar)?;
        let session_start = live
            .first()
            .map(Bar::timestamp)
            .ok_or(RunnerError::EmptyHistory)?;
        info!(
            "Replaying {}: {} history bars, {} live bars from {}",
            vwap.symbol,
            history.len(),
            live.len(),
            session_start
        );

        let (publisher, updates) = ChannelPublisher::<Update>::pair(UPDATE_CAPACITY);
        let series = Arc::new(SimulatedBarSeries::new(
            vwap.series_request(),
            Box::new(publisher.clone()),
        ));
        series.load_history(history).await?;

        let target = Arc::new(SimulatedTargetPosition::spawn(
            TargetPositionConfig {
                lot_step: self.config.lot_step,
                tick: self.config.pace,
                ..TargetPositionConfig::new(vwap.symbol.clone())
            },
            Box::new(publisher),
        ));

        let clock = Arc::new(FixedClock::new(session_start));
        let driver = VwapDriver::new(vwap, series.clone(), target, Box::new(updates), clock.clone())?;
        let driver_id = driver.id().to_string();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let mut handle = tokio::spawn(driver.run_until(shutdown_rx));

        if delivered(series.mark_ready().await)? {
            for bar in live {
                if handle.is_finished() {
                    break;
                }
                clock.set_time(bar.timestamp());
                if !delivered(series.push_live(bar).await)? {
                    break;
                }
                tokio::time::sleep(self.config.pace).await;
            }
        }

        let joined = match tokio::time::timeout(self.config.grace, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(
                    "[{}] Target not reached {:?} after the last bar, shutting down",
                    driver_id, self.config.grace
                );
                // Err only if the driver finished in the meantime
                let _ = shutdown_tx.send(());
                handle.await
            }
        };

        let report = joined.map_err(|e| RunnerError::Task(e.to_string()))??;
        info!(
            "[{}] Replay finished: {:?}, committed {}, position {}, {} buckets fired",
            report.instance_id,
            report.outcome,
            report.committed,
            report.position.net(),
            report.fired.len()
        );
        Ok(report)
    }
}

/// `false` once the driver has dropped the update stream; its own result
/// then tells why
fn delivered(result: std::result::Result<(), GatewayError>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(GatewayError::Transport(TransportError::ChannelClosed)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
