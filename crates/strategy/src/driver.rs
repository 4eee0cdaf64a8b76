//! VWAP Execution Driver
//!
//! Runs one VWAP execution from start to finish:
//!
//! 1. **AwaitingHistory** - sleeps on the update stream until the bar series
//!    reports ready
//! 2. **Scheduling** - estimates the volume profile over the window starting
//!    when the driver was started and builds the order schedule
//! 3. **Trading** - on every live bar of a scheduled bucket, raises the
//!    cumulative target of the execution primitive; stops once the live
//!    position equals the target quantity
//!
//! The execution primitive is held by a [`TargetPositionGuard`] from the
//! moment trading starts, so it is cancelled exactly once however the driver
//! leaves `Trading`: completion, an error, the shutdown signal, or the task
//! being aborted.

use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::oneshot;
use uuid::Uuid;
use vwap_core::{Bar, PositionSnapshot, Quantity, SessionCalendar, TimeBucket, Timestamp};
use vwap_gateway::{Subscriber, Update};
use vwap_ports::{BarSeries, Clock, TargetPosition, TargetPositionGuard};
use vwap_scheduler::{OrderSchedule, ProfileEstimator};

use crate::config::VwapConfig;
use crate::error::{DriverError, Result};
use crate::state::{DriverState, ExecutionState, Step};

/// How the execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOutcome {
    /// Live position reached the target
    Done,
    /// Stopped by the shutdown signal
    Cancelled,
}

/// Final account of one execution
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub instance_id: String,
    pub outcome: DriverOutcome,
    /// Cumulative target committed to the execution primitive
    pub committed: Quantity,
    /// Last position seen on the update stream
    pub position: PositionSnapshot,
    /// Buckets that fired, in firing order
    pub fired: Vec<TimeBucket>,
    /// `None` if the driver stopped before scheduling
    pub schedule: Option<OrderSchedule>,
}

pub struct VwapDriver {
    id: String,
    config: VwapConfig,
    calendar: SessionCalendar,
    series: Arc<dyn BarSeries>,
    target: Arc<dyn TargetPosition>,
    updates: Box<dyn Subscriber<Update>>,
    clock: Arc<dyn Clock>,
    state: DriverState,
    execution: Option<ExecutionState>,
}

impl VwapDriver {
    pub fn new(
        config: VwapConfig,
        series: Arc<dyn BarSeries>,
        target: Arc<dyn TargetPosition>,
        updates: Box<dyn Subscriber<Update>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        let calendar = config.calendar()?;
        let id = format!("vwap-{}", &Uuid::new_v4().simple().to_string()[..8]);

        Ok(Self {
            id,
            config,
            calendar,
            series,
            target,
            updates,
            clock,
            state: DriverState::AwaitingHistory,
            execution: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &VwapConfig {
        &self.config
    }

    pub fn execution(&self) -> Option<&ExecutionState> {
        self.execution.as_ref()
    }

    /// Build the schedule for a session starting at `now` from `bars`
    pub fn plan(&self, bars: &[Bar], now: Timestamp) -> Result<OrderSchedule> {
        let today = self.calendar.trading_day_of(now);
        let window = self.config.window_at(&self.calendar, now);
        info!(
            "[{}] Scheduling {} for {} in window {} -> {} ({} bars of history)",
            self.id,
            self.config.symbol,
            today,
            window.start,
            window.end,
            bars.len()
        );

        let estimator =
            ProfileEstimator::new(self.calendar, window, self.config.history_day_length)
                .with_bucket_secs(self.config.bucket_secs);
        let curve = estimator.estimate(bars, today)?;
        info!("[{}] Volume share per bucket:\n{}", self.id, curve);

        let schedule = OrderSchedule::build(&curve, self.config.target_volume)?;
        info!("[{}] Order quantity per bucket:\n{}", self.id, schedule);
        Ok(schedule)
    }

    /// Enter `Trading` with a prepared schedule
    pub fn start_trading(&mut self, schedule: OrderSchedule) {
        self.execution = Some(ExecutionState::new(schedule, self.calendar));
        self.transition(DriverState::Trading);
    }

    /// Apply one update to the trading state
    ///
    /// Pure bookkeeping: the returned [`Step`] tells the caller which target
    /// to send. Updates outside `Trading` are ignored.
    pub fn apply(&mut self, update: &Update) -> Step {
        let Some(execution) = self.execution.as_mut() else {
            debug!("[{}] Ignoring update in {}", self.id, self.state);
            return Step::default();
        };
        if self.state.is_terminal() {
            warn!("[{}] Ignoring update in {}", self.id, self.state);
            return Step::default();
        }

        let step = execution.apply(update);
        if let Some(target) = step.target {
            info!(
                "[{}] Bucket reached, target position -> {}",
                self.id, target
            );
        }
        if step.completed {
            self.transition(DriverState::Done);
        }
        step
    }

    /// Run to completion; only a closed stream or an error stops it early
    pub async fn run(self) -> Result<ExecutionReport> {
        let (_shutdown_tx, shutdown_rx) = oneshot::channel();
        self.run_until(shutdown_rx).await
    }

    /// Run until completion or until `shutdown` fires
    ///
    /// The trading window and the current trading day are fixed by the clock
    /// on entry, however long the history takes to load. A dropped sender is
    /// not a shutdown request.
    pub async fn run_until(mut self, mut shutdown: oneshot::Receiver<()>) -> Result<ExecutionReport> {
        let started = self.clock.now();
        info!(
            "[{}] VWAP driver started at {}: {}",
            self.id,
            started,
            self.config.description()
        );
        let mut shutdown_armed = true;

        // AwaitingHistory
        while !self.series.is_ready().await {
            tokio::select! {
                signal = &mut shutdown, if shutdown_armed => {
                    if signal.is_ok() {
                        info!("[{}] Shutdown while awaiting history", self.id);
                        self.transition(DriverState::Cancelled);
                        return Ok(self.report(DriverOutcome::Cancelled));
                    }
                    shutdown_armed = false;
                }
                update = self.updates.next() => {
                    if update.is_err() {
                        warn!("[{}] Update stream closed while awaiting history", self.id);
                        return Err(DriverError::StreamClosed);
                    }
                }
            }
        }

        // Scheduling
        self.transition(DriverState::Scheduling);
        let bars = self.series.snapshot().await;
        let schedule = self.plan(&bars, started)?;

        // Trading
        let guard = TargetPositionGuard::acquire(self.target.clone());
        debug!("[{}] Holding target position of {}", self.id, guard.symbol());
        self.start_trading(schedule);

        loop {
            tokio::select! {
                signal = &mut shutdown, if shutdown_armed => {
                    if signal.is_ok() {
                        info!("[{}] Shutdown requested, cancelling execution", self.id);
                        guard.release();
                        self.transition(DriverState::Cancelled);
                        return Ok(self.report(DriverOutcome::Cancelled));
                    }
                    shutdown_armed = false;
                }
                update = self.updates.next() => {
                    let Ok(update) = update else {
                        warn!("[{}] Update stream closed while trading, cancelling execution", self.id);
                        guard.release();
                        return Err(DriverError::StreamClosed);
                    };
                    debug!("[{}] Update: {:?}", self.id, update);

                    let step = self.apply(&update);
                    if let Some(target) = step.target {
                        if let Err(e) = guard.set_target_volume(target) {
                            warn!("[{}] Failed to set target {}: {}", self.id, target, e);
                            guard.release();
                            return Err(e.into());
                        }
                    }
                    if step.completed {
                        guard.release();
                        let report = self.report(DriverOutcome::Done);
                        info!(
                            "[{}] Target reached: position {}, {} buckets fired",
                            self.id,
                            report.position.net(),
                            report.fired.len()
                        );
                        return Ok(report);
                    }
                }
            }
        }
    }

    fn transition(&mut self, next: DriverState) {
        info!("[{}] {} -> {}", self.id, self.state, next);
        self.state = next;
    }

    fn report(&self, outcome: DriverOutcome) -> ExecutionReport {
        let execution = self.execution.as_ref();
        ExecutionReport {
            instance_id: self.id.clone(),
            outcome,
            committed: execution.map(ExecutionState::committed).unwrap_or_default(),
            position: execution.map(ExecutionState::position).unwrap_or_default(),
            fired: execution.map(|e| e.fired().to_vec()).unwrap_or_default(),
            schedule: execution.map(|e| e.schedule().clone()),
        }
    }
}
