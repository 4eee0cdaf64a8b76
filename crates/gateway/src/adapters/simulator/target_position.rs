//! Simulated target-position task
//!
//! Stands in for the exchange-side controller: a background task that walks
//! the net position toward the last requested target, at most `lot_step`
//! lots per tick, and publishes every position change on the update stream.

use crate::messages::update::Update;
use crate::transport::Publisher;
use log::{debug, info};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use vwap_core::{PositionSnapshot, Quantity, Symbol};
use vwap_ports::{PortError, PortResult, TargetPosition};

/// Simulator fill behaviour
#[derive(Debug, Clone)]
pub struct TargetPositionConfig {
    pub symbol: Symbol,
    /// Maximum lots filled per tick
    pub lot_step: Quantity,
    /// Interval between fill attempts
    pub tick: Duration,
    /// Position held before the task starts
    pub initial_position: PositionSnapshot,
}

impl TargetPositionConfig {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            lot_step: 1,
            tick: Duration::from_millis(10),
            initial_position: PositionSnapshot::flat(),
        }
    }
}

pub struct SimulatedTargetPosition {
    symbol: Symbol,
    target_tx: watch::Sender<Quantity>,
    position_rx: watch::Receiver<PositionSnapshot>,
    cancelled: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl SimulatedTargetPosition {
    /// Spawn the background task on the current tokio runtime
    pub fn spawn(
        config: TargetPositionConfig,
        publisher: Box<dyn Publisher<Update> + Send + Sync>,
    ) -> Self {
        let initial = config.initial_position;
        let (target_tx, target_rx) = watch::channel(initial.net());
        let (position_tx, position_rx) = watch::channel(initial);

        let handle = tokio::spawn(run_fills(config.clone(), target_rx, position_tx, publisher));

        Self {
            symbol: config.symbol,
            target_tx,
            position_rx,
            cancelled: AtomicBool::new(false),
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Current simulated position
    pub fn position(&self) -> PositionSnapshot {
        *self.position_rx.borrow()
    }

    /// Last requested target
    pub fn target(&self) -> Quantity {
        *self.target_tx.borrow()
    }
}

async fn run_fills(
    config: TargetPositionConfig,
    mut target_rx: watch::Receiver<Quantity>,
    position_tx: watch::Sender<PositionSnapshot>,
    publisher: Box<dyn Publisher<Update> + Send + Sync>,
) {
    let step = config.lot_step.max(1);
    let mut interval = tokio::time::interval(config.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            changed = target_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = interval.tick() => {}
        }

        let target = *target_rx.borrow_and_update();
        let net = position_tx.borrow().net();
        if net == target {
            continue;
        }

        let position = PositionSnapshot::from_net(net + (target - net).clamp(-step, step));
        position_tx.send_replace(position);
        debug!(
            "[{}] Simulated fill: position {} -> {} (target {})",
            config.symbol,
            net,
            position.net(),
            target
        );

        if publisher.publish(&Update::position(position)).await.is_err() {
            debug!("[{}] Update stream closed, stopping fills", config.symbol);
            break;
        }
    }
}

impl TargetPosition for SimulatedTargetPosition {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn set_target_volume(&self, volume: Quantity) -> PortResult<()> {
        if self.is_cancelled() {
            return Err(PortError::TaskCancelled(self.symbol.clone()));
        }
        self.target_tx.send_replace(volume);
        Ok(())
    }

    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
        info!(
            "[{}] Target position task cancelled at position {}",
            self.symbol,
            self.position().net()
        );
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for SimulatedTargetPosition {
    fn drop(&mut self) {
        if let Some(handle) = self
            .handle
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            handle.abort();
        }
    }
}
