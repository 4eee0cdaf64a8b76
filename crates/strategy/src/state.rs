//! Execution state machine
//!
//! ```text
//! AwaitingHistory ──► Scheduling ──► Trading ──► Done
//!        │                              │
//!        └──────────► Cancelled ◄───────┘
//! ```
//!
//! [`ExecutionState`] is the synchronous core of `Trading`: it consumes one
//! update at a time and answers with the [`Step`] to take. It never talks to
//! the execution primitive itself.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use vwap_core::{PositionSnapshot, Quantity, SessionCalendar, TimeBucket};
use vwap_gateway::Update;
use vwap_scheduler::OrderSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverState {
    /// Waiting for the bar series to finish loading
    AwaitingHistory,
    /// Estimating the profile and building the schedule
    Scheduling,
    /// Following the schedule on live bars
    Trading,
    /// Position reached the target
    Done,
    /// Stopped from outside before completion
    Cancelled,
}

impl DriverState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DriverState::Done | DriverState::Cancelled)
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::AwaitingHistory => "AwaitingHistory",
            DriverState::Scheduling => "Scheduling",
            DriverState::Trading => "Trading",
            DriverState::Done => "Done",
            DriverState::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// What the driver must do after applying an update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Step {
    /// New cumulative target to send to the execution primitive
    pub target: Option<Quantity>,
    /// The live position reached the target quantity
    pub completed: bool,
}

/// Live progress through an [`OrderSchedule`]
#[derive(Debug, Clone)]
pub struct ExecutionState {
    schedule: OrderSchedule,
    calendar: SessionCalendar,
    /// Cumulative target committed so far
    committed: Quantity,
    position: PositionSnapshot,
    fired: HashSet<TimeBucket>,
    /// Fired buckets in firing order
    fired_order: Vec<TimeBucket>,
}

impl ExecutionState {
    pub fn new(schedule: OrderSchedule, calendar: SessionCalendar) -> Self {
        Self {
            schedule,
            calendar,
            committed: 0,
            position: PositionSnapshot::flat(),
            fired: HashSet::new(),
            fired_order: Vec::new(),
        }
    }

    /// Apply one update: the bar first, then the position
    ///
    /// A scheduled bucket fires on its first bar only. Completion is judged
    /// on position changes alone.
    pub fn apply(&mut self, update: &Update) -> Step {
        let mut step = Step::default();

        if let Some(bar) = &update.bar {
            let bucket = self.calendar.time_bucket(bar.timestamp_ns);
            let pending = self
                .schedule
                .quantity_for(bucket)
                .filter(|_| !self.has_fired(bucket));
            if let Some(quantity) = pending {
                self.fired.insert(bucket);
                self.fired_order.push(bucket);
                self.committed += quantity;
                step.target = Some(self.committed);
            }
        }

        if let Some(position) = update.position {
            self.position = position;
            step.completed = position.net() == self.schedule.target();
        }

        step
    }

    pub fn schedule(&self) -> &OrderSchedule {
        &self.schedule
    }

    pub fn committed(&self) -> Quantity {
        self.committed
    }

    pub fn position(&self) -> PositionSnapshot {
        self.position
    }

    pub fn has_fired(&self, bucket: TimeBucket) -> bool {
        self.fired.contains(&bucket)
    }

    pub fn fired(&self) -> &[TimeBucket] {
        &self.fired_order
    }
}
