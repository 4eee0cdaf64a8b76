//! Order Schedule Builder
//!
//! Converts a fractional [`VolumeShareCurve`] into integer per-bucket
//! quantities by waterfall allocation against the remaining pool:
//!
//! ```text
//! remaining_qty  = target         remaining_mass = 1.0
//! for each bucket b (chronological):
//!     q(b)            = round(remaining_qty × share(b) / remaining_mass)
//!     remaining_qty  -= q(b)
//!     remaining_mass -= share(b)
//! ```
//!
//! The last bucket takes whatever quantity is left, so the schedule always
//! sums to the target exactly, for buy and sell programs alike.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use vwap_core::{Quantity, TimeBucket};

use crate::error::{Result, SchedulerError};
use crate::profile::VolumeShareCurve;

/// Quantity added to the cumulative target when `bucket` is first seen live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlice {
    pub bucket: TimeBucket,
    pub quantity: Quantity,
}

/// Integer per-bucket order schedule, in chronological order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSchedule {
    slices: Vec<ScheduledSlice>,
    target: Quantity,
}

impl OrderSchedule {
    /// Waterfall-allocate `target` across the curve
    pub fn build(curve: &VolumeShareCurve, target: Quantity) -> Result<Self> {
        if curve.is_empty() {
            return Err(SchedulerError::EmptyCurve);
        }

        let last = curve.len() - 1;
        let mut remaining_qty = target;
        let mut remaining_mass = 1.0_f64;
        let mut slices = Vec::with_capacity(curve.len());

        for (i, (bucket, share)) in curve.iter().enumerate() {
            let quantity = if i == last {
                remaining_qty
            } else if remaining_mass <= 0.0 {
                debug!("Probability mass exhausted at {bucket}, allocating remainder");
                remaining_qty
            } else {
                let ratio = (share / remaining_mass).clamp(0.0, 1.0);
                (remaining_qty as f64 * ratio).round() as Quantity
            };

            slices.push(ScheduledSlice { bucket, quantity });
            remaining_qty -= quantity;
            remaining_mass -= share;
        }

        Ok(Self { slices, target })
    }

    /// Quantity scheduled for `bucket`, `None` if the bucket is not scheduled
    pub fn quantity_for(&self, bucket: TimeBucket) -> Option<Quantity> {
        self.slices
            .iter()
            .find(|slice| slice.bucket == bucket)
            .map(|slice| slice.quantity)
    }

    pub fn contains(&self, bucket: TimeBucket) -> bool {
        self.quantity_for(bucket).is_some()
    }

    pub fn target(&self) -> Quantity {
        self.target
    }

    /// Sum of all scheduled quantities (always equals the target)
    pub fn total(&self) -> Quantity {
        self.slices.iter().map(|slice| slice.quantity).sum()
    }

    pub fn slices(&self) -> &[ScheduledSlice] {
        &self.slices
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledSlice> {
        self.slices.iter()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl fmt::Display for OrderSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slice in &self.slices {
            writeln!(f, "{}  {:>8}", slice.bucket, slice.quantity)?;
        }
        write!(f, "total     {:>8}", self.total())
    }
}
