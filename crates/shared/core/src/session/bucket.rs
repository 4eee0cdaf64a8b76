use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time-of-day slot of the trading day, keyed by the bar open time
///
/// Buckets are derived from bar timestamps, so their width is whatever the
/// bar series was subscribed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeBucket(NaiveTime);

impl TimeBucket {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Bucket at `hour:minute:second`, `None` if out of range
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }
}

impl From<NaiveTime> for TimeBucket {
    fn from(time: NaiveTime) -> Self {
        Self(time)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}
