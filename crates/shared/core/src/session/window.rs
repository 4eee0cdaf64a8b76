use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::TimeBucket;

const SECONDS_PER_DAY: u32 = 86_400;

/// Daily time-of-day window the schedule trades in
///
/// Both ends are inclusive. When `end <= start` the window wraps midnight
/// (e.g. 23:00 -> 01:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TradingWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Window starting at `start` and spanning `span_secs` seconds
    pub fn from_span(start: NaiveTime, span_secs: u32) -> Self {
        let (end, _) = start.overflowing_add_signed(Duration::seconds(i64::from(span_secs)));
        Self { start, end }
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, bucket: TimeBucket) -> bool {
        let t = bucket.time();
        if self.wraps_midnight() {
            t >= self.start || t <= self.end
        } else {
            self.start <= t && t <= self.end
        }
    }

    /// Seconds elapsed from the window start to `bucket`, wrapping at midnight
    ///
    /// Sorting by this offset yields chronological order within the window.
    pub fn offset_of(&self, bucket: TimeBucket) -> u32 {
        let start = self.start.num_seconds_from_midnight();
        let t = bucket.seconds_from_midnight();
        (t + SECONDS_PER_DAY - start) % SECONDS_PER_DAY
    }
}
