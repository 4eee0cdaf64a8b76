use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

use super::{TimeBucket, TradingDay};
use crate::entities::Bar;
use crate::values::{NANOS_PER_SEC, Timestamp};

/// Exchange session calendar
///
/// Converts UTC bar timestamps into exchange-local wall time, then into
/// the bucket and trading day keys. Evening bars at or after
/// `rollover_hour` belong to the next trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCalendar {
    pub utc_offset: FixedOffset,
    pub rollover_hour: u32,
}

impl SessionCalendar {
    /// Default evening rollover hour of futures sessions
    pub const DEFAULT_ROLLOVER_HOUR: u32 = 18;

    pub fn new(utc_offset: FixedOffset, rollover_hour: u32) -> Self {
        Self {
            utc_offset,
            rollover_hour,
        }
    }

    /// Calendar east of UTC by `secs`, `None` if the offset is out of range
    pub fn from_offset_secs(secs: i32, rollover_hour: u32) -> Option<Self> {
        FixedOffset::east_opt(secs).map(|offset| Self::new(offset, rollover_hour))
    }

    /// UTC calendar with the default rollover hour
    pub fn utc() -> Self {
        Self::new(Utc.fix(), Self::DEFAULT_ROLLOVER_HOUR)
    }

    /// Local wall time of an epoch-nanosecond timestamp, truncated to seconds
    pub fn local_time(&self, timestamp_ns: i64) -> NaiveDateTime {
        let secs = timestamp_ns.div_euclid(NANOS_PER_SEC);
        let utc = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH);
        self.to_local(utc)
    }

    pub fn to_local(&self, timestamp: Timestamp) -> NaiveDateTime {
        timestamp.with_timezone(&self.utc_offset).naive_local()
    }

    pub fn time_bucket(&self, timestamp_ns: i64) -> TimeBucket {
        TimeBucket::new(self.local_time(timestamp_ns).time())
    }

    pub fn trading_day(&self, timestamp_ns: i64) -> TradingDay {
        TradingDay::from_local(self.local_time(timestamp_ns), self.rollover_hour)
    }

    /// Trading day of an arbitrary instant (e.g. "now" from a clock)
    pub fn trading_day_of(&self, timestamp: Timestamp) -> TradingDay {
        TradingDay::from_local(self.to_local(timestamp), self.rollover_hour)
    }

    /// Tag a bar with its trading day and bucket
    pub fn tag(&self, bar: &Bar) -> (TradingDay, TimeBucket) {
        let local = self.local_time(bar.timestamp_ns);
        (
            TradingDay::from_local(local, self.rollover_hour),
            TimeBucket::new(local.time()),
        )
    }
}

impl Default for SessionCalendar {
    fn default() -> Self {
        Self::utc()
    }
}
