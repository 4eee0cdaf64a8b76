use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::values::{NANOS_PER_SEC, Timestamp, Volume};

/// One OHLCV record of a time-bucketed bar series
///
/// `timestamp_ns` is the bar open time in epoch nanoseconds (UTC).
/// Bucket and trading day are derived through a
/// [`SessionCalendar`](crate::SessionCalendar), never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp_ns: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Volume,
}

impl Bar {
    /// Create a bar carrying only a timestamp and a volume
    pub fn new(timestamp_ns: i64, volume: Volume) -> Self {
        Self {
            timestamp_ns,
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume,
        }
    }

    /// Set the OHLC prices
    pub fn with_prices(mut self, open: f64, high: f64, low: f64, close: f64) -> Self {
        self.open = open;
        self.high = high;
        self.low = low;
        self.close = close;
        self
    }

    /// Bar open time truncated to whole seconds
    pub fn timestamp(&self) -> Timestamp {
        let secs = self.timestamp_ns.div_euclid(NANOS_PER_SEC);
        DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}
