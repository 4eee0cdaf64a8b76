use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading session a timestamp belongs to
///
/// Evening bars (at or after the rollover hour) belong to the next session,
/// and sessions never fall on a weekend: Friday night and the whole weekend
/// roll forward to Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TradingDay(NaiveDate);

impl TradingDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Normalize an exchange-local timestamp into its trading day
    pub fn from_local(local: NaiveDateTime, rollover_hour: u32) -> Self {
        let mut date = local.date();
        if local.hour() >= rollover_hour {
            date = next_day(date);
        }
        while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date = next_day(date);
        }
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    // Saturates at NaiveDate::MAX
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

impl fmt::Display for TradingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
