use chrono::{DateTime, Utc};

/// Signed position quantity in lots (positive = long, negative = short)
/// Future: could become a newtype with lot-size validation
pub type Quantity = i64;

/// Traded volume of a bar, in lots
pub type Volume = i64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Symbol identifier for a tradeable instrument
pub type Symbol = String;

/// Nanoseconds per second, bar timestamps are epoch nanoseconds
pub const NANOS_PER_SEC: i64 = 1_000_000_000;
