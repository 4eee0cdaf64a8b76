//! Session time model
//!
//! Maps raw bar timestamps onto the two keys the volume profile is built on:
//! the time-of-day bucket and the trading day (session) the bar belongs to.

mod bucket;
mod calendar;
mod day;
mod window;

pub use bucket::TimeBucket;
pub use calendar::SessionCalendar;
pub use day::TradingDay;
pub use window::TradingWindow;
