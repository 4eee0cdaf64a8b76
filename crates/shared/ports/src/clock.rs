use vwap_core::Timestamp;

/// Source of "now" for the driver
///
/// The trading window starts at the exchange-local wall time of `now()`, and
/// the trading day of `now()` is "today": history from it is never averaged
/// into the profile. Replays pin it to the session being replayed.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
