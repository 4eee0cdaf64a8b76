use chrono::Utc;
use vwap_core::Timestamp;
use vwap_ports::Clock;

/// Wall clock for live sessions
///
/// The driver reads it once on start to pick its trading window and
/// trading day; replays use [`FixedClock`](crate::FixedClock) instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_tracks_wall_clock() {
        let before = Utc::now();
        let now = SystemClock.now();
        let after = Utc::now();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.now() - first >= Duration::milliseconds(5));
    }
}
