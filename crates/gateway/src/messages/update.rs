//! Update notifications
//!
//! One `Update` is one change notification on the update stream. It may
//! carry a newly appended bar, a new position snapshot, both, or neither
//! (a bare wake-up, e.g. when the history finished loading).

use serde::{Deserialize, Serialize};
use vwap_core::{Bar, PositionSnapshot};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Bar appended to the series since the previous update
    pub bar: Option<Bar>,
    /// Position snapshot, present when long or short volume changed
    pub position: Option<PositionSnapshot>,
}

impl Update {
    /// Bare wake-up notification
    pub fn notify() -> Self {
        Self::default()
    }

    /// A new bar was appended
    pub fn bar(bar: Bar) -> Self {
        Self {
            bar: Some(bar),
            position: None,
        }
    }

    /// The position changed
    pub fn position(position: PositionSnapshot) -> Self {
        Self {
            bar: None,
            position: Some(position),
        }
    }

    /// A bar and a position change in the same notification
    pub fn both(bar: Bar, position: PositionSnapshot) -> Self {
        Self {
            bar: Some(bar),
            position: Some(position),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bar.is_none() && self.position.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(Update::notify().is_empty());

        let update = Update::both(Bar::new(1, 2), PositionSnapshot::new(3, 0));
        assert!(!update.is_empty());
        assert_eq!(update.bar.unwrap().volume, 2);
        assert_eq!(update.position.unwrap().net(), 3);

        let update = Update::position(PositionSnapshot::flat());
        assert!(update.bar.is_none());
    }
}
