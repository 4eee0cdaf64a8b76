use serde::{Deserialize, Serialize};

use crate::values::Quantity;

/// Live position of one symbol as reported by the account
///
/// Long and short legs are reported separately (both non-negative);
/// the scheduler only ever looks at the net.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub volume_long: Quantity,
    pub volume_short: Quantity,
}

impl PositionSnapshot {
    pub fn new(volume_long: Quantity, volume_short: Quantity) -> Self {
        Self {
            volume_long,
            volume_short,
        }
    }

    /// Flat position
    pub fn flat() -> Self {
        Self::default()
    }

    /// Snapshot holding exactly `net` on the appropriate leg
    pub fn from_net(net: Quantity) -> Self {
        if net >= 0 {
            Self::new(net, 0)
        } else {
            Self::new(0, -net)
        }
    }

    /// Net position (long - short)
    pub fn net(&self) -> Quantity {
        self.volume_long - self.volume_short
    }

    pub fn is_flat(&self) -> bool {
        self.net() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_position() {
        assert_eq!(PositionSnapshot::new(10, 3).net(), 7);
        assert_eq!(PositionSnapshot::new(2, 5).net(), -3);
        assert!(PositionSnapshot::new(4, 4).is_flat());
    }

    #[test]
    fn test_from_net() {
        assert_eq!(PositionSnapshot::from_net(5), PositionSnapshot::new(5, 0));
        assert_eq!(PositionSnapshot::from_net(-5), PositionSnapshot::new(0, 5));
        assert!(PositionSnapshot::from_net(0).is_flat());
    }
}
