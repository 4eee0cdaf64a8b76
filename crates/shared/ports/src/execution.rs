use std::sync::Arc;

use vwap_core::Quantity;

use crate::error::PortResult;

/// Port for the target-position execution primitive
///
/// The primitive owns a background task that works the live position of one
/// symbol toward the last requested target using child orders. Retrying
/// failed orders is its job, not the caller's.
pub trait TargetPosition: Send + Sync {
    /// Symbol this primitive manages
    fn symbol(&self) -> &str;

    /// Request a new target net position; last call wins
    fn set_target_volume(&self, volume: Quantity) -> PortResult<()>;

    /// Stop managing the position (halts the background task)
    fn cancel(&self);

    /// Whether `cancel` has been called
    fn is_cancelled(&self) -> bool;
}

/// Scoped ownership of a running target-position task
///
/// Cancels the underlying task exactly once: on [`release`](Self::release)
/// or when dropped, whichever comes first. Dropping covers early returns,
/// `?` propagation and the owning future being aborted.
pub struct TargetPositionGuard<T: TargetPosition + ?Sized> {
    target: Arc<T>,
    released: bool,
}

impl<T: TargetPosition + ?Sized> TargetPositionGuard<T> {
    pub fn acquire(target: Arc<T>) -> Self {
        Self {
            target,
            released: false,
        }
    }

    pub fn set_target_volume(&self, volume: Quantity) -> PortResult<()> {
        self.target.set_target_volume(volume)
    }

    pub fn symbol(&self) -> &str {
        self.target.symbol()
    }

    /// Cancel the task now
    pub fn release(mut self) {
        self.cancel_once();
    }

    fn cancel_once(&mut self) {
        if !self.released {
            self.released = true;
            self.target.cancel();
        }
    }
}

impl<T: TargetPosition + ?Sized> Drop for TargetPositionGuard<T> {
    fn drop(&mut self) {
        self.cancel_once();
    }
}
