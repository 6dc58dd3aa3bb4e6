//! Reentrancy lock.
//!
//! Custody moves call into externally supplied bank implementations. The
//! lock is held for the whole of every mutating ledger operation, so a
//! nested entry (from a callback that found its way back to the ledger)
//! is rejected instead of observing half-applied state.

use dotc_types::{DotcError, Result};

#[derive(Debug, Default)]
pub struct ReentrancyLock {
    entered: bool,
}

impl ReentrancyLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Take the lock.
    ///
    /// # Errors
    /// [`DotcError::ReentrantCall`] if it is already held.
    pub fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Err(DotcError::ReentrantCall);
        }
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.entered = false;
    }
}
