//! Background scroll lock as a scoped view effect.
//!
//! The render layer reads [`ScrollLock::is_locked`] to decide whether the
//! page body may scroll. Holders acquire a [`ScrollGuard`]; the lock is
//! released when the last guard is dropped, on every exit path.

use std::cell::Cell;
use std::rc::Rc;

/// Shared background-scroll lock.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    /// Creates an unlocked scroll lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks background scrolling until the returned guard is dropped.
    #[must_use]
    pub fn acquire(&self) -> ScrollGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    /// Whether any guard is alive.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }
}

/// Keeps background scrolling locked while alive.
#[derive(Debug)]
pub struct ScrollGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}
