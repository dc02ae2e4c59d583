// Copyright 2024 ihciah. All Rights Reserved.

use std::mem;

use parking_lot::{Condvar, Mutex};

/// One-shot wakeup handle owned by a single blocked `pop` call.
///
/// The slot is filled at most once, by exactly one producer-side call:
/// either a `push` handing over its payload or `close` marking the queue
/// closed. The blocked side loops on the condvar, so a spurious wakeup can
/// never leak a `Pending` slot out of [`Waiter::wait`].
pub(crate) struct Waiter<T> {
    slot: Mutex<WaitSlot<T>>,
    cond: Condvar,
}

enum WaitSlot<T> {
    Pending,
    Item(T),
    Closed,
}

impl<T> Waiter<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slot: Mutex::new(WaitSlot::Pending),
            cond: Condvar::new(),
        }
    }

    /// Hands the payload to the blocked call and wakes it.
    pub(crate) fn deliver(&self, item: T) {
        let mut slot = self.slot.lock();
        debug_assert!(
            matches!(*slot, WaitSlot::Pending),
            "waiter signaled twice"
        );
        *slot = WaitSlot::Item(item);
        self.cond.notify_one();
    }

    /// Wakes the blocked call with no payload.
    pub(crate) fn close(&self) {
        let mut slot = self.slot.lock();
        debug_assert!(
            matches!(*slot, WaitSlot::Pending),
            "waiter signaled twice"
        );
        *slot = WaitSlot::Closed;
        self.cond.notify_one();
    }

    /// Blocks the calling thread until the slot is filled.
    ///
    /// Returns `None` if the queue was closed while waiting.
    pub(crate) fn wait(&self) -> Option<T> {
        let mut slot = self.slot.lock();
        loop {
            match mem::replace(&mut *slot, WaitSlot::Pending) {
                WaitSlot::Pending => self.cond.wait(&mut slot),
                WaitSlot::Item(item) => return Some(item),
                WaitSlot::Closed => return None,
            }
        }
    }
}
