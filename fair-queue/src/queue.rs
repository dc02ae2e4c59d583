use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;

use crate::waiter::Waiter;

/// Unbounded FIFO queue shared across threads, with fair blocking consumers.
///
/// Consumers blocked in [`pop`](FairQueue::pop) are served in strict arrival
/// order: the i-th parked consumer receives the i-th pushed item, always.
/// [`try_pop`](FairQueue::try_pop) never disturbs that order; it only
/// harvests items beyond what the parked consumers are entitled to.
///
/// Cloning the handle is cheap and every clone operates on the same queue.
pub struct FairQueue<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    // Outside the state lock so `visited` stays a lock-free read. The value
    // is monotonic but may lag an in-flight pop by a moment.
    visited: AtomicUsize,
}

struct State<T> {
    items: VecDeque<T>,
    waiters: VecDeque<Arc<Waiter<T>>>,
    closed: bool,
}

impl<T> FairQueue<T> {
    /// Creates an empty open queue.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    items: VecDeque::new(),
                    waiters: VecDeque::new(),
                    closed: false,
                }),
                visited: AtomicUsize::new(0),
            }),
        }
    }

    /// Appends an item, or hands it straight to the oldest parked consumer.
    ///
    /// Never blocks. Returns the item back if the queue is closed.
    pub fn push(&self, item: T) -> Result<(), T> {
        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(item);
        }
        if let Some(waiter) = state.waiters.pop_front() {
            // A consumer only parks when no item is available, so the
            // buffer must be empty whenever a waiter exists.
            debug_assert!(state.items.is_empty());
            drop(state);
            waiter.deliver(item);
            return Ok(());
        }
        state.items.push_back(item);
        Ok(())
    }

    /// Removes and returns the head item, blocking until one is available.
    ///
    /// Items pushed while several consumers are parked are handed out in the
    /// consumers' arrival order. Returns `None` only if the queue is closed
    /// (or gets closed while this call is parked).
    pub fn pop(&self) -> Option<T> {
        let waiter = {
            let mut state = self.shared.state.lock();
            if let Some(item) = state.items.pop_front() {
                self.shared.visited.fetch_add(1, Ordering::Relaxed);
                return Some(item);
            }
            if state.closed {
                return None;
            }
            let waiter = Arc::new(Waiter::new());
            state.waiters.push_back(waiter.clone());
            waiter
        };

        // Parked until a push fills our slot or the queue closes. The
        // payload travels through the slot itself, so nothing can steal it
        // between the signal and this thread resuming.
        let item = waiter.wait()?;
        self.shared.visited.fetch_add(1, Ordering::Relaxed);
        Some(item)
    }

    /// Removes and returns an item without blocking, if an unreserved one
    /// exists.
    ///
    /// With `I` items buffered and `W` consumers parked, the first `W`
    /// buffered items are reserved for those consumers: this returns `None`
    /// whenever `I <= W`, and otherwise takes the first surplus item,
    /// leaving the reserved ones untouched. `None` is also returned after
    /// the queue is closed.
    pub fn try_pop(&self) -> Option<T> {
        let mut state = self.shared.state.lock();
        let reserved = state.waiters.len();
        if state.items.len() <= reserved {
            return None;
        }
        // In bounds: the length check above guarantees an item past the
        // reserved prefix. Index 0 is the plain head pop.
        let item = state.items.remove(reserved)?;
        self.shared.visited.fetch_add(1, Ordering::Relaxed);
        Some(item)
    }

    /// Lifetime count of items that completed a full push-to-pop cycle.
    ///
    /// Lock-free read: the count is non-decreasing, but a call racing with
    /// concurrent pops may observe a value that is already stale.
    pub fn visited(&self) -> usize {
        self.shared.visited.load(Ordering::Relaxed)
    }

    /// Closes the queue: wakes every parked consumer with `None` and drops
    /// all undelivered items.
    ///
    /// Idempotent; returns whether this call performed the close. After
    /// closing, `push` hands items back and `pop`/`try_pop` return `None`.
    pub fn close(&self) -> bool {
        let waiters = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return false;
            }
            state.closed = true;
            state.items.clear();
            std::mem::take(&mut state.waiters)
        };
        for waiter in waiters {
            waiter.close();
        }
        true
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.shared.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.lock().items.is_empty()
    }

    /// Number of consumers currently parked in [`pop`](FairQueue::pop).
    pub fn waiters(&self) -> usize {
        self.shared.state.lock().waiters.len()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }
}

impl<T> Clone for FairQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Default for FairQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
