use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Condvar, Mutex};

/// A reusable countdown latch.
///
/// The latch starts at a positive count. Worker threads adjust the count
/// as they make progress; any number of threads may [`wait`](Countdown::wait)
/// and are released as soon as the count reaches zero or below. The count
/// may go negative: over-decrementing is allowed and keeps the latch in
/// the finished state.
///
/// # Example
///
/// ```rust
/// use savak::Countdown;
/// use std::sync::Arc;
/// use std::thread;
///
/// let gate = Arc::new(Countdown::new(3));
///
/// for _ in 0..3 {
///     let gate = gate.clone();
///     thread::spawn(move || {
///         gate.dec();
///     });
/// }
///
/// gate.wait();
/// assert!(gate.finished());
/// ```
pub struct Countdown {
    count: AtomicIsize,
    lock: Mutex<()>,
    fired: Condvar,
}

impl Countdown {
    /// Creates a latch with the given starting count.
    ///
    /// # Panics
    ///
    /// Panics if `count` is not strictly positive.
    pub fn new(count: isize) -> Countdown {
        assert!(count > 0, "countdown must start positive");
        Countdown {
            count: AtomicIsize::new(count),
            lock: Mutex::new(()),
            fired: Condvar::new(),
        }
    }

    /// Adds `n` to the count. Releases waiters if the result is zero or
    /// below.
    pub fn add(&self, n: isize) {
        let prev = self.count.fetch_add(n, Ordering::AcqRel);
        if prev + n <= 0 {
            self.broadcast();
        }
    }

    /// Subtracts `n` from the count. Releases waiters if the result is
    /// zero or below.
    pub fn sub(&self, n: isize) {
        let prev = self.count.fetch_sub(n, Ordering::AcqRel);
        if prev - n <= 0 {
            self.broadcast();
        }
    }

    /// Adds one to the count.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Subtracts one from the count.
    pub fn dec(&self) {
        self.sub(1);
    }

    /// Replaces the count. Releases waiters if `n` is zero or below.
    pub fn set(&self, n: isize) {
        self.count.store(n, Ordering::Release);
        if n <= 0 {
            self.broadcast();
        }
    }

    /// Returns the current count. The value may be stale by the time the
    /// caller looks at it.
    pub fn get(&self) -> isize {
        self.count.load(Ordering::Acquire)
    }

    /// Returns `true` once the count has reached zero or below.
    pub fn finished(&self) -> bool {
        self.get() <= 0
    }

    /// Blocks the calling thread until the count is zero or below.
    /// Returns immediately if it already is.
    pub fn wait(&self) {
        let mut guard = self.lock.lock().unwrap();
        while self.count.load(Ordering::Acquire) > 0 {
            guard = self.fired.wait(guard).unwrap();
        }
    }

    // Lock acquisition serializes the broadcast with the check-then-wait
    // in `wait`; a notification cannot land between the check and the
    // wait.
    fn broadcast(&self) {
        let _guard = self.lock.lock().unwrap();
        self.fired.notify_all();
    }
}
