use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use savak_queue::ring_queue::RingQueue;

use crate::select::{Selection, Session};

struct State<T> {
    queue: RingQueue<T>,
    closed: bool,
}

pub(crate) struct Channel<T> {
    /// Queue and closed flag, only ever touched under this mutex.
    state: Mutex<State<T>>,
    /// Signalled whenever a value arrives or the channel closes.
    incoming: Condvar,
    /// Live `Sender` handles; the last one to drop closes the channel.
    senders: AtomicUsize,
}

impl<T> Channel<T> {
    fn new() -> Channel<T> {
        Channel {
            state: Mutex::new(State {
                queue: RingQueue::new(),
                closed: false,
            }),
            incoming: Condvar::new(),
            senders: AtomicUsize::new(1),
        }
    }

    fn len(&self) -> usize {
        self.state.lock().unwrap().queue.len()
    }

    fn close(&self) {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            panic!("close of closed channel");
        }
        state.closed = true;
        drop(state);
        self.incoming.notify_all();
    }
}

/// The sending half of an unbounded channel.
pub struct Sender<T> {
    inner: Arc<Channel<T>>,
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.inner.senders.fetch_add(1, Ordering::Relaxed);
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        if self.inner.senders.fetch_sub(1, Ordering::AcqRel) == 1 {
            // No sender is left, so no further value can arrive: close
            // quietly (if still open) to let blocked receivers drain and
            // return. Only the explicit close is fatal on repeat. This
            // runs during unwinding too, where the lock may be poisoned
            // by the panicking sender; blocked receivers still need the
            // close.
            let mut state = match self.inner.state.lock() {
                Ok(state) => state,
                Err(poisoned) => poisoned.into_inner(),
            };
            if !state.closed {
                state.closed = true;
                drop(state);
                self.inner.incoming.notify_all();
            }
        }
    }
}

/// The receiving half of an unbounded channel.
pub struct Receiver<T> {
    inner: Arc<Channel<T>>,
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Creates a channel of unbounded capacity.
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let inner = Arc::new(Channel::new());
    (
        Sender {
            inner: inner.clone(),
        },
        Receiver { inner },
    )
}

impl<T> Sender<T> {
    /// Sends a value into the channel. Never blocks.
    ///
    /// # Panics
    ///
    /// Panics if the channel has been closed.
    pub fn send(&self, value: T) {
        let mut state = self.inner.state.lock().unwrap();
        if state.closed {
            panic!("send on closed channel");
        }
        state.queue.push(value);
        drop(state);
        // Broadcast rather than notify_one: a single wakeup could land on
        // a select helper that backs off without consuming the value.
        self.inner.incoming.notify_all();
    }

    /// Closes the channel. Values sent before the close remain
    /// receivable; receivers of a drained closed channel get `None`
    /// without blocking.
    ///
    /// # Panics
    ///
    /// Panics if the channel is already closed.
    pub fn close(&self) {
        self.inner.close();
    }

    /// Returns the number of values currently in the channel. The count
    /// is stale the instant it is returned.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the channel currently holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Receiver<T> {
    /// Receives a value, blocking until one is available or the channel
    /// is closed and drained.
    ///
    /// Returns `Some(value)` for every value sent before or after the
    /// call, in per-producer order, including values sent before a close.
    /// Returns `None` only once the channel is closed and empty, without
    /// blocking in that state.
    pub fn recv(&self) -> Option<T> {
        let mut state = self.inner.state.lock().unwrap();
        loop {
            if let Some(value) = state.queue.pop() {
                return Some(value);
            }
            if state.closed {
                return None;
            }
            state = self.inner.incoming.wait(state).unwrap();
        }
    }

    /// Attempts to receive a value without blocking.
    ///
    /// Returns `None` whenever no value is ready right now; this does not
    /// distinguish an idle open channel from a drained closed one. Use
    /// [`recv`](Receiver::recv) to observe the end of the stream.
    pub fn try_recv(&self) -> Option<T> {
        self.inner.state.lock().unwrap().queue.pop()
    }

    /// Returns the number of values currently in the channel. The count
    /// is stale the instant it is returned.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the channel currently holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocking receive on behalf of a select session.
    ///
    /// Runs on a helper thread during select's blocking phase. The first
    /// helper to find its channel ready (a value, or closed-and-drained)
    /// records itself as the session winner and completes the receive;
    /// every other helper observes the winner and returns without
    /// dequeuing anything.
    ///
    /// Lock order: session first, channel second, never the reverse.
    pub(crate) fn recv_arbitrated(&self, session: &Session<T>, index: usize) {
        loop {
            let mut outcome = session.outcome.lock().unwrap();
            if outcome.is_some() {
                // Lost the race. The value (if any) stays in our queue.
                return;
            }
            let mut state = self.inner.state.lock().unwrap();
            if let Some(value) = state.queue.pop() {
                *outcome = Some(Selection {
                    index,
                    value: Some(value),
                });
                drop(state);
                session.decided.notify_all();
                return;
            }
            if state.closed {
                *outcome = Some(Selection { index, value: None });
                drop(state);
                session.decided.notify_all();
                return;
            }
            // Nothing deliverable yet. Release the session lock before
            // sleeping so the other candidates can arbitrate, then wait
            // for a send, a close, or the caller's post-decision wakeup.
            drop(outcome);
            let state = self.inner.incoming.wait(state).unwrap();
            drop(state);
        }
    }

    /// Wakes every thread blocked on this channel's condition.
    ///
    /// The channel mutex is held across the broadcast so it cannot slip
    /// between a helper's winner check and its wait.
    pub(crate) fn wake_waiters(&self) {
        let _state = self.inner.state.lock().unwrap();
        self.inner.incoming.notify_all();
    }
}
