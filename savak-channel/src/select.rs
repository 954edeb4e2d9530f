use std::sync::{Condvar, Mutex};
use std::thread;

use rand::seq::SliceRandom;

use crate::flavors::unbounded::Receiver;

/// Coordination record for one in-flight select call.
///
/// The session mutex guards the winner slot. It is always taken before a
/// candidate channel's mutex, never while one is held, so the two lock
/// levels cannot form a cycle.
pub(crate) struct Session<T> {
    pub(crate) outcome: Mutex<Option<Selection<T>>>,
    pub(crate) decided: Condvar,
}

/// The winning candidate of a select call.
pub(crate) struct Selection<T> {
    pub(crate) index: usize,
    /// `Some` for a live value, `None` for the end of a closed stream.
    pub(crate) value: Option<T>,
}

/// Receives from exactly one of the given channels, blocking until one of
/// them delivers.
///
/// Returns the index of the channel that completed together with its
/// outcome: `Some(value)` for a received value, `None` if that channel
/// was closed and drained. The other candidates are left untouched; a
/// value that arrives on a losing channel stays in its queue.
///
/// When several channels are ready at once the choice among them is
/// randomized, so repeated selects do not starve later candidates.
///
/// # Panics
///
/// Panics if `receivers` is empty.
///
/// # Examples
///
/// ```rust
/// use savak_channel::{select, unbounded};
///
/// let (s1, r1) = unbounded::<&str>();
/// let (_s2, r2) = unbounded::<&str>();
///
/// s1.send("ready");
///
/// let (index, value) = select(&[&r1, &r2]);
/// assert_eq!(index, 0);
/// assert_eq!(value, Some("ready"));
/// assert_eq!(r2.len(), 0);
/// ```
pub fn select<T: Send>(receivers: &[&Receiver<T>]) -> (usize, Option<T>) {
    assert!(!receivers.is_empty(), "select on empty channel list");

    // Phase A: randomized non-blocking scan. If any candidate already
    // holds a value this settles the call without spawning anything.
    if let Some((index, value)) = try_select(receivers) {
        return (index, Some(value));
    }

    // Phase B: one helper thread per candidate runs the arbitrated
    // blocking receive against a shared session; the first channel to
    // become ready (value or closed-drain) wins it.
    let session = Session {
        outcome: Mutex::new(None),
        decided: Condvar::new(),
    };
    thread::scope(|scope| {
        for (index, receiver) in receivers.iter().enumerate() {
            let session = &session;
            let receiver = *receiver;
            scope.spawn(move || receiver.recv_arbitrated(session, index));
        }

        let mut outcome = session.outcome.lock().unwrap();
        while outcome.is_none() {
            outcome = session.decided.wait(outcome).unwrap();
        }
        drop(outcome);

        // The losers may still be blocked on their channel conditions;
        // wake them so the scope can join. Each one re-checks the session
        // before touching its queue and bows out without consuming.
        for receiver in receivers {
            receiver.wake_waiters();
        }
    });

    let selection = session
        .outcome
        .into_inner()
        .unwrap()
        .expect("select finished without a winner");
    (selection.index, selection.value)
}

/// Attempts to receive from one of the given channels without blocking.
///
/// Candidates are probed in random order; the first one holding a value
/// wins. Returns `None` if no candidate has a value ready, including
/// when some candidates are closed, since a non-blocking receive does not
/// distinguish a drained closed channel from an idle open one.
///
/// # Examples
///
/// ```rust
/// use savak_channel::{try_select, unbounded};
///
/// let (s, r) = unbounded::<i32>();
/// assert_eq!(try_select(&[&r]), None);
///
/// s.send(5);
/// assert_eq!(try_select(&[&r]), Some((0, 5)));
/// ```
pub fn try_select<T>(receivers: &[&Receiver<T>]) -> Option<(usize, T)> {
    let mut order: Vec<usize> = (0..receivers.len()).collect();
    order.shuffle(&mut rand::rng());

    for index in order {
        if let Some(value) = receivers[index].try_recv() {
            return Some((index, value));
        }
    }
    None
}
