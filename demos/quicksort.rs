//! Non-recursive parallel quicksort over an unbounded work channel.
//!
//! A unit of work is an inclusive index interval of the array. A worker
//! takes an interval off the channel, partitions the corresponding slice
//! around a randomly chosen pivot, and feeds the sub-intervals that still
//! hold at least two elements back into the channel. A countdown, started
//! at the array length and decremented once per element that reaches its
//! final position, tells the main thread when sorting is complete so it
//! can close the channel and let the workers drain out.

use rand::Rng;
use savak::Countdown;
use savak_channel::unbounded;
use savak_channel::unbounded::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

const ARR_LEN: usize = 10_000;
const N_THREADS: usize = 8;

/// Shared mutable access to the array being sorted.
///
/// Intervals handed out through the work channel never overlap, so no
/// element is touched by two workers at once.
struct SortBuffer {
    ptr: *mut i64,
    len: usize,
}

unsafe impl Send for SortBuffer {}
unsafe impl Sync for SortBuffer {}

impl SortBuffer {
    /// A mutable view of the inclusive interval `[low, high]`. The caller
    /// guarantees the interval is disjoint from every other live view.
    unsafe fn slice(&self, low: usize, high: usize) -> &mut [i64] {
        debug_assert!(low <= high && high < self.len);
        std::slice::from_raw_parts_mut(self.ptr.add(low), high - low + 1)
    }
}

/// Partitions the slice around a randomly picked pivot so that everything
/// left of the returned index is `<=` the pivot and everything right of
/// it is `>`. Returns the pivot's final position within the slice.
fn partition(a: &mut [i64]) -> usize {
    if a.len() == 1 {
        return 0;
    }
    let pi = rand::rng().random_range(0..a.len());
    a.swap(0, pi);
    let p = a[0];

    let mut i = 1;
    let mut j = a.len() - 1;
    loop {
        while i <= j && a[i] <= p {
            i += 1;
        }
        if i > j {
            break;
        }
        while i <= j && a[j] > p {
            j -= 1;
        }
        if i > j {
            break;
        }
        a.swap(i, j);
        i += 1;
        j -= 1;
    }

    a.swap(0, j);
    j
}

fn worker(
    buf: Arc<SortBuffer>,
    work_tx: Sender<(usize, usize)>,
    work_rx: Receiver<(usize, usize)>,
    remaining: Arc<Countdown>,
) {
    while let Some((low, high)) = work_rx.recv() {
        // Intervals on the channel always hold at least two elements.
        let slice = unsafe { buf.slice(low, high) };
        let p = low + partition(slice);
        remaining.dec();

        if p > low {
            if p - low > 1 {
                work_tx.send((low, p - 1));
            } else {
                // A single element left of the pivot is already in place.
                remaining.dec();
            }
        }
        if high > p {
            if high - p > 1 {
                work_tx.send((p + 1, high));
            } else {
                remaining.dec();
            }
        }
    }
}

fn main() {
    let mut rng = rand::rng();
    let mut arr: Vec<i64> = (0..ARR_LEN)
        .map(|_| rng.random_range(0..10 * ARR_LEN as i64))
        .collect();

    let buf = Arc::new(SortBuffer {
        ptr: arr.as_mut_ptr(),
        len: arr.len(),
    });
    let remaining = Arc::new(Countdown::new(ARR_LEN as isize));
    let (work_tx, work_rx) = unbounded::<(usize, usize)>();

    let mut handles = vec![];
    for _ in 0..N_THREADS {
        let buf = buf.clone();
        let work_tx = work_tx.clone();
        let work_rx = work_rx.clone();
        let remaining = remaining.clone();
        handles.push(thread::spawn(move || {
            worker(buf, work_tx, work_rx, remaining)
        }));
    }

    // The initial interval is the whole array.
    work_tx.send((0, ARR_LEN - 1));

    // Once every element has reached its final position no worker will
    // send again, so closing here cannot race with a send.
    remaining.wait();
    work_tx.close();
    for h in handles {
        h.join().unwrap();
    }

    assert!(arr.windows(2).all(|w| w[0] <= w[1]), "array is sorted");
    println!("sorted {} values across {} workers", ARR_LEN, N_THREADS);
}
