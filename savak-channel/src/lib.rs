//! Multi-producer multi-consumer unbounded channels with a receive select.
//!
//! This crate provides a thread-safe FIFO channel without a capacity
//! bound, in the style of the channels popularized by sequential-process
//! languages. Producers never block; consumers block until a value or the
//! end of the stream arrives. A channel can be closed exactly once, after
//! which every value sent before the close can still be received and
//! receivers then observe the end of the stream without blocking.
//!
//! # Key Features
//!
//! - **Multi-producer Multi-consumer (MPMC)**: both halves are cloneable
//!   and shareable across threads.
//! - **Unbounded**: `send` never blocks; the backing ring queue grows and
//!   shrinks as needed.
//! - **Close and drain**: closing forbids further sends but leaves every
//!   already-sent value receivable; a drained closed channel yields
//!   `None` immediately.
//! - **Receive select**: [`select`] blocks on any number of channels and
//!   completes on exactly the first one to deliver, leaving the other
//!   candidates' queues untouched.
//!
//! # Ordering
//!
//! Values from a single producer arrive in the order they were sent.
//! Values from different producers may interleave arbitrarily; no
//! cross-producer order is promised.
//!
//! # Example
//!
//! ```rust
//! use savak_channel::unbounded;
//! use std::thread;
//!
//! let (s, r) = unbounded::<i32>();
//!
//! let producer = s.clone();
//! thread::spawn(move || {
//!     producer.send(1);
//!     producer.send(2);
//! });
//!
//! assert_eq!(r.recv(), Some(1));
//! assert_eq!(r.recv(), Some(2));
//! s.close();
//! assert_eq!(r.recv(), None);
//! ```
//!
//! Selecting over several channels:
//!
//! ```rust
//! use savak_channel::{select, unbounded};
//!
//! let (s1, r1) = unbounded::<i32>();
//! let (_s2, r2) = unbounded::<i32>();
//!
//! s1.send(42);
//!
//! let (index, value) = select(&[&r1, &r2]);
//! assert_eq!(index, 0);
//! assert_eq!(value, Some(42));
//! ```

#![warn(missing_docs)]

/// Channel flavors.
pub mod flavors;
/// Multi-way receive select.
pub mod select;

pub use flavors::unbounded;
pub use select::{select, try_select};

/// Creates a channel of unbounded capacity.
///
/// The channel holds any number of in-flight values; `send` never blocks.
pub fn unbounded<T>() -> (unbounded::Sender<T>, unbounded::Receiver<T>) {
    unbounded::channel()
}
