//! Queue primitives for Savak channels.
//!
//! ## Features
//!
//! - `RingQueue`: Growable circular-buffer FIFO with amortized O(1)
//!   operations. It doubles its capacity when full and halves it when
//!   occupancy drops below a quarter, never going below its initial
//!   capacity.
//!
//! The queue is a single-owner structure; any concurrency is supplied by
//! the caller (savak-channel wraps it in a mutex).
//!
//! ## Usage
//!
//! ```rust
//! use savak_queue::ring_queue::RingQueue;
//!
//! let mut q = RingQueue::new();
//! q.push("a");
//! q.push("b");
//! assert_eq!(q.pop(), Some("a"));
//! assert_eq!(q.pop(), Some("b"));
//! assert_eq!(q.pop(), None);
//! ```

pub mod ring_queue;
