//! Savak: coordination primitives for channel-based thread pipelines.
//!
//! The workspace bundles a small toolkit around unbounded communication
//! channels in the style of sequential-process languages:
//!
//! - `savak-channel`: unbounded MPMC channels with close/drain semantics
//!   and a multi-way receive select.
//! - `savak-queue`: the growable ring-buffer queue backing the channels.
//! - This crate: the [`Countdown`] latch used to coordinate shutdown of
//!   channel pipelines (for example, letting a driver thread learn that a
//!   pool of workers has finished every unit of work before it closes a
//!   work channel).
//!
//! # Key Properties
//!
//! - **Broadcast on completion**: every transition of the count to zero or
//!   below wakes all waiters.
//! - **Reusable**: the count can be adjusted in both directions and
//!   replaced outright with [`Countdown::set`].
//! - **Lock-free reads**: [`Countdown::get`] and [`Countdown::finished`]
//!   are plain atomic loads.

#![warn(missing_docs)]

mod countdown;

pub use countdown::Countdown;
