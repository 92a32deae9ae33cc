//! Run-wide backoff state.
//!
//! A single [`BackoffController`] is shared by every request of a run, so a
//! burst of failures slows all later requests and a streak of successes speeds
//! them back up. Sleeping is behind the [`Sleeper`] seam so the fetch loop can
//! be driven without wall-clock delays.

mod controller;
mod sleeper;

pub use controller::{BackoffController, BackoffPolicy};
pub use sleeper::{Sleeper, ThreadSleeper};
