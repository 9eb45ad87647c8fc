//! Delayed, token-checked tasks on a virtual clock.
//!
//! Every pacing delay (roll animation, forfeit pause, agent thinking time)
//! becomes a `ScheduledTask` carrying the `StateToken` current when it was
//! scheduled. When the task comes due the owner compares the token with
//! the live state and drops the task if they differ.
//!
//! Time only moves when the owner advances the clock, so tests and hosts
//! control pacing completely.

mod queue;

pub use queue::{ScheduledTask, SchedulerStats, TaskKind, TimerQueue};
