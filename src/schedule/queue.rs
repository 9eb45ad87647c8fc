use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use rustc_hash::FxHashSet;

use crate::core::StateToken;

/// What a scheduled task will do when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// Land the die that is in the air.
    ResolveRoll,
    /// Pass a turn whose roll had no legal move.
    AdvanceTurn,
    /// An agent seat rolls.
    AgentRoll,
    /// An agent seat picks a piece.
    AgentMove,
}

/// A task waiting on the clock.
///
/// Ordered by due time, then by scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduledTask {
    pub due: Duration,
    seq: u64,
    pub kind: TaskKind,
    pub token: StateToken,
}

impl ScheduledTask {
    /// Whether this task was scheduled against `current`.
    #[must_use]
    pub fn is_current(&self, current: StateToken) -> bool {
        self.token == current
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchedulerStats {
    pub scheduled: u64,
    pub duplicates: u64,
    pub fired: u64,
    pub stale: u64,
}

/// Min-heap of tasks on a virtual clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    heap: BinaryHeap<Reverse<ScheduledTask>>,
    /// (kind, token) pairs already queued; the same step is never queued
    /// twice for one state.
    queued: FxHashSet<(TaskKind, StateToken)>,
    next_seq: u64,
    stats: SchedulerStats,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Queue `kind` to fire `delay` from now, tied to `token`.
    ///
    /// Returns false if the same kind is already queued for that token.
    pub fn schedule(&mut self, kind: TaskKind, token: StateToken, delay: Duration) -> bool {
        if !self.queued.insert((kind, token)) {
            self.stats.duplicates += 1;
            return false;
        }
        let task = ScheduledTask {
            due: self.now + delay,
            seq: self.next_seq,
            kind,
            token,
        };
        self.next_seq += 1;
        self.stats.scheduled += 1;
        tracing::trace!(?kind, ?token, due = ?task.due, "scheduled");
        self.heap.push(Reverse(task));
        true
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(t)| t.due)
    }

    /// Pop the earliest task if it is due at or before `until`, moving the
    /// clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        if self.next_due()? > until {
            return None;
        }
        let Reverse(task) = self.heap.pop()?;
        self.queued.remove(&(task.kind, task.token));
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Move the clock forward to `time`. Never moves it backwards.
    pub fn set_now(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    pub(crate) fn note_fired(&mut self, stale: bool) {
        if stale {
            self.stats.stale += 1;
        } else {
            self.stats.fired += 1;
        }
    }

    /// Drop every queued task.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: StateToken = StateToken(0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pops_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(TaskKind::AgentRoll, T0, ms(1000));
        q.schedule(TaskKind::ResolveRoll, T0, ms(800));

        assert_eq!(q.next_due(), Some(ms(800)));
        assert_eq!(q.pop_due(ms(5000)).unwrap().kind, TaskKind::ResolveRoll);
        assert_eq!(q.now(), ms(800));
        assert_eq!(q.pop_due(ms(5000)).unwrap().kind, TaskKind::AgentRoll);
        assert!(q.is_empty());
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(TaskKind::AgentMove, T0, ms(10));
        q.schedule(TaskKind::AdvanceTurn, T0, ms(10));

        assert_eq!(q.pop_due(ms(10)).unwrap().kind, TaskKind::AgentMove);
        assert_eq!(q.pop_due(ms(10)).unwrap().kind, TaskKind::AdvanceTurn);
    }

    #[test]
    fn test_not_due_yet() {
        let mut q = TimerQueue::new();
        q.schedule(TaskKind::AgentRoll, T0, ms(1000));

        assert!(q.pop_due(ms(999)).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected_until_fired() {
        let mut q = TimerQueue::new();
        assert!(q.schedule(TaskKind::AgentRoll, T0, ms(5)));
        assert!(!q.schedule(TaskKind::AgentRoll, T0, ms(5)));
        assert!(q.schedule(TaskKind::AgentRoll, StateToken(1), ms(5)));
        assert_eq!(q.stats().duplicates, 1);

        q.pop_due(ms(5));
        q.pop_due(ms(5));
        assert!(q.schedule(TaskKind::AgentRoll, T0, ms(5)));
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut q = TimerQueue::new();
        q.set_now(ms(300));
        q.schedule(TaskKind::ResolveRoll, T0, ms(800));

        assert_eq!(q.next_due(), Some(ms(1100)));
        q.set_now(ms(100));
        assert_eq!(q.now(), ms(300));
    }

    #[test]
    fn test_token_check() {
        let mut q = TimerQueue::new();
        q.schedule(TaskKind::AgentMove, StateToken(4), ms(0));
        let task = q.pop_due(ms(0)).unwrap();

        assert!(task.is_current(StateToken(4)));
        assert!(!task.is_current(StateToken(5)));
    }
}
