//! One-shot timers on a virtual millisecond clock.
//!
//! The queue never sleeps. The owner moves the clock forward and pops
//! whatever became due, so tests and the terminal loop can both drive it.

use std::fmt;
use std::time::Duration;

/// Handle returned by [`TimerQueue::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    id: TimerId,
    due_at: u64,
    order: u64,
}

/// Snapshot of a timer that has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: u64,
}

#[derive(Debug)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    tasks: Vec<ScheduledTimer>,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_order: 0,
            tasks: Vec::new(),
        }
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a one-shot timer `delay` from now.
    pub fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let due_at = self.now_ms.saturating_add(delay_ms);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.push(ScheduledTimer { id, due_at, order });
        log::trace!("[timer] schedule {} due_at={} delay_ms={}", id, due_at, delay_ms);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = before != self.tasks.len();
        log::trace!("[timer] clear {} removed={}", id, removed);
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pending timers in firing order.
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut tasks = self.tasks.clone();
        tasks.sort_by_key(|task| (task.due_at, task.order));
        tasks
            .into_iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
            })
            .collect()
    }

    /// Due time of the next timer to fire.
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().map(|task| task.due_at).min()
    }

    /// Move the clock to `target_ms`. The clock never moves backwards.
    pub fn set_now(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }

    /// Remove and return the next timer due at or before the current clock.
    pub fn pop_due(&mut self) -> Option<TimerId> {
        let now = self.now_ms;
        let (idx, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at <= now)
            .min_by_key(|(_, task)| (task.due_at, task.order))?;
        let task = self.tasks.remove(idx);
        log::trace!("[timer] fire {} due_at={} now_ms={}", task.id, task.due_at, now);
        Some(task.id)
    }

    /// Move the clock to `target_ms` and drain every timer due by then.
    pub fn advance_to(&mut self, target_ms: u64) -> Vec<TimerId> {
        self.set_now(target_ms);
        std::iter::from_fn(|| self.pop_due()).collect()
    }
}
