//! One-shot deferred tasks.
//!
//! Tasks are never cancelled.  Whoever drains them re-validates current
//! state when they fire, which makes stale entries harmless.

use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

/// Queue of tasks keyed by the frame-clock time they become due.
#[derive(Debug, Clone)]
pub struct DeferredQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            due: now + delay,
            seq,
            task,
        });
    }

    /// Remove and return every task due at or before `now`, earliest
    /// first (ties keep scheduling order).
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        if self.entries.iter().all(|e| e.due > now) {
            return Vec::new();
        }
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn nothing_fires_before_due() {
        let mut q = DeferredQueue::new();
        q.schedule(ms(0), ms(1000), "arm");
        assert!(q.drain_due(ms(999)).is_empty());
        assert_eq!(q.entries.len(), 1);
        assert_eq!(q.drain_due(ms(1000)), vec!["arm"]);
        assert!(q.entries.is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_time_then_schedule_order() {
        let mut q = DeferredQueue::new();
        q.schedule(ms(100), ms(500), 'c');
        q.schedule(ms(0), ms(200), 'a');
        q.schedule(ms(0), ms(200), 'b');
        q.schedule(ms(0), ms(5000), 'z');
        assert_eq!(q.drain_due(ms(1000)), vec!['a', 'b', 'c']);
        assert_eq!(q.entries.len(), 1);
    }
}
