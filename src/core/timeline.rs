//! Delayed actions for the single-threaded event loop

use std::time::Instant;

/// Something to do once its time has come
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimedAction {
    /// Write a normal line to the transcript
    Print(String),
    /// Leave the console
    Quit,
}

#[derive(Debug)]
struct Scheduled {
    due: Instant,
    seq: u64,
    action: TimedAction,
}

/// Pending actions ordered by due time, then by scheduling order
#[derive(Debug, Default)]
pub struct Timeline {
    queue: Vec<Scheduled>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, action: TimedAction) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let position = self
            .queue
            .partition_point(|entry| (entry.due, entry.seq) <= (due, seq));
        self.queue.insert(position, Scheduled { due, seq, action });
    }

    /// Remove and return every action due at `now`
    pub fn drain_due(&mut self, now: Instant) -> Vec<TimedAction> {
        let count = self.queue.partition_point(|entry| entry.due <= now);
        self.queue.drain(..count).map(|entry| entry.action).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.first().map(|entry| entry.due)
    }

    pub fn contains(&self, action: &TimedAction) -> bool {
        self.queue.iter().any(|entry| &entry.action == action)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
