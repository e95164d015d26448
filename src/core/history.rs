//! Bounded command history with a recall cursor

use std::collections::VecDeque;

/// What a forward recall produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    /// A stored line
    Line(&'a str),
    /// Stepped past the newest line; the input goes blank
    Blank,
}

/// Entered lines, oldest first, plus the position of the line being recalled
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    index: Option<usize>,
    limit: usize,
}

impl History {
    /// Create a history keeping at most `limit` lines
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(256)),
            index: None,
            limit: limit.max(1),
        }
    }

    /// Store an entered line and reset the recall position.
    /// Blank lines are not stored.
    pub fn record(&mut self, line: &str) {
        self.index = None;

        let line = line.trim();
        if line.is_empty() {
            return;
        }

        self.entries.push_back(line.to_string());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Step back towards older lines. `None` when there is nothing to recall.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }

        let index = match self.index {
            None => self.entries.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.index = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step forward towards newer lines. `None` when no recall is in progress.
    pub fn next(&mut self) -> Option<Recall<'_>> {
        let index = self.index? + 1;

        if index >= self.entries.len() {
            self.index = None;
            return Some(Recall::Blank);
        }

        self.index = Some(index);
        self.entries.get(index).map(|line| Recall::Line(line.as_str()))
    }

    /// Forget the recall position
    pub fn reset(&mut self) {
        self.index = None;
    }

    /// Stored lines, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
