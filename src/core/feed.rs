//! Bounded narration feed for display.
//!
//! Entries are kept most-recent-first and truncated to a fixed capacity.
//! Backed by `im::Vector` so snapshots share structure with the live feed.

use im::Vector;
use serde::Serialize;

/// Most-recent-first list of narration lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogFeed {
    entries: Vector<String>,
    #[serde(skip)]
    capacity: usize,
}

impl LogFeed {
    /// Create an empty feed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Log capacity must be at least 1");
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Prepend a line, dropping the oldest beyond capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The newest entry.
    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy out the entries, newest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
