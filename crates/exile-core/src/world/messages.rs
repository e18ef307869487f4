//! Turn-stamped message log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One player-visible line and the turn it was logged on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub turn: u64,
}

/// Bounded log; the oldest entries fall off the front
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<Message>,
    capacity: usize,
    /// Lines ever pushed, including ones that fell off
    #[serde(default)]
    total: u64,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            capacity: capacity.max(1),
            total: 0,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, turn: u64) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Message {
            text: text.into(),
            turn,
        });
        self.total += 1;
    }

    /// Running count of pushed lines, usable as a mark for [`Self::since`]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Retained lines pushed after `mark` was taken
    pub fn since(&self, mark: u64) -> impl Iterator<Item = &Message> {
        let fresh = usize::try_from(self.total.saturating_sub(mark)).unwrap_or(usize::MAX);
        let skip = self.entries.len().saturating_sub(fresh);
        self.entries.iter().skip(skip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    /// True if any retained line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|m| m.text.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(crate::MESSAGE_CAPACITY)
    }
}
