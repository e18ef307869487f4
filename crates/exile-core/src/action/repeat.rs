//! Held-direction auto-repeat
//!
//! Holding a direction re-issues the same move on a timer. This sits outside
//! the turn pipeline: the front end polls with the held direction and the
//! current time, and feeds any returned direction back in as a move intent.

use serde::{Deserialize, Serialize};

use super::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRepeat {
    interval_ms: u64,
    running: bool,
    last_dir: Option<Direction>,
    last_time_ms: u64,
}

impl MoveRepeat {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            running: false,
            last_dir: None,
            last_time_ms: 0,
        }
    }

    /// Effective interval; halved while running
    pub fn interval_ms(&self) -> u64 {
        if self.running {
            (self.interval_ms / 2).max(1)
        } else {
            self.interval_ms
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn last_dir(&self) -> Option<Direction> {
        self.last_dir
    }

    /// Decide whether the held direction should move now.
    ///
    /// A new direction fires immediately; the same direction fires once the
    /// interval has elapsed since the last accepted move. Releasing every
    /// direction forgets the last one.
    pub fn poll(&mut self, held: Option<Direction>, now_ms: u64) -> Option<Direction> {
        let Some(dir) = held else {
            self.last_dir = None;
            return None;
        };
        if self.last_dir != Some(dir) {
            return Some(dir);
        }
        if now_ms.saturating_sub(self.last_time_ms) >= self.interval_ms() {
            Some(dir)
        } else {
            None
        }
    }

    /// Note an accepted move
    pub fn record(&mut self, dir: Direction, now_ms: u64) {
        self.last_dir = Some(dir);
        self.last_time_ms = now_ms;
    }

    /// Drop any in-flight repeat
    pub fn clear(&mut self) {
        self.last_dir = None;
    }
}

impl Default for MoveRepeat {
    fn default() -> Self {
        Self::new(crate::MOVE_REPEAT_INTERVAL_MS)
    }
}
