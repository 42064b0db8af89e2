//! Jump History
//!
//! Bounded FIFO of completed air-jump counts for one player.

use std::collections::VecDeque;
use std::fmt;
use std::num::NonZeroU32;
use serde::{Serialize, Deserialize};

/// Number of completed airborne periods kept per player.
pub const HISTORY_CAPACITY: usize = 10;

/// Most recent air-jump counts, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpHistory {
    recent: VecDeque<u32>,
}

impl Default for JumpHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            recent: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Append a completed count, evicting the oldest entry when full.
    pub fn record(&mut self, count: NonZeroU32) {
        if self.recent.len() >= HISTORY_CAPACITY {
            self.recent.pop_front();
        }
        self.recent.push_back(count.get());
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.recent.iter().copied()
    }

    /// Copy out in insertion order.
    pub fn to_vec(&self) -> Vec<u32> {
        self.recent.iter().copied().collect()
    }

    /// Most recently recorded count.
    pub fn latest(&self) -> Option<u32> {
        self.recent.back().copied()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

/// Renders as `a, b, c`.
impl fmt::Display for JumpHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.recent.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", count)?;
        }
        Ok(())
    }
}
