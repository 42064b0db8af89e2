//! Tracked Player State
//!
//! Identity and per-player records owned by the registry.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::game::detector::JumpDetector;
use crate::game::history::JumpHistory;

// =============================================================================
// PLAYER SLOT
// =============================================================================

/// Stable player identifier issued by the host (connection slot or persistent ID).
///
/// Display names are resolved only at query time, so a renamed or reconnected
/// player object never aliases another player's record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerSlot(pub u32);

impl PlayerSlot {
    /// Create from a raw slot number.
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// Raw slot number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// TRACKED PLAYER
// =============================================================================

/// Everything the registry keeps for one player.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrackedPlayer {
    /// Jump state machine
    pub detector: JumpDetector,

    /// Completed air-jump counts
    pub history: JumpHistory,

    /// Tick this player was first observed
    pub first_seen_tick: u32,

    /// Tick the occupant of this slot disconnected. The history is kept,
    /// but the next occupant of the slot starts from a fresh record.
    pub disconnected_tick: Option<u32>,
}

impl TrackedPlayer {
    /// Create a fresh record first seen at `tick`.
    pub fn new(tick: u32) -> Self {
        Self {
            detector: JumpDetector::new(),
            history: JumpHistory::new(),
            first_seen_tick: tick,
            disconnected_tick: None,
        }
    }

    /// Whether the player this record belongs to is still connected.
    pub fn is_connected(&self) -> bool {
        self.disconnected_tick.is_none()
    }

    /// Close the record for a departed player.
    ///
    /// Drops any airborne period in progress so it can never be committed.
    pub fn disconnect(&mut self, tick: u32) {
        self.detector = JumpDetector::new();
        self.disconnected_tick = Some(tick);
    }
}
