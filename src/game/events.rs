//! Tracker Events
//!
//! Events produced by the tick hook so a host can audit or log them.

use std::num::NonZeroU32;
use serde::{Serialize, Deserialize};
use crate::game::state::PlayerSlot;

/// Event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpEventData {
    /// Player was observed for the first time
    PlayerTracked,

    /// Player landed after an airborne period with air jumps
    AirJumpsCommitted {
        /// Rising edges in the airborne period
        count: NonZeroU32,
        /// History length after the commit
        history_len: usize,
    },

    /// Player record was dropped on disconnect
    PlayerForgotten,
}

/// An event with timing and subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Player involved
    pub slot: PlayerSlot,

    /// Event data
    pub data: JumpEventData,
}

impl JumpEvent {
    /// Create a new event.
    pub fn new(tick: u32, slot: PlayerSlot, data: JumpEventData) -> Self {
        Self { tick, slot, data }
    }

    /// Create player tracked event.
    pub fn player_tracked(tick: u32, slot: PlayerSlot) -> Self {
        Self::new(tick, slot, JumpEventData::PlayerTracked)
    }

    /// Create air jumps committed event.
    pub fn air_jumps_committed(
        tick: u32,
        slot: PlayerSlot,
        count: NonZeroU32,
        history_len: usize,
    ) -> Self {
        Self::new(
            tick,
            slot,
            JumpEventData::AirJumpsCommitted { count, history_len },
        )
    }

    /// Create player forgotten event.
    pub fn player_forgotten(tick: u32, slot: PlayerSlot) -> Self {
        Self::new(tick, slot, JumpEventData::PlayerForgotten)
    }

    /// Committed count, if this is a commit event.
    pub fn committed_count(&self) -> Option<u32> {
        match self.data {
            JumpEventData::AirJumpsCommitted { count, .. } => Some(count.get()),
            _ => None,
        }
    }

    fn sort_key(&self) -> (u32, PlayerSlot, u8, u32, usize) {
        let (rank, count, len) = match self.data {
            JumpEventData::PlayerTracked => (0, 0, 0),
            JumpEventData::AirJumpsCommitted { count, history_len } => (1, count.get(), history_len),
            JumpEventData::PlayerForgotten => (2, 0, 0),
        };
        (self.tick, self.slot, rank, count, len)
    }
}

impl PartialOrd for JumpEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JumpEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: tick, then slot, then kind
        self.sort_key().cmp(&other.sort_key())
    }
}
