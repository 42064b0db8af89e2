//! Jump Registry
//!
//! Maps player identity to detector state and history.
//! Uses BTreeMap so snapshots iterate in slot order.
//!
//! # Access contract
//!
//! The registry is plain owned data with no interior locking. The host must
//! drive the tick hook and command queries from one logical thread and never
//! run them concurrently.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::game::history::JumpHistory;
use crate::game::state::{PlayerSlot, TrackedPlayer};

/// Registry lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    /// Player has never been observed.
    #[error("No jump history for player {0}")]
    NotFound(PlayerSlot),
}

/// All tracked players.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JumpRegistry {
    players: BTreeMap<PlayerSlot, TrackedPlayer>,
}

impl JumpRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            players: BTreeMap::new(),
        }
    }

    /// Fetch a player's record, creating it on first observation.
    ///
    /// A record left behind by a disconnected player is replaced, so a new
    /// occupant of a reused slot never inherits it.
    /// Returns the record and whether it was just created.
    pub fn observe(&mut self, slot: PlayerSlot, tick: u32) -> (&mut TrackedPlayer, bool) {
        let mut created = false;
        let player = self.players.entry(slot).or_insert_with(|| {
            created = true;
            TrackedPlayer::new(tick)
        });
        if let Some(left) = player.disconnected_tick {
            debug!("Slot {} reused at tick {}, dropping record from tick {}", slot, tick, left);
            *player = TrackedPlayer::new(tick);
            created = true;
        }

        if created {
            debug!("Tracking player {} from tick {}", slot, player.first_seen_tick);
        }

        (player, created)
    }

    /// Close a departed player's record, keeping its history.
    ///
    /// Returns false if the slot was never observed.
    pub fn disconnect(&mut self, slot: PlayerSlot, tick: u32) -> bool {
        match self.players.get_mut(&slot) {
            Some(player) => {
                player.disconnect(tick);
                true
            }
            None => false,
        }
    }

    /// Append a completed count to a player's history.
    pub fn record(&mut self, slot: PlayerSlot, count: NonZeroU32) -> Result<(), HistoryError> {
        let player = self
            .players
            .get_mut(&slot)
            .ok_or(HistoryError::NotFound(slot))?;
        player.history.record(count);
        Ok(())
    }

    /// Borrow a player's history.
    pub fn history(&self, slot: PlayerSlot) -> Result<&JumpHistory, HistoryError> {
        self.players
            .get(&slot)
            .map(|p| &p.history)
            .ok_or(HistoryError::NotFound(slot))
    }

    /// A player's history in insertion order (oldest first).
    pub fn get(&self, slot: PlayerSlot) -> Result<Vec<u32>, HistoryError> {
        self.history(slot).map(JumpHistory::to_vec)
    }

    /// Snapshot of every tracked player's history.
    pub fn get_all(&self) -> BTreeMap<PlayerSlot, Vec<u32>> {
        self.players
            .iter()
            .map(|(slot, p)| (*slot, p.history.to_vec()))
            .collect()
    }

    /// Borrow a player's full record.
    pub fn player(&self, slot: PlayerSlot) -> Option<&TrackedPlayer> {
        self.players.get(&slot)
    }

    /// Check if a player has been observed.
    pub fn contains(&self, slot: PlayerSlot) -> bool {
        self.players.contains_key(&slot)
    }

    /// Iterate tracked players in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSlot, &TrackedPlayer)> {
        self.players.iter().map(|(slot, p)| (*slot, p))
    }

    /// Number of tracked players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if no players are tracked.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Remove a player's record (host-notified disconnect cleanup).
    pub fn forget(&mut self, slot: PlayerSlot) -> Option<TrackedPlayer> {
        let removed = self.players.remove(&slot);
        if removed.is_some() {
            debug!("Forgot player {}", slot);
        }
        removed
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_observe_creates_once() {
        let mut registry = JumpRegistry::new();
        let slot = PlayerSlot::new(1);

        let (_, created) = registry.observe(slot, 5);
        assert!(created);
        let (player, created) = registry.observe(slot, 6);
        assert!(!created);
        assert_eq!(player.first_seen_tick, 5);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reused_slot_starts_fresh() {
        let mut registry = JumpRegistry::new();
        let slot = PlayerSlot::new(3);
        registry.observe(slot, 0);
        registry.record(slot, nz(4)).unwrap();

        assert!(registry.disconnect(slot, 10));
        assert!(!registry.disconnect(PlayerSlot::new(8), 10));
        // History kept until the slot is taken again
        assert_eq!(registry.get(slot).unwrap(), vec![4]);

        let (player, created) = registry.observe(slot, 20);
        assert!(created);
        assert!(player.is_connected());
        assert_eq!(player.first_seen_tick, 20);
        assert!(player.history.is_empty());
    }

    #[test]
    fn test_get_unknown_player() {
        let registry = JumpRegistry::new();
        let slot = PlayerSlot::new(9);
        assert_eq!(registry.get(slot), Err(HistoryError::NotFound(slot)));
        assert!(registry.history(slot).is_err());
    }

    #[test]
    fn test_record_requires_observation() {
        let mut registry = JumpRegistry::new();
        let slot = PlayerSlot::new(2);
        assert_eq!(registry.record(slot, nz(1)), Err(HistoryError::NotFound(slot)));

        registry.observe(slot, 0);
        registry.record(slot, nz(3)).unwrap();
        registry.record(slot, nz(1)).unwrap();
        assert_eq!(registry.get(slot).unwrap(), vec![3, 1]);
    }

    #[test]
    fn test_observed_player_has_empty_history() {
        let mut registry = JumpRegistry::new();
        let slot = PlayerSlot::new(4);
        registry.observe(slot, 0);
        assert_eq!(registry.get(slot).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_get_all_snapshot() {
        let mut registry = JumpRegistry::new();
        let a = PlayerSlot::new(3);
        let b = PlayerSlot::new(1);
        registry.observe(a, 0);
        registry.observe(b, 0);
        registry.record(a, nz(2)).unwrap();

        let all = registry.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[&a], vec![2]);
        assert!(all[&b].is_empty());
        // Slot order
        assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_forget_and_clear() {
        let mut registry = JumpRegistry::new();
        let slot = PlayerSlot::new(1);
        registry.observe(slot, 0);
        registry.observe(PlayerSlot::new(2), 0);

        assert!(registry.forget(slot).is_some());
        assert!(registry.forget(slot).is_none());
        assert!(!registry.contains(slot));

        registry.clear();
        assert!(registry.is_empty());
    }
}
