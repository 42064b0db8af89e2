//! Jump History Queries
//!
//! Resolves display names against the host roster and reads the registry.
//! Errors stop here and are turned into replies by the dispatcher.

use std::collections::HashMap;
use std::fmt;
use serde::Serialize;

use crate::commands::roster::PlayerRoster;
use crate::game::registry::JumpRegistry;
use crate::game::state::PlayerSlot;

/// Query errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// No connected player has this name.
    #[error("Player '{0}' not found.")]
    PlayerNotFound(String),

    /// Player is connected but has not been observed on a tick yet.
    #[error("No jump data available for {0}.")]
    NoHistoryAvailable(String),
}

/// One player's history resolved to a display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerReport {
    /// Stable identity
    pub slot: PlayerSlot,
    /// Display name at query time
    pub name: String,
    /// Air jump counts, oldest first
    pub counts: Vec<u32>,
    /// Tick the player was first observed
    pub tracked_since: u32,
}

impl PlayerReport {
    /// Counts joined as `a, b, c`.
    pub fn counts_line(&self) -> String {
        self.counts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders as `<name>: a, b, c`.
impl fmt::Display for PlayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.counts_line())
    }
}

/// Look up one player by case-insensitive exact name.
pub fn query_one<R: PlayerRoster + ?Sized>(
    registry: &JumpRegistry,
    roster: &R,
    name: &str,
) -> Result<PlayerReport, QueryError> {
    let player = roster
        .find_by_name(name)
        .ok_or_else(|| QueryError::PlayerNotFound(name.to_string()))?;

    // A record left by a previous occupant of the slot is not this player's
    let tracked = registry
        .player(player.slot)
        .filter(|t| t.is_connected())
        .ok_or_else(|| QueryError::NoHistoryAvailable(name.to_string()))?;

    Ok(PlayerReport {
        slot: player.slot,
        name: player.name,
        counts: tracked.history.to_vec(),
        tracked_since: tracked.first_seen_tick,
    })
}

/// Snapshot every tracked player that is still connected, in slot order.
///
/// Tracked players without a connected roster entry have no name to show
/// and are skipped, as are records closed by a disconnect.
pub fn query_all<R: PlayerRoster + ?Sized>(registry: &JumpRegistry, roster: &R) -> Vec<PlayerReport> {
    let names: HashMap<PlayerSlot, String> = roster
        .players()
        .into_iter()
        .map(|p| (p.slot, p.name))
        .collect();

    registry
        .iter()
        .filter(|(_, tracked)| tracked.is_connected())
        .filter_map(|(slot, tracked)| {
            names.get(&slot).map(|name| PlayerReport {
                slot,
                name: name.clone(),
                counts: tracked.history.to_vec(),
                tracked_since: tracked.first_seen_tick,
            })
        })
        .collect()
}
