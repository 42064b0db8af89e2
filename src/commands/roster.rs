//! Connected Player Roster
//!
//! The host owns the player list. The query layer only needs to enumerate
//! connected players with their slot and current display name.

use serde::{Serialize, Deserialize};
use crate::game::state::PlayerSlot;

/// A connected player as the host enumerates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedPlayer {
    /// Stable identity
    pub slot: PlayerSlot,
    /// Current display name
    pub name: String,
}

impl ConnectedPlayer {
    /// Create a roster entry.
    pub fn new(slot: PlayerSlot, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
        }
    }

    /// Case-insensitive exact name match.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Host player list.
pub trait PlayerRoster {
    /// Connected players in host enumeration order.
    fn players(&self) -> Vec<ConnectedPlayer>;

    /// First connected player whose name matches.
    ///
    /// Duplicate names resolve to whichever the host enumerates first.
    fn find_by_name(&self, name: &str) -> Option<ConnectedPlayer> {
        self.players().into_iter().find(|p| p.name_matches(name))
    }
}

impl PlayerRoster for [ConnectedPlayer] {
    fn players(&self) -> Vec<ConnectedPlayer> {
        self.to_vec()
    }
}

impl PlayerRoster for Vec<ConnectedPlayer> {
    fn players(&self) -> Vec<ConnectedPlayer> {
        self.clone()
    }
}
