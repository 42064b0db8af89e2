//! Tick Input Capture and Normalization
//!
//! Converts the raw signals a host reports for one player into a
//! [`TickInput`] the detector can consume. Ground contact is tri-state
//! because hosts cannot always resolve the entity a pawn is standing on.

use serde::{Serialize, Deserialize};
use crate::game::state::PlayerSlot;

// =============================================================================
// BUTTONS
// =============================================================================

/// Raw button bitmask as reported by the host for one tick.
///
/// Only the jump bit matters to this crate. A player who rebinds jump to
/// another action (scroll wheel macros bound to a different command, for
/// example) is not seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PlayerButtons(pub u64);

impl PlayerButtons {
    /// No buttons held.
    pub const NONE: Self = Self(0);

    /// Attack bit.
    pub const ATTACK: u64 = 1 << 0;

    /// Jump bit.
    pub const JUMP: u64 = 1 << 1;

    /// Duck bit.
    pub const DUCK: u64 = 1 << 2;

    /// Create from a raw host bitmask.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bitmask.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Check whether the jump button is held this tick.
    #[inline]
    pub const fn jump_held(self) -> bool {
        self.0 & Self::JUMP != 0
    }

    /// Set or clear the jump bit.
    #[inline]
    pub fn set_jump(&mut self, held: bool) {
        if held {
            self.0 |= Self::JUMP;
        } else {
            self.0 &= !Self::JUMP;
        }
    }
}

// =============================================================================
// GROUND CONTACT
// =============================================================================

/// Ground contact as the host sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroundContact {
    /// Standing on a valid ground entity.
    Grounded,
    /// No ground entity.
    Airborne,
    /// The host could not resolve a ground reference (no pawn, stale handle).
    #[default]
    Unknown,
}

impl GroundContact {
    /// Build from an optional host flag. `None` maps to [`GroundContact::Unknown`].
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => GroundContact::Grounded,
            Some(false) => GroundContact::Airborne,
            None => GroundContact::Unknown,
        }
    }

    /// Grounding policy: only a confirmed ground contact counts as grounded.
    ///
    /// An unknown reading is treated as airborne, never as a fault.
    #[inline]
    pub fn is_grounded(self) -> bool {
        matches!(self, GroundContact::Grounded)
    }
}

// =============================================================================
// TICK INPUT
// =============================================================================

/// One player's signals for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Stable host-issued identity
    pub slot: PlayerSlot,

    /// Ground contact reading
    pub ground: GroundContact,

    /// Button bitmask
    pub buttons: PlayerButtons,
}

impl TickInput {
    /// Create from a ground reading and raw buttons.
    pub const fn new(slot: PlayerSlot, ground: GroundContact, buttons: PlayerButtons) -> Self {
        Self { slot, ground, buttons }
    }

    /// Create from plain booleans, the shape most test fixtures use.
    pub fn from_bools(slot: PlayerSlot, on_ground: bool, jump_held: bool) -> Self {
        let mut buttons = PlayerButtons::NONE;
        buttons.set_jump(jump_held);
        Self {
            slot,
            ground: GroundContact::from_flag(Some(on_ground)),
            buttons,
        }
    }

    /// Normalized detector sample.
    #[inline]
    pub fn sample(&self) -> JumpSample {
        JumpSample {
            on_ground: self.ground.is_grounded(),
            jump_held: self.buttons.jump_held(),
        }
    }
}

/// The two booleans the detector actually runs on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JumpSample {
    /// Confirmed ground contact
    pub on_ground: bool,
    /// Jump button level
    pub jump_held: bool,
}

impl JumpSample {
    /// Create a sample.
    pub const fn new(on_ground: bool, jump_held: bool) -> Self {
        Self { on_ground, jump_held }
    }
}

// =============================================================================
// TESTS
// =============================================================================
