//! Air Jump Detector
//!
//! Per-player state machine driven once per tick. Counts jump-button rising
//! edges while the player has no ground contact and hands the count back on
//! the tick the player lands.
//!
//! ```text
//!            on_ground = false
//!   ┌──────────┐ ───────────────▶ ┌──────────┐
//!   │ Grounded │                  │ Airborne │ ◀─┐ rising edge: pending += 1
//!   └──────────┘ ◀─────────────── └──────────┘ ──┘
//!            on_ground = true
//!            (commit pending if > 0)
//! ```

use std::num::NonZeroU32;
use serde::{Serialize, Deserialize};

use crate::game::input::JumpSample;

/// Detector phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpPhase {
    /// Has ground contact
    #[default]
    Grounded,
    /// No ground contact
    Airborne,
}

/// Jump tracking state for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpDetector {
    phase: JumpPhase,
    pending_air_jumps: u32,
    jump_button_was_held: bool,
}

impl JumpDetector {
    /// Create a detector in the grounded state.
    pub const fn new() -> Self {
        Self {
            phase: JumpPhase::Grounded,
            pending_air_jumps: 0,
            jump_button_was_held: false,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    /// Whether the player is airborne.
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.phase == JumpPhase::Airborne
    }

    /// Rising edges counted during the current airborne period.
    #[inline]
    pub fn pending_air_jumps(&self) -> u32 {
        self.pending_air_jumps
    }

    /// Jump level seen on the previous airborne tick.
    #[inline]
    pub fn jump_button_was_held(&self) -> bool {
        self.jump_button_was_held
    }

    /// Advance one tick.
    ///
    /// Returns the completed air-jump count on the landing tick, if the
    /// airborne period saw at least one rising edge. A count is never zero.
    pub fn update(&mut self, sample: JumpSample) -> Option<NonZeroU32> {
        if sample.on_ground {
            let was_airborne = self.is_airborne();
            let pending = std::mem::take(&mut self.pending_air_jumps);

            self.phase = JumpPhase::Grounded;
            self.jump_button_was_held = false;

            if was_airborne {
                #[cfg(feature = "debug-tracing")]
                tracing::trace!(pending, "landed");
                return NonZeroU32::new(pending);
            }
            return None;
        }

        self.phase = JumpPhase::Airborne;

        if sample.jump_held && !self.jump_button_was_held {
            self.pending_air_jumps = self.pending_air_jumps.saturating_add(1);

            #[cfg(feature = "debug-tracing")]
            tracing::trace!(pending = self.pending_air_jumps, "air jump edge");
        }
        self.jump_button_was_held = sample.jump_held;

        None
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn air(jump: bool) -> JumpSample {
        JumpSample::new(false, jump)
    }

    fn ground() -> JumpSample {
        JumpSample::new(true, false)
    }

    #[test]
    fn test_initial_state() {
        let detector = JumpDetector::new();
        assert_eq!(detector.phase(), JumpPhase::Grounded);
        assert_eq!(detector.pending_air_jumps(), 0);
        assert!(!detector.jump_button_was_held());
        assert_eq!(detector, JumpDetector::default());
    }

    #[test]
    fn test_edge_triggered_counting() {
        let mut detector = JumpDetector::new();
        for held in [true, true, false, true] {
            assert_eq!(detector.update(air(held)), None);
        }
        // Edges at index 0 and 3 only
        assert_eq!(detector.pending_air_jumps(), 2);
        assert!(detector.is_airborne());
    }

    #[test]
    fn test_commit_on_landing() {
        let mut detector = JumpDetector::new();
        detector.update(air(true));
        detector.update(air(false));
        detector.update(air(true));

        assert_eq!(detector.update(ground()), NonZeroU32::new(2));
        assert_eq!(detector.phase(), JumpPhase::Grounded);
        assert_eq!(detector.pending_air_jumps(), 0);
        assert!(!detector.jump_button_was_held());
    }

    #[test]
    fn test_fall_without_jumping_commits_nothing() {
        let mut detector = JumpDetector::new();
        for _ in 0..20 {
            detector.update(air(false));
        }
        assert_eq!(detector.update(ground()), None);
        assert_eq!(detector.pending_air_jumps(), 0);
    }

    #[test]
    fn test_repeated_grounded_ticks_do_not_recommit() {
        let mut detector = JumpDetector::new();
        detector.update(air(true));
        assert!(detector.update(ground()).is_some());

        for _ in 0..10 {
            assert_eq!(detector.update(ground()), None);
            assert_eq!(detector.pending_air_jumps(), 0);
        }
    }

    #[test]
    fn test_jump_held_through_takeoff_counts_once() {
        // Jump pressed on the ground then held into the air: the ground tick
        // clears the previous level, so the first airborne tick is an edge.
        let mut detector = JumpDetector::new();
        detector.update(JumpSample::new(true, true));
        detector.update(air(true));
        detector.update(air(true));
        detector.update(air(true));
        assert_eq!(detector.pending_air_jumps(), 1);
    }

    #[test]
    fn test_grounded_jump_input_is_ignored() {
        let mut detector = JumpDetector::new();
        for held in [true, false, true, false] {
            assert_eq!(detector.update(JumpSample::new(true, held)), None);
        }
        assert_eq!(detector.pending_air_jumps(), 0);
    }

    proptest! {
        #[test]
        fn prop_pending_equals_rising_edges(held in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut detector = JumpDetector::new();
            let mut expected = 0u32;
            let mut prev = false;
            for &h in &held {
                if h && !prev {
                    expected += 1;
                }
                prev = h;
                prop_assert_eq!(detector.update(air(h)), None);
            }
            prop_assert_eq!(detector.pending_air_jumps(), expected);

            let committed = detector.update(ground());
            prop_assert_eq!(committed.map(NonZeroU32::get).unwrap_or(0), expected);
            prop_assert_eq!(detector.pending_air_jumps(), 0);
        }

        #[test]
        fn prop_pending_only_grows_while_airborne(
            ticks in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..128)
        ) {
            let mut detector = JumpDetector::new();
            for (on_ground, held) in ticks {
                let before = detector.pending_air_jumps();
                let committed = detector.update(JumpSample::new(on_ground, held));
                if on_ground {
                    prop_assert_eq!(detector.pending_air_jumps(), 0);
                    if let Some(count) = committed {
                        prop_assert_eq!(count.get(), before);
                    }
                } else {
                    prop_assert!(committed.is_none());
                    prop_assert!(detector.pending_air_jumps() >= before);
                    prop_assert!(detector.pending_air_jumps() <= before + 1);
                }
            }
        }
    }
}
