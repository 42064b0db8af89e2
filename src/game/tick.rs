//! Per-Tick Update
//!
//! The hook the host calls once per server tick with every connected
//! player's signals. Infallible: it only reads primitive signals and
//! mutates registry state.

use crate::game::events::JumpEvent;
use crate::game::input::TickInput;
use crate::game::registry::JumpRegistry;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, sorted
    pub events: Vec<JumpEvent>,
    /// Players processed this tick
    pub observed: usize,
}

impl TickResult {
    /// Commit events only.
    pub fn commits(&self) -> impl Iterator<Item = &JumpEvent> {
        self.events.iter().filter(|e| e.committed_count().is_some())
    }
}

/// Run one tick over every enumerated player.
///
/// Players are created in the registry on their first tick. Each player
/// is expected at most once per call.
pub fn tick(registry: &mut JumpRegistry, tick: u32, inputs: &[TickInput]) -> TickResult {
    let mut result = TickResult::default();

    for input in inputs {
        let (player, created) = registry.observe(input.slot, tick);
        if created {
            result.events.push(JumpEvent::player_tracked(tick, input.slot));
        }

        if let Some(count) = player.detector.update(input.sample()) {
            player.history.record(count);
            let history_len = player.history.len();

            tracing::debug!(
                "Player {} landed with {} air jumps (history {})",
                input.slot, count, history_len
            );
            result.events.push(JumpEvent::air_jumps_committed(
                tick,
                input.slot,
                count,
                history_len,
            ));
        }

        result.observed += 1;
    }

    result.events.sort();
    result
}

/// Replay recorded ticks starting at `start_tick`.
///
/// Returns all events in order.
pub fn replay(
    registry: &mut JumpRegistry,
    start_tick: u32,
    frames: &[Vec<TickInput>],
) -> Vec<JumpEvent> {
    let mut all_events = Vec::new();
    for (offset, inputs) in frames.iter().enumerate() {
        let t = start_tick.wrapping_add(offset as u32);
        all_events.extend(tick(registry, t, inputs).events);
    }
    all_events
}
