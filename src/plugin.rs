//! Plugin Lifecycle
//!
//! Wires the tracker into a host: load/unload, the per-tick hook, the
//! disconnect hook and command handling. The plugin owns the registry; the
//! host only ever calls into it from its game thread.

use tracing::{info, warn};

use crate::commands::dispatch::{CommandDispatcher, CommandReply, Invoker};
use crate::commands::roster::PlayerRoster;
use crate::config::PluginConfig;
use crate::game::events::JumpEvent;
use crate::game::input::TickInput;
use crate::game::registry::JumpRegistry;
use crate::game::state::PlayerSlot;
use crate::game::tick::{tick, TickResult};

/// Module name reported to the host.
pub const MODULE_NAME: &str = "Macrodox";

/// Module version reported to the host.
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Module author reported to the host.
pub const MODULE_AUTHOR: &str = "eboyfriends";

/// The tracker as a host plugin.
#[derive(Debug)]
pub struct MacrodoxPlugin {
    config: PluginConfig,
    dispatcher: CommandDispatcher,
    registry: JumpRegistry,
    tick: u32,
    loaded: bool,
}

impl MacrodoxPlugin {
    /// Create an unloaded plugin.
    pub fn new(config: PluginConfig) -> Self {
        let dispatcher = CommandDispatcher::from_config(&config);
        Self {
            config,
            dispatcher,
            registry: JumpRegistry::new(),
            tick: 0,
            loaded: false,
        }
    }

    /// Host load callback. Always starts from an empty registry.
    pub fn load(&mut self, hot_reload: bool) {
        info!(
            "Loading {} v{} (hot reload: {}, commands: {}, {})",
            MODULE_NAME,
            MODULE_VERSION,
            hot_reload,
            self.dispatcher.command_one(),
            self.dispatcher.command_all()
        );
        self.registry = JumpRegistry::new();
        self.tick = 0;
        self.loaded = true;
    }

    /// Host unload callback. Discards all tracked state.
    pub fn unload(&mut self, hot_reload: bool) {
        info!(
            "Unloading {} (hot reload: {}, {} players tracked)",
            MODULE_NAME,
            hot_reload,
            self.registry.len()
        );
        self.registry.clear();
        self.loaded = false;
    }

    /// Whether the plugin is loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Per-tick hook: feed every connected player's signals.
    pub fn on_tick(&mut self, inputs: &[TickInput]) -> TickResult {
        if !self.loaded {
            return TickResult::default();
        }
        self.tick = self.tick.wrapping_add(1);
        tick(&mut self.registry, self.tick, inputs)
    }

    /// Host disconnect notification.
    ///
    /// The record is always closed: an airborne period in progress is
    /// dropped and the next occupant of the slot starts fresh. The history is
    /// removed as well only when `forget_on_disconnect` is enabled.
    pub fn on_player_disconnect(&mut self, slot: PlayerSlot) -> Option<JumpEvent> {
        if !self.registry.disconnect(slot, self.tick) {
            return None;
        }
        if !self.config.forget_on_disconnect {
            return None;
        }
        self.registry
            .forget(slot)
            .map(|_| JumpEvent::player_forgotten(self.tick, slot))
    }

    /// Handle a command line. Returns `None` for commands this plugin does not own.
    pub fn on_command<R: PlayerRoster + ?Sized>(
        &self,
        roster: &R,
        invoker: Invoker,
        line: &str,
    ) -> Option<CommandReply> {
        if !self.dispatcher.handles(line) {
            return None;
        }
        if !self.loaded {
            warn!("Command '{}' received while unloaded", line.trim());
        }
        Some(self.dispatcher.respond(&self.registry, roster, invoker, line))
    }

    /// Tracked state.
    pub fn registry(&self) -> &JumpRegistry {
        &self.registry
    }

    /// Ticks processed since load.
    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    /// Active configuration.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}
