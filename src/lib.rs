//! # Macrodox
//!
//! Per-tick air jump tracker for game server hosts.
//!
//! Watches every connected player's ground contact and jump button once per
//! tick, counts jump presses made while airborne, and keeps the last ten
//! airborne-period counts per player. Unusually high or perfectly regular
//! counts are a hint that a jump macro or scroll bind is in use.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         MACRODOX                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  game/             - Tick logic (pure, in-memory)            │
//! │  ├── input.rs      - Host signals, grounding policy          │
//! │  ├── detector.rs   - Air jump state machine                  │
//! │  ├── history.rs    - Bounded count history                   │
//! │  ├── registry.rs   - Player identity -> records              │
//! │  └── tick.rs       - Per-tick hook                           │
//! │                                                              │
//! │  commands/         - Host query surface                      │
//! │  ├── roster.rs     - Connected player list                   │
//! │  ├── query.rs      - Name lookup and snapshots               │
//! │  └── dispatch.rs   - Command parsing and reply text          │
//! │                                                              │
//! │  config.rs         - Plugin configuration                    │
//! │  plugin.rs         - Load/unload and host hooks              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! Nothing here locks. The host calls the tick hook and command handlers
//! from the same thread, one at a time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod commands;
pub mod config;
pub mod game;
pub mod plugin;

// Re-export commonly used types
pub use commands::{CommandDispatcher, CommandReply, ConnectedPlayer, Invoker, PlayerRoster, QueryError};
pub use config::{ConfigError, PluginConfig};
pub use game::{GroundContact, JumpRegistry, PlayerButtons, PlayerSlot, TickInput, HISTORY_CAPACITY};
pub use plugin::MacrodoxPlugin;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
