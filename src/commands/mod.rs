//! Command Layer
//!
//! Host-facing query surface. Reads the registry, never mutates it.

pub mod roster;
pub mod query;
pub mod dispatch;

pub use roster::{ConnectedPlayer, PlayerRoster};
pub use query::{query_all, query_one, PlayerReport, QueryError};
pub use dispatch::{CommandDispatcher, CommandError, CommandReply, Invoker};
