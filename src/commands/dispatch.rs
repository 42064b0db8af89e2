//! Command Dispatch
//!
//! Parses `macrodox <player>` and `macrodoxall` command lines and renders
//! query results into reply, console and chat text for the host to deliver.

use tracing::debug;

use crate::commands::query::{query_all, query_one, QueryError};
use crate::commands::roster::PlayerRoster;
use crate::config::PluginConfig;
use crate::game::history::HISTORY_CAPACITY;
use crate::game::registry::JumpRegistry;
use crate::game::state::PlayerSlot;

/// Header line of the all-players console block.
pub const ALL_PLAYERS_HEADER: &str = "Jump data for all players:";

/// Chat notice sent to a player after the console block.
pub const CONSOLE_NOTICE: &str = "Jump data for all players has been sent to the console.";

/// Who issued a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invoker {
    /// Server console
    Console,
    /// A connected player
    Player(PlayerSlot),
}

/// Text the host should deliver for one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandReply {
    /// Reply to the command source
    pub reply: Option<String>,
    /// Block for the invoker's console
    pub console: Option<String>,
    /// Chat message to the invoker
    pub chat: Option<String>,
}

impl CommandReply {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Command errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Missing argument.
    #[error("Usage: /{0} <playername>")]
    Usage(String),

    /// Command name not handled here.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Query failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Routes command lines to queries.
#[derive(Clone, Debug)]
pub struct CommandDispatcher {
    command_one: String,
    command_all: String,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::from_config(&PluginConfig::default())
    }
}

impl CommandDispatcher {
    /// Create with command names from config.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            command_one: config.command_one.to_lowercase(),
            command_all: config.command_all.to_lowercase(),
        }
    }

    /// Single-player command name.
    pub fn command_one(&self) -> &str {
        &self.command_one
    }

    /// All-players command name.
    pub fn command_all(&self) -> &str {
        &self.command_all
    }

    /// Check if a command line is addressed to this dispatcher.
    pub fn handles(&self, line: &str) -> bool {
        match split_command(line) {
            Some((name, _)) => name == self.command_one || name == self.command_all,
            None => false,
        }
    }

    /// Run a command line.
    ///
    /// A leading `/` or `!` chat trigger is accepted.
    pub fn dispatch<R: PlayerRoster + ?Sized>(
        &self,
        registry: &JumpRegistry,
        roster: &R,
        invoker: Invoker,
        line: &str,
    ) -> Result<CommandReply, CommandError> {
        let (name, args) = split_command(line)
            .ok_or_else(|| CommandError::UnknownCommand(line.trim().to_string()))?;

        debug!("Command '{}' from {:?}", name, invoker);

        if name == self.command_one {
            let target = args
                .first()
                .ok_or_else(|| CommandError::Usage(self.command_one.clone()))?;
            let report = query_one(registry, roster, target)?;
            Ok(CommandReply::reply(format!(
                "{}'s last {} jumps: {}",
                target,
                HISTORY_CAPACITY,
                report.counts_line()
            )))
        } else if name == self.command_all {
            let mut block = String::from(ALL_PLAYERS_HEADER);
            block.push('\n');
            for report in query_all(registry, roster) {
                block.push_str(&report.to_string());
                block.push('\n');
            }

            let chat = match invoker {
                Invoker::Player(_) => Some(CONSOLE_NOTICE.to_string()),
                Invoker::Console => None,
            };
            Ok(CommandReply {
                reply: None,
                console: Some(block),
                chat,
            })
        } else {
            Err(CommandError::UnknownCommand(name))
        }
    }

    /// Run a command line and turn any error into reply text.
    pub fn respond<R: PlayerRoster + ?Sized>(
        &self,
        registry: &JumpRegistry,
        roster: &R,
        invoker: Invoker,
        line: &str,
    ) -> CommandReply {
        match self.dispatch(registry, roster, invoker, line) {
            Ok(reply) => reply,
            Err(e) => CommandReply::reply(e.to_string()),
        }
    }
}

/// Split a command line into a lowercase command name and its arguments.
fn split_command(line: &str) -> Option<(String, Vec<&str>)> {
    let line = line.trim();
    let line = line
        .strip_prefix('/')
        .or_else(|| line.strip_prefix('!'))
        .unwrap_or(line);

    let mut parts = line.split_whitespace();
    let name = parts.next()?.to_lowercase();
    Some((name, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;
    use crate::commands::roster::ConnectedPlayer;

    fn setup() -> (JumpRegistry, Vec<ConnectedPlayer>) {
        let mut registry = JumpRegistry::new();
        let alice = PlayerSlot::new(1);
        let bob = PlayerSlot::new(2);
        registry.observe(alice, 0);
        registry.observe(bob, 0);
        for n in [2, 1, 3] {
            registry.record(alice, NonZeroU32::new(n).unwrap()).unwrap();
        }
        let roster = vec![
            ConnectedPlayer::new(alice, "Alice"),
            ConnectedPlayer::new(bob, "Bob"),
            ConnectedPlayer::new(PlayerSlot::new(3), "Carol"),
        ];
        (registry, roster)
    }

    #[test]
    fn test_single_player_reply() {
        let (registry, roster) = setup();
        let dispatcher = CommandDispatcher::default();
        let reply = dispatcher
            .dispatch(&registry, &roster, Invoker::Console, "macrodox alice")
            .unwrap();
        assert_eq!(reply.reply.as_deref(), Some("alice's last 10 jumps: 2, 1, 3"));
        assert!(reply.console.is_none());
    }

    #[test]
    fn test_usage_without_argument() {
        let (registry, roster) = setup();
        let dispatcher = CommandDispatcher::default();
        let err = dispatcher
            .dispatch(&registry, &roster, Invoker::Console, "/macrodox")
            .unwrap_err();
        assert_eq!(err, CommandError::Usage("macrodox".to_string()));
        assert_eq!(err.to_string(), "Usage: /macrodox <playername>");
    }

    #[test]
    fn test_error_replies() {
        let (registry, roster) = setup();
        let dispatcher = CommandDispatcher::default();

        let reply = dispatcher.respond(&registry, &roster, Invoker::Console, "macrodox Ghost");
        assert_eq!(reply.reply.as_deref(), Some("Player 'Ghost' not found."));

        let reply = dispatcher.respond(&registry, &roster, Invoker::Console, "!macrodox Carol");
        assert_eq!(reply.reply.as_deref(), Some("No jump data available for Carol."));
    }

    #[test]
    fn test_all_players_from_player() {
        let (registry, roster) = setup();
        let dispatcher = CommandDispatcher::default();
        let reply = dispatcher
            .dispatch(&registry, &roster, Invoker::Player(PlayerSlot::new(2)), "macrodoxall")
            .unwrap();

        assert_eq!(
            reply.console.as_deref(),
            Some("Jump data for all players:\nAlice: 2, 1, 3\nBob: \n")
        );
        assert_eq!(reply.chat.as_deref(), Some(CONSOLE_NOTICE));
        assert!(reply.reply.is_none());
    }

    #[test]
    fn test_all_players_from_console_has_no_chat() {
        let (registry, roster) = setup();
        let dispatcher = CommandDispatcher::default();
        let reply = dispatcher
            .dispatch(&registry, &roster, Invoker::Console, "MACRODOXALL")
            .unwrap();
        assert!(reply.console.is_some());
        assert!(reply.chat.is_none());
    }

    #[test]
    fn test_unknown_command() {
        let (registry, roster) = setup();
        let dispatcher = CommandDispatcher::default();
        assert!(!dispatcher.handles("kick Bob"));
        assert!(dispatcher.handles("/macrodox Bob"));
        assert_eq!(
            dispatcher.dispatch(&registry, &roster, Invoker::Console, "kick Bob"),
            Err(CommandError::UnknownCommand("kick".to_string()))
        );
        assert!(matches!(
            dispatcher.dispatch(&registry, &roster, Invoker::Console, "   "),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_custom_command_names() {
        let (registry, roster) = setup();
        let config = PluginConfig {
            command_one: "Airjumps".to_string(),
            command_all: "airjumpsall".to_string(),
            ..PluginConfig::default()
        };
        let dispatcher = CommandDispatcher::from_config(&config);
        assert_eq!(dispatcher.command_one(), "airjumps");

        let reply = dispatcher.respond(&registry, &roster, Invoker::Console, "airjumps");
        assert_eq!(reply.reply.as_deref(), Some("Usage: /airjumps <playername>"));
        assert!(!dispatcher.handles("macrodox Alice"));
    }
}
