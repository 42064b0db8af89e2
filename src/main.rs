//! Macrodox Demo Host
//!
//! Drives the tracker with a scripted roster of bots at the configured tick
//! rate, then runs both query commands and logs the replies.
//!
//! Usage: `macrodox-host [config.json]`

use anyhow::Context;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use macrodox::{
    ConnectedPlayer, GroundContact, Invoker, MacrodoxPlugin, PlayerButtons, PlayerSlot,
    PluginConfig, TickInput, VERSION,
};

/// Seconds of simulated play.
const DEMO_SECONDS: u32 = 10;

/// Ticks per simulated jump cycle.
const CYCLE_TICKS: u32 = 48;

/// Airborne ticks per cycle.
const AIR_TICKS: u32 = 36;

#[derive(Clone, Copy, Debug)]
enum BotStyle {
    /// One press at takeoff
    Legit,
    /// Scroll-wheel style presses all the way through the air
    Scroller,
    /// Walks off ledges without jumping; ground reading goes unknown mid-air
    Faller,
}

struct Bot {
    player: ConnectedPlayer,
    style: BotStyle,
}

impl Bot {
    fn new(slot: u32, name: &str, style: BotStyle) -> Self {
        Self {
            player: ConnectedPlayer::new(PlayerSlot::new(slot), name),
            style,
        }
    }

    fn input(&self, tick: u32) -> TickInput {
        let phase = tick % CYCLE_TICKS;
        let airborne = phase > 0 && phase <= AIR_TICKS;

        let (ground, jump) = match self.style {
            BotStyle::Legit => (grounded(airborne), phase < 4),
            BotStyle::Scroller => (grounded(airborne), airborne && phase % 4 < 2),
            BotStyle::Faller => {
                let ground = if airborne && phase % 10 == 5 {
                    GroundContact::Unknown
                } else {
                    grounded(airborne)
                };
                (ground, false)
            }
        };

        let mut buttons = PlayerButtons::NONE;
        buttons.set_jump(jump);
        TickInput::new(self.player.slot, ground, buttons)
    }
}

fn grounded(airborne: bool) -> GroundContact {
    if airborne {
        GroundContact::Airborne
    } else {
        GroundContact::Grounded
    }
}

fn load_config() -> anyhow::Result<PluginConfig> {
    match std::env::args().nth(1) {
        Some(path) => PluginConfig::from_file(&path)
            .with_context(|| format!("loading config from {}", path)),
        None => PluginConfig::from_env().context("loading config from environment"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = load_config()?;
    info!("Macrodox host v{}", VERSION);
    info!("Tick Rate: {} Hz", config.tick_rate);

    let bots = vec![
        Bot::new(0, "Legit", BotStyle::Legit),
        Bot::new(1, "Scroller", BotStyle::Scroller),
        Bot::new(2, "Faller", BotStyle::Faller),
    ];
    // Connected but never enumerated on a tick
    let lurker = ConnectedPlayer::new(PlayerSlot::new(3), "Lurker");

    let mut roster: Vec<ConnectedPlayer> = bots.iter().map(|b| b.player.clone()).collect();
    roster.push(lurker);

    let mut plugin = MacrodoxPlugin::new(config.clone());
    plugin.load(false);

    let total_ticks = config.tick_rate.saturating_mul(DEMO_SECONDS);
    let mut timer = interval(Duration::from_secs_f64(1.0 / config.tick_rate as f64));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Running {} ticks...", total_ticks);

    let mut commits = 0usize;
    for t in 0..total_ticks {
        tokio::select! {
            _ = timer.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C at tick {}, stopping early", t);
                break;
            }
        }

        let inputs: Vec<TickInput> = bots.iter().map(|b| b.input(t)).collect();
        let result = plugin.on_tick(&inputs);
        for event in &result.events {
            debug!("{:?}", event);
        }
        commits += result.commits().count();
    }

    info!("{} airborne periods committed", commits);

    let one = &config.command_one;
    for target in ["scroller", "Lurker", "Ghost", ""] {
        let line = format!("{} {}", one, target);
        if let Some(reply) = plugin.on_command(&roster, Invoker::Console, &line) {
            info!("> {}\n{}", line, reply.reply.unwrap_or_default());
        }
    }

    let all = &config.command_all;
    if let Some(reply) = plugin.on_command(&roster, Invoker::Player(PlayerSlot::new(0)), all) {
        info!("> {}\n{}", all, reply.console.unwrap_or_default());
        if let Some(chat) = reply.chat {
            info!("[chat] {}", chat);
        }
    }

    plugin.unload(false);
    Ok(())
}
