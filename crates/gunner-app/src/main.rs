//! `gunner` command-line driver.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use gunner_app::autopilot::{self, Autopilot};
use gunner_app::feedback::TracingSink;
use gunner_app::game_loop::{self, TICK_DURATION};
use gunner_app::state::AppState;
use gunner_campaign::{shop, JsonFileStore};
use gunner_core::catalog;
use gunner_core::commands::PlayerCommand;
use gunner_core::enums::{GameMode, RunPhase, UpgradeTrack};
use gunner_core::profile::SaveStore;
use gunner_core::state::RunSnapshot;
use gunner_sim::{EncounterEngine, SimConfig};

#[derive(Parser)]
#[command(name = "gunner")]
#[command(about = "Headless arcade shooting-gallery encounters")]
struct Cli {
    /// Profile file (defaults to the platform data directory)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one run with the autopilot
    Play {
        /// RNG seed for the encounter
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = ModeArg::Campaign)]
        mode: ModeArg,

        /// Campaign level id (ignored in endless mode)
        #[arg(long, default_value_t = 1)]
        level: u32,

        /// Give up after this many frames
        #[arg(long, default_value_t = 36_000)]
        frames: u64,

        /// Autopilot hit probability, 0.0 to 1.0
        #[arg(long, default_value_t = 0.8)]
        accuracy: f64,

        /// Run on the game loop thread at wall-clock speed
        #[arg(long)]
        realtime: bool,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored profile and level select
    Profile {
        /// Delete the save file first
        #[arg(long)]
        reset: bool,
    },
    /// List upgrades, or buy one
    Shop {
        /// Track to buy: damage, capacity or reload
        buy: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Campaign,
    Endless,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Campaign => GameMode::Campaign,
            ModeArg::Endless => GameMode::Endless,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut store = open_store(cli.profile)?;
    match cli.command {
        Command::Play {
            seed,
            mode,
            level,
            frames,
            accuracy,
            realtime,
            json,
        } => {
            let config = SimConfig {
                seed,
                ..Default::default()
            };
            let pilot = Autopilot::new(seed, accuracy);
            let snapshot = if realtime {
                play_realtime(config, store, pilot, mode.into(), level, frames)?
            } else {
                play_headless(config, store, pilot, mode.into(), level, frames)?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_summary(&snapshot);
            }
        }
        Command::Profile { reset } => {
            if reset {
                store.delete().context("failed to delete profile")?;
            }
            let profile = store.load();
            println!("profile: {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(&profile)?);
            for entry in shop::level_select(&profile) {
                let lock = if entry.unlocked { " " } else { "x" };
                println!("[{lock}] {} {}", entry.id, entry.name);
            }
        }
        Command::Shop { buy } => {
            if let Some(name) = buy {
                let track = UpgradeTrack::parse(&name)
                    .with_context(|| format!("unknown upgrade track '{name}'"))?;
                let spent = shop::purchase(&mut store, track, &mut TracingSink)?;
                println!("bought {} for {spent}", track.as_str());
            }
            let profile = store.load();
            println!("currency: {}", profile.total_currency);
            for offer in shop::offers(&profile) {
                let price = offer
                    .cost
                    .map_or_else(|| "max".to_string(), |cost| cost.to_string());
                println!("{:<13} lvl {}  {price}", offer.track.as_str(), offer.level);
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn open_store(path: Option<PathBuf>) -> Result<JsonFileStore> {
    path.or_else(JsonFileStore::default_path)
        .map(JsonFileStore::new)
        .context("no data directory on this platform; pass --profile")
}

fn play_headless(
    config: SimConfig,
    store: JsonFileStore,
    mut pilot: Autopilot,
    mode: GameMode,
    level: u32,
    frames: u64,
) -> Result<RunSnapshot> {
    let mut engine = EncounterEngine::new(config, store).with_sink(TracingSink);
    engine.start(mode, level)?;
    Ok(autopilot::drive(&mut engine, &mut pilot, frames))
}

fn play_realtime(
    config: SimConfig,
    store: JsonFileStore,
    mut pilot: Autopilot,
    mode: GameMode,
    level: u32,
    frames: u64,
) -> Result<RunSnapshot> {
    // Validate up front; the loop thread would only log a rejected start.
    if catalog::level_for(mode, level).is_none() {
        bail!("no campaign level with id {level}");
    }
    if mode == GameMode::Campaign && !store.load().is_level_unlocked(level) {
        bail!("level {level} is locked");
    }

    let app = AppState::new();
    app.start(config, store)?;
    app.send_command(PlayerCommand::Start {
        mode,
        level_id: level,
    })?;

    let started = Instant::now();
    let mut last_tick = None;
    let mut last = None;
    let budget = game_loop::wall_time_for(frames);
    while started.elapsed() < budget {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = app.latest_snapshot()? else {
            continue;
        };
        if last_tick == Some(snapshot.time.tick) {
            continue;
        }
        last_tick = Some(snapshot.time.tick);

        let finished = matches!(snapshot.phase, RunPhase::Victory | RunPhase::Defeat);
        if !finished {
            for command in pilot.decide(&snapshot) {
                app.send_command(command)?;
            }
        }
        last = Some(snapshot);
        if finished {
            break;
        }
    }

    app.shutdown()?;
    last.context("game loop produced no snapshot")
}

fn print_summary(snapshot: &RunSnapshot) {
    let outcome = match snapshot.phase {
        RunPhase::Victory => "victory",
        RunPhase::Defeat => "defeat",
        RunPhase::Running => "out of frames",
        RunPhase::Idle => "stopped",
    };
    println!("{} ({}): {outcome}", snapshot.level.name, snapshot.level.id);
    println!(
        "score {}  best {}  kills {}  health {}/{}  currency +{}  time {:.1}s",
        snapshot.stats.score,
        snapshot.stats.high_score,
        snapshot.stats.kills,
        snapshot.stats.health,
        snapshot.stats.max_health,
        snapshot.stats.currency,
        snapshot.time.elapsed_ms as f64 / 1000.0,
    );
}
