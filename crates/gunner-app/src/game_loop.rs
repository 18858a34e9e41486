//! Game loop thread: runs the encounter engine at TICK_RATE and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel; the latest snapshot is kept
//! in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::debug;

use gunner_core::constants::TICK_RATE;
use gunner_core::profile::SaveStore;
use gunner_core::state::RunSnapshot;
use gunner_sim::{EncounterEngine, SimConfig};

use crate::feedback::TracingSink;
use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Wall-clock time the loop needs for `ticks` ticks, saturating at `Duration::MAX`.
pub fn wall_time_for(ticks: u64) -> Duration {
    let nanos = TICK_DURATION.as_nanos().saturating_mul(u128::from(ticks));
    u64::try_from(nanos).map_or(Duration::MAX, Duration::from_nanos)
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop<S>(
    config: SimConfig,
    store: S,
    latest_snapshot: Arc<Mutex<Option<RunSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)>
where
    S: SaveStore + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("gunner-game-loop".into())
        .spawn(move || {
            let engine = EncounterEngine::new(config, store).with_sink(TracingSink);
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: EncounterEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<RunSnapshot>>,
) {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    return;
                }
            }
        }

        // 2. Advance one tick (idle and finished runs hold still)
        let snapshot = engine.tick();

        // 3. Publish for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset instead of catching up
            next_tick_time = now;
        }
    }
}
