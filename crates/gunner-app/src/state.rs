//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::info;

use gunner_core::commands::PlayerCommand;
use gunner_core::profile::SaveStore;
use gunner_core::state::RunSnapshot;
use gunner_sim::SimConfig;

use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the encounter engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("game loop already running")]
    AlreadyRunning,
    #[error("game loop not started")]
    NotStarted,
    #[error("game loop has shut down")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle to a background game loop.
///
/// `mpsc::Sender` is not Sync, so it sits behind a `Mutex`; the latest
/// snapshot is shared with the loop thread through `Arc<Mutex<..>>`.
#[derive(Default)]
pub struct AppState {
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    loop_thread: Mutex<Option<JoinHandle<()>>>,
    latest_snapshot: Arc<Mutex<Option<RunSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop. Fails if one is already running.
    pub fn start(
        &self,
        config: SimConfig,
        store: impl SaveStore + Send + 'static,
    ) -> Result<(), AppError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, store, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        *self.loop_thread.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
        info!(seed = config.seed, "game loop started");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Forward a player command to the loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|_| AppError::Disconnected),
            None => Err(AppError::NotStarted),
        }
    }

    /// Latest snapshot published by the loop, if it has ticked yet.
    pub fn latest_snapshot(&self) -> Result<Option<RunSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the loop and wait for its thread to exit.
    pub fn shutdown(&self) -> Result<(), AppError> {
        let tx = self
            .command_tx
            .lock()
            .map_err(|_| AppError::Poisoned)?
            .take()
            .ok_or(AppError::NotStarted)?;
        // A loop that already exited has dropped its receiver.
        let _ = tx.send(GameLoopCommand::Shutdown);

        let handle = self.loop_thread.lock().map_err(|_| AppError::Poisoned)?.take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| AppError::Disconnected)?;
        }
        info!("game loop stopped");
        Ok(())
    }
}
