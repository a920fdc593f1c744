//! Host state shared between the input reader and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use clutch_core::commands::PlayerCommand;
use clutch_core::results::MatchResult;
use clutch_core::state::MatchSnapshot;
use clutch_sim::MatchEngine;

use crate::error::AppError;
use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the match engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex`. The latest
/// snapshot is shared with the game loop thread.
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

/// What the caller keeps once the loop is running.
pub struct RunningMatch {
    pub snapshots: mpsc::Receiver<MatchSnapshot>,
    pub thread: JoinHandle<Option<MatchResult>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop for `engine`. Only one match runs at a time.
    pub fn start(&self, engine: MatchEngine, tick_interval: Duration) -> Result<RunningMatch, AppError> {
        let mut running = self.running.lock().map_err(|_| AppError::Poisoned)?;
        if *running {
            return Err(AppError::AlreadyRunning);
        }

        let handle = game_loop::spawn_game_loop(engine, tick_interval, self.latest_snapshot.clone())
            .map_err(AppError::Spawn)?;

        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        *tx_lock = Some(handle.command_tx);
        *running = true;

        Ok(RunningMatch {
            snapshots: handle.snapshots,
            thread: handle.thread,
        })
    }

    /// A sender for an input thread.
    pub fn command_sender(&self) -> Result<mpsc::Sender<GameLoopCommand>, AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        tx_lock.as_ref().cloned().ok_or(AppError::NotStarted)
    }

    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    pub fn shutdown(&self) -> Result<(), AppError> {
        self.send(GameLoopCommand::Shutdown)
    }

    /// Latest snapshot, for polling.
    pub fn snapshot(&self) -> Result<Option<MatchSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::LoopClosed),
            None => Err(AppError::NotStarted),
        }
    }
}
