//! Game loop thread: advances the engine one time-unit per tick interval.
//!
//! The engine is moved into the thread and owned there. Commands arrive via an
//! `mpsc` channel; every snapshot is sent out on a second channel and stored in
//! shared state for synchronous polling. The thread returns the final result.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use clutch_core::results::MatchResult;
use clutch_core::state::MatchSnapshot;
use clutch_sim::MatchEngine;

use crate::state::GameLoopCommand;

/// Handles returned when the loop is spawned.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<MatchSnapshot>,
    pub thread: JoinHandle<Option<MatchResult>>,
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: MatchEngine,
    tick_interval: Duration,
    latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
) -> io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<MatchSnapshot>();

    let thread = std::thread::Builder::new()
        .name("clutch-game-loop".into())
        .spawn(move || run_game_loop(engine, tick_interval, cmd_rx, snap_tx, &latest_snapshot))?;

    Ok(GameLoopHandle {
        command_tx: cmd_tx,
        snapshots: snap_rx,
        thread,
    })
}

/// Runs until the match ends, a Shutdown command arrives or either channel
/// disconnects.
fn run_game_loop(
    mut engine: MatchEngine,
    tick_interval: Duration,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snap_tx: mpsc::Sender<MatchSnapshot>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
) -> Option<MatchResult> {
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop shutting down");
                    return engine.result().cloned();
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. One time-unit (the engine ignores it while paused)
        let snapshot = engine.tick(1);
        let finished = snapshot.phase.is_terminal();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Publish
        if snap_tx.send(snapshot).is_err() {
            debug!("snapshot receiver dropped");
            return engine.result().cloned();
        }
        if finished {
            info!(phase = ?engine.phase(), "match over, game loop exiting");
            return engine.result().cloned();
        }

        // 5. Sleep until next tick
        next_tick_time += tick_interval;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_interval * 2 {
            // Too far behind, reset instead of catching up
            next_tick_time = now;
        }
    }
}
