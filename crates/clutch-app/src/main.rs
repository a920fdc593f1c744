use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use clutch_app::config::AppConfig;
use clutch_app::error::AppError;
use clutch_app::setup::{build_engine, forward_commands, load_league};
use clutch_app::state::AppState;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "clutch stopped");
            ExitCode::FAILURE
        }
    }
}

/// Usage: `clutch-app [config.json]`. Commands are read from stdin as JSON
/// lines; events and the final result are written to stdout as JSON lines.
fn run() -> Result<(), AppError> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    let league = load_league(&config)?;
    let engine = build_engine(&config, &league)?;

    let state = AppState::new();
    let running = state.start(engine, config.tick_interval())?;

    let command_tx = state.command_sender()?;
    std::thread::Builder::new()
        .name("clutch-input".into())
        .spawn(move || forward_commands(io::stdin().lock(), &command_tx))
        .map_err(AppError::Spawn)?;

    let stdout = io::stdout();
    for snapshot in running.snapshots.iter() {
        let mut out = stdout.lock();
        for event in &snapshot.events {
            let line = serde_json::to_string(event)?;
            // A closed stdout is not worth stopping the match for.
            let _ = writeln!(out, "{line}");
        }
    }

    let result = running.thread.join().map_err(|_| AppError::LoopPanicked)?;
    match result {
        Some(result) => {
            info!(
                winner = ?result.winner,
                home = result.home_score,
                away = result.away_score,
                "final result"
            );
            let line = serde_json::to_string(&result)?;
            let _ = writeln!(stdout.lock(), "{line}");
        }
        None => info!("match ended without a result"),
    }
    Ok(())
}
