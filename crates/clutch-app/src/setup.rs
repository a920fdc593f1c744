//! Wires configuration and file-backed collaborators into a ready engine.

use std::io::BufRead;
use std::sync::mpsc;

use tracing::{info, warn};

use clutch_core::catalog::{AgentCatalog, MapPool};
use clutch_core::commands::PlayerCommand;
use clutch_core::error::ProviderError;
use clutch_core::providers::{FixtureProvider, RosterProvider};
use clutch_core::types::Team;
use clutch_sim::advisory::CannedAdvisor;
use clutch_sim::{MatchEngine, MatchSetup};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::persistence::JsonFileSink;
use crate::providers::League;
use crate::state::GameLoopCommand;

/// The league named in the config, or the demo league.
pub fn load_league(config: &AppConfig) -> Result<League, ProviderError> {
    match &config.roster_path {
        Some(path) => League::from_file(path),
        None => Ok(League::demo()),
    }
}

/// Fixture, teams and reference data for the next match.
pub fn match_setup(league: &League) -> Result<MatchSetup, ProviderError> {
    let fixture = league.next_fixture()?;
    let home = team_for(league, fixture.home_team)?;
    let away = team_for(league, fixture.away_team)?;
    info!(fixture = fixture.id, home = %home.name, away = %away.name, "fixture loaded");

    Ok(MatchSetup {
        fixture,
        home,
        away,
        catalog: AgentCatalog::new(league.get_available_agents()?),
        maps: MapPool::builtin(),
    })
}

fn team_for(league: &League, team_id: u32) -> Result<Team, ProviderError> {
    let mut team = league.team(team_id)?;
    team.roster = league.get_team_roster(team_id)?;
    Ok(team)
}

pub fn build_engine(config: &AppConfig, league: &League) -> Result<MatchEngine, AppError> {
    let setup = match_setup(league)?;
    Ok(MatchEngine::new(config.sim_config(), setup)
        .with_advisor(Box::new(CannedAdvisor))
        .with_sink(Box::new(JsonFileSink::new(&config.results_dir))))
}

/// Forward JSON commands, one per line, to the game loop.
///
/// Returns when input ends or the loop stops accepting commands.
pub fn forward_commands(input: impl BufRead, command_tx: &mpsc::Sender<GameLoopCommand>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "failed to read command input");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(&line) {
            Ok(command) => {
                if command_tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
                    break;
                }
            }
            Err(err) => warn!(%err, input = %line, "ignoring malformed command"),
        }
    }
}
