//! File-backed roster and fixture collaborators.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use clutch_core::catalog::AgentCatalog;
use clutch_core::enums::PlayerRole;
use clutch_core::error::ProviderError;
use clutch_core::providers::{FixtureProvider, RosterProvider};
use clutch_core::types::{Agent, MatchFixture, RosterMember, Team, TeamId};

/// Teams and scheduled fixtures, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct League {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub fixtures: Vec<MatchFixture>,
}

impl League {
    pub fn from_file(path: &Path) -> Result<Self, ProviderError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Two evenly matched built-in teams.
    pub fn demo() -> Self {
        Self {
            teams: vec![
                demo_team(1, "Northgate", 100, &["Vex", "Harrow", "Lumen", "Brick", "Osei"], 74.0),
                demo_team(2, "Saltmarsh", 200, &["Kiro", "Dune", "Maple", "Tarn", "Ilse"], 72.0),
            ],
            fixtures: Vec::new(),
        }
    }

    pub fn team(&self, team_id: TeamId) -> Result<Team, ProviderError> {
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .cloned()
            .ok_or(ProviderError::TeamNotFound(team_id))
    }
}

fn demo_team(id: TeamId, name: &str, first_player: u32, names: &[&str], base: f64) -> Team {
    const ROLES: [PlayerRole; 5] = [
        PlayerRole::Duelist,
        PlayerRole::Initiator,
        PlayerRole::Controller,
        PlayerRole::Sentinel,
        PlayerRole::Flex,
    ];
    let roster = names
        .iter()
        .zip(ROLES)
        .enumerate()
        .map(|(i, (player, role))| {
            let spread = i as f64 * 2.0;
            RosterMember {
                id: first_player + i as u32,
                name: (*player).to_string(),
                role,
                aim: base + spread,
                game_iq: base - spread / 2.0,
                clutch: base,
                teamwork: base + 1.0,
                positioning: base - 1.0,
                morale: 75.0,
            }
        })
        .collect();
    Team {
        id,
        name: name.to_string(),
        roster,
    }
}

impl RosterProvider for League {
    fn get_team_roster(&self, team_id: TeamId) -> Result<Vec<RosterMember>, ProviderError> {
        self.team(team_id).map(|t| t.roster)
    }

    fn get_available_agents(&self) -> Result<Vec<Agent>, ProviderError> {
        Ok(AgentCatalog::builtin().list_agents().to_vec())
    }
}

impl FixtureProvider for League {
    /// The first scheduled fixture, or the first two teams paired up.
    fn next_fixture(&self) -> Result<MatchFixture, ProviderError> {
        if let Some(fixture) = self.fixtures.iter().min_by_key(|f| f.scheduled_at) {
            return Ok(fixture.clone());
        }
        match self.teams.as_slice() {
            [home, away, ..] => Ok(MatchFixture {
                id: 1,
                home_team: home.id,
                away_team: away.id,
                scheduled_at: 0,
            }),
            _ => Err(ProviderError::NoFixture),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_league_has_a_fixture() {
        let league = League::demo();
        let fixture = league.next_fixture().unwrap();
        assert_eq!((fixture.home_team, fixture.away_team), (1, 2));
        assert_eq!(league.get_team_roster(2).unwrap().len(), 5);
        assert_eq!(league.get_available_agents().unwrap().len(), 20);
    }

    #[test]
    fn test_unknown_team() {
        let err = League::demo().get_team_roster(99).unwrap_err();
        assert!(matches!(err, ProviderError::TeamNotFound(99)));
    }

    #[test]
    fn test_single_team_has_no_fixture() {
        let mut league = League::demo();
        league.teams.truncate(1);
        assert!(matches!(league.next_fixture(), Err(ProviderError::NoFixture)));
    }

    #[test]
    fn test_earliest_scheduled_fixture_wins() {
        let mut league = League::demo();
        league.fixtures = vec![
            MatchFixture { id: 9, home_team: 2, away_team: 1, scheduled_at: 500 },
            MatchFixture { id: 4, home_team: 1, away_team: 2, scheduled_at: 100 },
        ];
        assert_eq!(league.next_fixture().unwrap().id, 4);
    }

    #[test]
    fn test_league_file_round_trip() {
        let dir = std::env::temp_dir().join("clutch_test_league");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("league.json");
        fs::write(&path, serde_json::to_string(&League::demo()).unwrap()).unwrap();

        let league = League::from_file(&path).unwrap();
        assert_eq!(league.teams.len(), 2);
        assert_eq!(league.team(1).unwrap().name, "Northgate");
        fs::remove_dir_all(&dir).unwrap();
    }
}
