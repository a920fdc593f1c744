//! Post-match records handed to the persistence collaborator.

use serde::{Deserialize, Serialize};

use crate::enums::TeamSide;
use crate::types::{MapId, PlayerId, TeamId};

/// Aggregated statistics for one player over a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub player_id: PlayerId,
    pub name: String,
    pub side: TeamSide,
    pub kills: u32,
    pub deaths: u32,
    pub headshots: u32,
    pub damage: u32,
    /// Average damage per round.
    pub adr: f64,
    pub clutches: u32,
    pub rating: f64,
}

impl PlayerMatchStats {
    /// Kill/death ratio, or raw kills when the player never died.
    pub fn kd(&self) -> f64 {
        if self.deaths == 0 {
            self.kills as f64
        } else {
            self.kills as f64 / self.deaths as f64
        }
    }
}

/// Final outcome of a completed match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub fixture_id: u64,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub map: Option<MapId>,
    /// `None` only for an even score, which the margin rule rules out.
    pub winner: Option<TeamSide>,
    pub home_score: u32,
    pub away_score: u32,
    pub rounds_played: u32,
    /// Sum of round durations in time-units.
    pub duration: u32,
    pub mvp: Option<PlayerMatchStats>,
    pub player_stats: Vec<PlayerMatchStats>,
    pub analysis: Vec<String>,
}
