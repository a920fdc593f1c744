//! Events emitted by the engine for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, MapId};

/// Something the UI may want to announce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    /// A map was drawn from the pool.
    MapSelected { map_id: MapId, name: String },
    /// Draft opened.
    DraftStarted,
    /// An agent was banned. `auto` marks timer or AI resolution.
    AgentBanned {
        side: TeamSide,
        agent_id: AgentId,
        auto: bool,
    },
    /// An agent was picked.
    AgentPicked {
        side: TeamSide,
        agent_id: AgentId,
        auto: bool,
    },
    DraftCompleted,
    /// Round clock started for the first time.
    SimulationStarted,
    /// Cosmetic play-by-play line.
    RoundFlavor { round: u32, text: String },
    RoundResolved {
        round: u32,
        winner: TeamSide,
        end_condition: EndCondition,
        home_score: u32,
        away_score: u32,
    },
    TimeoutCalled { side: TeamSide, remaining: u8 },
    TimeoutEnded,
    /// Advice shown during a timeout.
    TacticalAdvice { side: TeamSide, text: String },
    PlayingChanged { playing: bool },
    MatchCompleted {
        winner: Option<TeamSide>,
        home_score: u32,
        away_score: u32,
    },
    MatchExited,
}
