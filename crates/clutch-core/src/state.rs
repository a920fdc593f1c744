//! Match snapshot: the complete visible state returned after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MatchEvent;
use crate::types::{AgentId, Economy, MapLayout};

/// Complete match state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Total time-units the clock has advanced.
    pub elapsed: u64,
    pub phase: MatchPhase,
    pub is_playing: bool,
    pub map: Option<MapLayout>,
    pub round: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub round_timer: u32,
    pub timeout_timer: u32,
    pub timeouts: TimeoutView,
    pub economy: Economy,
    pub draft: Option<DraftView>,
    /// Advisory draft pick for the side to act. Never authoritative.
    pub suggestion: Option<AgentId>,
    pub events: Vec<MatchEvent>,
}

/// Remaining timeouts per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutView {
    pub home: u8,
    pub away: u8,
}

/// Draft progress for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftView {
    pub phase: DraftPhase,
    pub turn_index: usize,
    /// Side to act, `None` once complete.
    pub acting: Option<TeamSide>,
    pub turn_remaining: u32,
    pub banned: Vec<AgentId>,
    pub home_picks: Vec<AgentId>,
    pub away_picks: Vec<AgentId>,
    pub available: Vec<AgentId>,
}
