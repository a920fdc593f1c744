//! Collaborator interfaces consumed by the match core.
//!
//! Implementations live outside the core (the host wires file-backed ones).

use crate::enums::{MatchPhase, PlayerRole, TeamSide};
use crate::error::{AdvisoryError, ProviderError};
use crate::results::MatchResult;
use crate::types::{Agent, MatchFixture, RosterMember, TeamId};

/// Read-only access to rosters and the draftable agent pool.
pub trait RosterProvider {
    fn get_team_roster(&self, team_id: TeamId) -> Result<Vec<RosterMember>, ProviderError>;
    fn get_available_agents(&self) -> Result<Vec<Agent>, ProviderError>;
}

/// Supplies the fixture the user elected to play.
pub trait FixtureProvider {
    fn next_fixture(&self) -> Result<MatchFixture, ProviderError>;
}

/// Receives the final result once, after the match completes.
pub trait PersistenceSink: Send {
    fn save_match_result(&mut self, result: &MatchResult) -> Result<(), ProviderError>;
}

/// Situation passed to the advisory text service.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryContext {
    pub side: TeamSide,
    pub phase: MatchPhase,
    pub round: u32,
    pub home_score: u32,
    pub away_score: u32,
    /// Most represented role of the asking side's drafted agents.
    pub focus_role: Option<PlayerRole>,
}

/// Optional, best-effort source of tactical advice text.
pub trait AdvisoryService: Send {
    fn tactical_advice(&self, context: &AdvisoryContext) -> Result<String, AdvisoryError>;
}
