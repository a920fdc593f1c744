//! Error types shared across crates.

use thiserror::Error;

use crate::enums::{DraftPhase, TeamSide};
use crate::types::{AgentId, MapId, TeamId};

/// Reference-data lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),
    #[error("map {0} not found")]
    MapNotFound(MapId),
}

/// Rejected draft actions. The draft state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("agent {0} is already banned or picked")]
    InvalidSelection(AgentId),
    #[error("agent {0} is not in the draft pool")]
    UnknownAgent(AgentId),
    #[error("it is {expected:?}'s turn, not {got:?}'s")]
    OutOfTurn { expected: TeamSide, got: TeamSide },
    #[error("action not allowed during the {0:?} phase")]
    WrongPhase(DraftPhase),
    #[error("draft is already complete")]
    DraftComplete,
    #[error("no agents left to select")]
    PoolExhausted,
}

/// Failures reported by roster, fixture and persistence collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("team {0} not found")]
    TeamNotFound(TeamId),
    #[error("no fixture available")]
    NoFixture,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of the advisory text service. Always recovered with canned text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisoryError {
    #[error("advisory service unavailable: {0}")]
    Unavailable(String),
    #[error("advisory service timed out")]
    Timeout,
}
