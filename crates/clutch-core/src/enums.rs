//! Enumeration types used throughout the match.

use serde::{Deserialize, Serialize};

/// Which team, from the fixture's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Side to act for a turn index within a draft sub-sequence.
    pub fn for_parity(index: usize) -> Self {
        if index % 2 == 0 {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }
}

/// Which half of the map a team occupies for a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Attack,
    Defense,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Attack => Side::Defense,
            Side::Defense => Side::Attack,
        }
    }
}

/// Agent role. Drafted agents always carry one of these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Duelist,
    Initiator,
    Controller,
    Sentinel,
}

/// Role a roster member plays. Players may also be flex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Duelist,
    Initiator,
    Controller,
    Sentinel,
    #[default]
    Flex,
}

impl From<AgentRole> for PlayerRole {
    fn from(role: AgentRole) -> Self {
        match role {
            AgentRole::Duelist => PlayerRole::Duelist,
            AgentRole::Initiator => PlayerRole::Initiator,
            AgentRole::Controller => PlayerRole::Controller,
            AgentRole::Sentinel => PlayerRole::Sentinel,
        }
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCondition {
    Elimination,
    Defuse,
    Explode,
    Time,
}

/// Cosmetic weapon catalog for kill events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    Rifle,
    Carbine,
    Sniper,
    Smg,
    Sidearm,
}

impl Weapon {
    pub const ALL: [Weapon; 5] = [
        Weapon::Rifle,
        Weapon::Carbine,
        Weapon::Sniper,
        Weapon::Smg,
        Weapon::Sidearm,
    ];
}

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    MapSelection,
    Draft,
    MapBan,
    /// Reserved for a pre-round strategy screen. Never entered by the default flow.
    Strategy,
    Simulation,
    Timeout,
    Completed,
    /// The match was abandoned by the user. Terminal.
    Exited,
}

impl MatchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Completed | MatchPhase::Exited)
    }
}

/// Draft sub-phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    #[default]
    Ban,
    Pick,
    Complete,
}
