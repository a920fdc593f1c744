//! Match data model: agents, rosters, maps, compositions, economy and rounds.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CREDITS, STARTING_CREDITS};
use crate::enums::*;

pub type AgentId = u32;
pub type PlayerId = u32;
pub type TeamId = u32;
pub type MapId = u32;

/// A draftable agent. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub role: AgentRole,
    /// 1 (easy) to 5 (hard).
    pub difficulty: u8,
}

/// A player within a match context. Attributes and morale are 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: PlayerId,
    pub name: String,
    pub role: PlayerRole,
    pub aim: f64,
    pub game_iq: f64,
    pub clutch: f64,
    pub teamwork: f64,
    pub positioning: f64,
    pub morale: f64,
}

impl RosterMember {
    /// Mean of the five skill attributes.
    pub fn skill_average(&self) -> f64 {
        (self.aim + self.game_iq + self.clutch + self.teamwork + self.positioning) / 5.0
    }
}

/// A team as supplied by the roster provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub roster: Vec<RosterMember>,
}

/// Map shape used by the synergy model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    pub id: MapId,
    pub name: String,
    pub bomb_sites: u8,
    pub choke_points: u8,
    /// Disabled maps are never drawn during map selection.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for MapLayout {
    /// A generic two-site layout, used when no pool map is available.
    fn default() -> Self {
        Self {
            id: 0,
            name: "Standard".to_string(),
            bomb_sites: 2,
            choke_points: 4,
            enabled: true,
        }
    }
}

/// Role counts for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamComposition {
    pub duelist: u32,
    pub initiator: u32,
    pub controller: u32,
    pub sentinel: u32,
    pub flex: u32,
}

impl TeamComposition {
    pub const fn new(duelist: u32, initiator: u32, controller: u32, sentinel: u32, flex: u32) -> Self {
        Self {
            duelist,
            initiator,
            controller,
            sentinel,
            flex,
        }
    }

    /// Count the roles of a set of drafted agents.
    pub fn from_agents<'a>(agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        Self::from_roles(agents.into_iter().map(|a| PlayerRole::from(a.role)))
    }

    pub fn from_roles(roles: impl IntoIterator<Item = PlayerRole>) -> Self {
        let mut comp = Self::default();
        for role in roles {
            *comp.count_mut(role) += 1;
        }
        comp
    }

    pub fn count(&self, role: PlayerRole) -> u32 {
        match role {
            PlayerRole::Duelist => self.duelist,
            PlayerRole::Initiator => self.initiator,
            PlayerRole::Controller => self.controller,
            PlayerRole::Sentinel => self.sentinel,
            PlayerRole::Flex => self.flex,
        }
    }

    fn count_mut(&mut self, role: PlayerRole) -> &mut u32 {
        match role {
            PlayerRole::Duelist => &mut self.duelist,
            PlayerRole::Initiator => &mut self.initiator,
            PlayerRole::Controller => &mut self.controller,
            PlayerRole::Sentinel => &mut self.sentinel,
            PlayerRole::Flex => &mut self.flex,
        }
    }

    /// Counts in `[duelist, initiator, controller, sentinel, flex]` order.
    pub fn as_array(&self) -> [u32; 5] {
        [
            self.duelist,
            self.initiator,
            self.controller,
            self.sentinel,
            self.flex,
        ]
    }

    pub fn total(&self) -> u32 {
        self.as_array().iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Number of roles with at least one agent.
    pub fn covered_roles(&self) -> usize {
        self.as_array().iter().filter(|&&c| c > 0).count()
    }

    /// Most represented role. Ties resolve in duelist→flex order.
    pub fn dominant_role(&self) -> Option<PlayerRole> {
        const ORDER: [PlayerRole; 5] = [
            PlayerRole::Duelist,
            PlayerRole::Initiator,
            PlayerRole::Controller,
            PlayerRole::Sentinel,
            PlayerRole::Flex,
        ];
        let mut best: Option<(PlayerRole, u32)> = None;
        for role in ORDER {
            let count = self.count(role);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((role, count));
            }
        }
        best.map(|(role, _)| role)
    }
}

/// Per-side credits, always within `[0, MAX_CREDITS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    pub home: u32,
    pub away: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            home: STARTING_CREDITS,
            away: STARTING_CREDITS,
        }
    }
}

impl Economy {
    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home: home.min(MAX_CREDITS),
            away: away.min(MAX_CREDITS),
        }
    }

    pub fn get(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    /// Add credits to a side, saturating at the cap.
    pub fn credit(&mut self, side: TeamSide, amount: u32) {
        let slot = match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        };
        *slot = slot.saturating_add(amount).min(MAX_CREDITS);
    }
}

/// A cosmetic kill within a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillEvent {
    pub killer: PlayerId,
    pub killer_side: TeamSide,
    pub victim: PlayerId,
    pub weapon: Weapon,
    pub headshot: bool,
    /// Round-clock unit at which the kill happened.
    pub time: u32,
}

/// Outcome of one round. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub winner: TeamSide,
    /// Side the home team played this round.
    pub home_side: Side,
    pub end_condition: EndCondition,
    pub duration: u32,
    pub kills: Vec<KillEvent>,
    /// Economy after the round's earnings were applied.
    pub economy: Economy,
}

/// A scheduled fixture, as supplied by the fixture provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFixture {
    pub id: u64,
    pub home_team: TeamId,
    pub away_team: TeamId,
    /// Unix timestamp (seconds).
    pub scheduled_at: u64,
}
