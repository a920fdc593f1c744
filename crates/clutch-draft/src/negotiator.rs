//! Draft/ban state machine.
//!
//! Six ban turns then ten pick turns. Within each phase the side to act
//! alternates by parity of the turn's index inside that phase (even = home).
//! Every rejected action leaves the state untouched.

use rand::Rng;
use tracing::debug;

use clutch_core::constants::*;
use clutch_core::enums::{DraftPhase, TeamSide};
use clutch_core::error::DraftError;
use clutch_core::state::DraftView;
use clutch_core::types::AgentId;

use crate::suggest::random_available;

/// One slot of the fixed turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftTurn {
    pub phase: DraftPhase,
    pub side: TeamSide,
}

/// A resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftAction {
    pub phase: DraftPhase,
    pub side: TeamSide,
    pub agent_id: AgentId,
    /// Resolved by the countdown or an AI side rather than a human.
    pub auto: bool,
}

/// The full turn order: bans first, then picks.
pub fn turn_order() -> Vec<DraftTurn> {
    let bans = (0..BAN_TURNS).map(|i| DraftTurn {
        phase: DraftPhase::Ban,
        side: TeamSide::for_parity(i),
    });
    let picks = (0..PICK_TURNS).map(|i| DraftTurn {
        phase: DraftPhase::Pick,
        side: TeamSide::for_parity(i),
    });
    bans.chain(picks).collect()
}

/// Draft progress for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    pool: Vec<AgentId>,
    phase: DraftPhase,
    turn_index: usize,
    banned: Vec<AgentId>,
    home_picks: Vec<AgentId>,
    away_picks: Vec<AgentId>,
    turn_remaining: u32,
}

impl DraftState {
    /// Open a draft over the given agent pool.
    ///
    /// Duplicate ids are ignored. Fails when the pool cannot cover every turn.
    pub fn new(pool: impl IntoIterator<Item = AgentId>) -> Result<Self, DraftError> {
        let mut unique: Vec<AgentId> = Vec::new();
        for id in pool {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.len() < BAN_TURNS + PICK_TURNS {
            return Err(DraftError::PoolExhausted);
        }
        Ok(Self {
            pool: unique,
            phase: DraftPhase::Ban,
            turn_index: 0,
            banned: Vec::with_capacity(BAN_TURNS),
            home_picks: Vec::with_capacity(AGENTS_PER_SIDE),
            away_picks: Vec::with_capacity(AGENTS_PER_SIDE),
            turn_remaining: DRAFT_TURN_UNITS,
        })
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == DraftPhase::Complete
    }

    /// Overall turn index, 0..16. Equals 16 once complete.
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn turn_remaining(&self) -> u32 {
        self.turn_remaining
    }

    pub fn banned(&self) -> &[AgentId] {
        &self.banned
    }

    pub fn picks(&self, side: TeamSide) -> &[AgentId] {
        match side {
            TeamSide::Home => &self.home_picks,
            TeamSide::Away => &self.away_picks,
        }
    }

    /// The turn waiting to be resolved.
    pub fn current_turn(&self) -> Option<DraftTurn> {
        match self.phase {
            DraftPhase::Ban => Some(DraftTurn {
                phase: DraftPhase::Ban,
                side: TeamSide::for_parity(self.turn_index),
            }),
            DraftPhase::Pick => Some(DraftTurn {
                phase: DraftPhase::Pick,
                side: TeamSide::for_parity(self.turn_index - BAN_TURNS),
            }),
            DraftPhase::Complete => None,
        }
    }

    pub fn acting_side(&self) -> Option<TeamSide> {
        self.current_turn().map(|t| t.side)
    }

    pub fn is_used(&self, id: AgentId) -> bool {
        self.banned.contains(&id) || self.home_picks.contains(&id) || self.away_picks.contains(&id)
    }

    /// Agents neither banned nor picked, in pool order.
    pub fn available(&self) -> Vec<AgentId> {
        self.pool
            .iter()
            .copied()
            .filter(|id| !self.is_used(*id))
            .collect()
    }

    /// Resolve the current turn with `selection` on behalf of the side to act.
    pub fn advance_turn(&mut self, selection: AgentId) -> Result<DraftAction, DraftError> {
        self.apply(selection, false)
    }

    /// Ban during the ban phase.
    pub fn ban(&mut self, selection: AgentId) -> Result<DraftAction, DraftError> {
        match self.phase {
            DraftPhase::Ban => self.apply(selection, false),
            DraftPhase::Complete => Err(DraftError::DraftComplete),
            other => Err(DraftError::WrongPhase(other)),
        }
    }

    /// Pick during the pick phase. `side` must be the side to act.
    pub fn pick(&mut self, side: TeamSide, selection: AgentId) -> Result<DraftAction, DraftError> {
        match self.current_turn() {
            None => Err(DraftError::DraftComplete),
            Some(turn) if turn.phase != DraftPhase::Pick => Err(DraftError::WrongPhase(turn.phase)),
            Some(turn) if turn.side != side => Err(DraftError::OutOfTurn {
                expected: turn.side,
                got: side,
            }),
            Some(_) => self.apply(selection, false),
        }
    }

    /// The turn countdown ran out: select uniformly at random from the pool.
    pub fn expire_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<DraftAction, DraftError> {
        if self.is_complete() {
            return Err(DraftError::DraftComplete);
        }
        let selection = random_available(self, rng).ok_or(DraftError::PoolExhausted)?;
        self.apply(selection, true)
    }

    /// Advance the turn countdown by one unit.
    ///
    /// Sides in `ai_sides` act after a short think delay; everyone else is
    /// auto-resolved when the countdown reaches zero.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        ai_sides: &[TeamSide],
        rng: &mut R,
    ) -> Option<DraftAction> {
        let side = self.acting_side()?;
        self.turn_remaining = self.turn_remaining.saturating_sub(1);

        let thought = DRAFT_TURN_UNITS - self.turn_remaining;
        let ai_ready = ai_sides.contains(&side) && thought >= AI_DRAFT_THINK_UNITS;

        if self.turn_remaining == 0 || ai_ready {
            // Pool size is checked at construction, so expiry cannot run dry.
            return self.expire_turn(rng).ok();
        }
        None
    }

    pub fn to_view(&self) -> DraftView {
        DraftView {
            phase: self.phase,
            turn_index: self.turn_index,
            acting: self.acting_side(),
            turn_remaining: self.turn_remaining,
            banned: self.banned.clone(),
            home_picks: self.home_picks.clone(),
            away_picks: self.away_picks.clone(),
            available: self.available(),
        }
    }

    fn apply(&mut self, selection: AgentId, auto: bool) -> Result<DraftAction, DraftError> {
        let turn = self.current_turn().ok_or(DraftError::DraftComplete)?;
        if !self.pool.contains(&selection) {
            return Err(DraftError::UnknownAgent(selection));
        }
        if self.is_used(selection) {
            return Err(DraftError::InvalidSelection(selection));
        }

        match turn.phase {
            DraftPhase::Ban => self.banned.push(selection),
            DraftPhase::Pick => match turn.side {
                TeamSide::Home => self.home_picks.push(selection),
                TeamSide::Away => self.away_picks.push(selection),
            },
            DraftPhase::Complete => unreachable!("current_turn is None when complete"),
        }

        self.turn_index += 1;
        self.turn_remaining = DRAFT_TURN_UNITS;
        if self.turn_index == BAN_TURNS {
            self.phase = DraftPhase::Pick;
        } else if self.turn_index == BAN_TURNS + PICK_TURNS {
            self.phase = DraftPhase::Complete;
        }

        debug_assert!(self.home_picks.len() <= AGENTS_PER_SIDE);
        debug_assert!(self.away_picks.len() <= AGENTS_PER_SIDE);
        debug_assert!(self.banned.len() <= BAN_TURNS);

        debug!(
            phase = ?turn.phase,
            side = ?turn.side,
            agent = selection,
            auto,
            "draft turn resolved"
        );

        Ok(DraftAction {
            phase: turn.phase,
            side: turn.side,
            agent_id: selection,
            auto,
        })
    }
}
