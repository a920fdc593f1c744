//! The match aggregate and its phase transitions.
//!
//! `MatchState` is a plain data record. Each method is one atomic transition;
//! anything needing randomness or collaborators lives in the engine.

use tracing::info;

use clutch_core::constants::*;
use clutch_core::enums::{MatchPhase, Side, TeamSide};
use clutch_core::state::TimeoutView;
use clutch_core::types::{AgentId, Economy, MapLayout, MatchFixture, RoundResult, Team};
use clutch_draft::DraftState;

/// Winner under the first-to-13, win-by-2 rule, if decided.
pub fn decided_winner(home_score: u32, away_score: u32) -> Option<TeamSide> {
    let leader = home_score.max(away_score);
    let margin = home_score.abs_diff(away_score);
    if leader >= ROUNDS_TO_WIN && margin >= WIN_MARGIN {
        Some(if home_score > away_score {
            TeamSide::Home
        } else {
            TeamSide::Away
        })
    } else {
        None
    }
}

/// Side the home team plays in a given round.
///
/// Home attacks the first half and defends the second. In overtime sides
/// swap every round, home attacking odd rounds.
pub fn home_side_for_round(round: u32) -> Side {
    let regulation = ROUNDS_PER_HALF * 2;
    if round <= ROUNDS_PER_HALF {
        Side::Attack
    } else if round <= regulation {
        Side::Defense
    } else if round % 2 == 1 {
        Side::Attack
    } else {
        Side::Defense
    }
}

/// Everything the engine knows about one match.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub fixture: MatchFixture,
    pub home: Team,
    pub away: Team,
    pub phase: MatchPhase,
    pub is_playing: bool,
    pub map: Option<MapLayout>,
    pub draft: Option<DraftState>,
    pub home_agents: Vec<AgentId>,
    pub away_agents: Vec<AgentId>,
    pub home_score: u32,
    pub away_score: u32,
    /// Round currently being played, starting at 1. After completion this is
    /// the last round played.
    pub round: u32,
    pub round_timer: u32,
    /// Countdown for the map reveal.
    pub reveal_timer: u32,
    pub timeout_timer: u32,
    pub timeout_caller: Option<TeamSide>,
    pub timeouts: TimeoutView,
    pub economy: Economy,
    pub history: Vec<RoundResult>,
}

impl MatchState {
    /// Fresh match shell for a fixture, sitting in map selection.
    pub fn new(fixture: MatchFixture, home: Team, away: Team) -> Self {
        Self {
            fixture,
            home,
            away,
            phase: MatchPhase::MapSelection,
            is_playing: true,
            map: None,
            draft: None,
            home_agents: Vec::new(),
            away_agents: Vec::new(),
            home_score: 0,
            away_score: 0,
            round: 1,
            round_timer: ROUND_TIMER_UNITS,
            reveal_timer: MAP_REVEAL_UNITS,
            timeout_timer: 0,
            timeout_caller: None,
            timeouts: TimeoutView {
                home: TIMEOUTS_PER_SIDE,
                away: TIMEOUTS_PER_SIDE,
            },
            economy: Economy::default(),
            history: Vec::new(),
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn agents(&self, side: TeamSide) -> &[AgentId] {
        match side {
            TeamSide::Home => &self.home_agents,
            TeamSide::Away => &self.away_agents,
        }
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn timeouts_remaining(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.timeouts.home,
            TeamSide::Away => self.timeouts.away,
        }
    }

    pub fn winner(&self) -> Option<TeamSide> {
        decided_winner(self.home_score, self.away_score)
    }

    /// Map selection: record the drawn map.
    pub fn select_map(&mut self, map: MapLayout) {
        info!(map = %map.name, "map selected");
        self.map = Some(map);
    }

    /// Map selection -> draft.
    pub fn begin_draft(&mut self, draft: DraftState) {
        if self.phase != MatchPhase::MapSelection {
            return;
        }
        self.draft = Some(draft);
        self.phase = MatchPhase::Draft;
        info!("draft started");
    }

    /// Draft -> map ban, folding the picks into the match.
    pub fn finish_draft(&mut self) -> bool {
        if self.phase != MatchPhase::Draft {
            return false;
        }
        let Some(draft) = self.draft.take() else {
            return false;
        };
        if !draft.is_complete() {
            self.draft = Some(draft);
            return false;
        }
        self.home_agents = draft.picks(TeamSide::Home).to_vec();
        self.away_agents = draft.picks(TeamSide::Away).to_vec();
        self.phase = MatchPhase::MapBan;
        info!(home = ?self.home_agents, away = ?self.away_agents, "draft complete");
        true
    }

    /// Map ban -> simulation with a fresh round clock.
    pub fn start_simulation(&mut self) -> bool {
        if self.phase != MatchPhase::MapBan {
            return false;
        }
        self.phase = MatchPhase::Simulation;
        self.round_timer = ROUND_TIMER_UNITS;
        info!(round = self.round, "simulation started");
        true
    }

    /// Commit a resolved round. Returns `true` when it ended the match.
    pub fn apply_round(&mut self, result: RoundResult) -> bool {
        debug_assert_eq!(result.round, self.round, "rounds resolve in order");

        match result.winner {
            TeamSide::Home => self.home_score += 1,
            TeamSide::Away => self.away_score += 1,
        }
        self.economy = result.economy;
        self.history.push(result);

        if let Some(winner) = self.winner() {
            self.phase = MatchPhase::Completed;
            info!(
                ?winner,
                home = self.home_score,
                away = self.away_score,
                rounds = self.round,
                "match completed"
            );
            return true;
        }

        self.round += 1;
        self.round_timer = ROUND_TIMER_UNITS;
        false
    }

    /// Simulation -> timeout. A side with no timeouts left is a no-op.
    pub fn call_timeout(&mut self, side: TeamSide) -> bool {
        if self.phase != MatchPhase::Simulation {
            return false;
        }
        let budget = match side {
            TeamSide::Home => &mut self.timeouts.home,
            TeamSide::Away => &mut self.timeouts.away,
        };
        if *budget == 0 {
            return false;
        }
        *budget -= 1;
        let remaining = *budget;
        self.phase = MatchPhase::Timeout;
        self.timeout_timer = TIMEOUT_UNITS;
        self.timeout_caller = Some(side);
        info!(?side, remaining, "timeout called");
        true
    }

    /// Timeout -> simulation. The round clock resumes where it stopped.
    pub fn end_timeout(&mut self) -> bool {
        if self.phase != MatchPhase::Timeout {
            return false;
        }
        self.phase = MatchPhase::Simulation;
        self.timeout_timer = 0;
        self.timeout_caller = None;
        true
    }

    /// Abandon the match: terminal, with every in-progress record discarded.
    pub fn exit(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        let mut shell = MatchState::new(
            self.fixture.clone(),
            self.home.clone(),
            self.away.clone(),
        );
        shell.phase = MatchPhase::Exited;
        shell.is_playing = false;
        shell.round = 0;
        *self = shell;
        info!("match exited");
        true
    }
}

