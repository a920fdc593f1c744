//! Match engine: the driver around `MatchState`.
//!
//! `MatchEngine` owns the match aggregate, the seeded random source and the
//! reference data. Commands are queued and applied at the next tick boundary;
//! `tick` then advances the clock unit by unit. The engine holds no timers of
//! its own, so the host decides how fast a unit passes. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use clutch_core::catalog::{AgentCatalog, MapPool};
use clutch_core::commands::PlayerCommand;
use clutch_core::constants::*;
use clutch_core::enums::{DraftPhase, MatchPhase, TeamSide};
use clutch_core::events::MatchEvent;
use clutch_core::providers::{AdvisoryContext, AdvisoryService, PersistenceSink};
use clutch_core::results::MatchResult;
use clutch_core::state::MatchSnapshot;
use clutch_core::types::{AgentId, MapLayout, MatchFixture, Team, TeamComposition};
use clutch_draft::suggest::suggestion;
use clutch_draft::{DraftAction, DraftState};

use crate::advisory::advice_or_fallback;
use crate::flavor::round_flavor;
use crate::match_state::{home_side_for_round, MatchState};
use crate::round::resolve_round;
use crate::snapshot::build_snapshot;
use crate::strength::StrengthInputs;
use crate::summary::summarize;

/// Configuration for starting a new match.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    /// Sides whose draft turns are played automatically.
    pub ai_sides: Vec<TeamSide>,
    /// Whether the clock runs from the start.
    pub start_playing: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ai_sides: vec![TeamSide::Away],
            start_playing: true,
        }
    }
}

/// The fixture and reference data a match is played with.
#[derive(Debug, Clone)]
pub struct MatchSetup {
    pub fixture: MatchFixture,
    pub home: Team,
    pub away: Team,
    pub catalog: AgentCatalog,
    pub maps: MapPool,
}

/// The match engine. Owns the match aggregate and all transient state.
pub struct MatchEngine {
    state: MatchState,
    catalog: AgentCatalog,
    maps: MapPool,
    ai_sides: Vec<TeamSide>,
    rng: ChaCha8Rng,
    elapsed: u64,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<MatchEvent>,
    suggestion: Option<AgentId>,
    advisor: Option<Box<dyn AdvisoryService>>,
    sink: Option<Box<dyn PersistenceSink>>,
    result: Option<MatchResult>,
}

impl MatchEngine {
    /// Create an engine and enter map selection.
    pub fn new(config: SimConfig, setup: MatchSetup) -> Self {
        let mut state = MatchState::new(setup.fixture, setup.home, setup.away);
        state.is_playing = config.start_playing;

        let mut engine = Self {
            state,
            catalog: setup.catalog,
            maps: setup.maps,
            ai_sides: config.ai_sides,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            elapsed: 0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            suggestion: None,
            advisor: None,
            sink: None,
            result: None,
        };
        engine.enter_map_selection();
        engine
    }

    /// Attach the advisory text service consulted during timeouts.
    pub fn with_advisor(mut self, advisor: Box<dyn AdvisoryService>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Attach the sink that receives the final result.
    pub fn with_sink(mut self, sink: Box<dyn PersistenceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance the clock by `elapsed` units and return
    /// the resulting snapshot.
    pub fn tick(&mut self, elapsed: u32) -> MatchSnapshot {
        self.process_commands();

        for _ in 0..elapsed {
            if !self.state.is_playing || self.state.phase.is_terminal() {
                break;
            }
            self.step();
            self.elapsed += 1;
        }

        let events = std::mem::take(&mut self.events);
        build_snapshot(&self.state, self.elapsed, self.suggestion, events)
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Total units the clock has advanced.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn catalog(&self) -> &AgentCatalog {
        &self.catalog
    }

    /// The final result, once the match has completed.
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Mutable access to the aggregate for tests that stage a position.
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single user command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SelectAgent { side, agent_id } => {
                if self.state.phase != MatchPhase::Draft {
                    debug!(?side, agent_id, phase = ?self.state.phase, "pick outside draft ignored");
                    return;
                }
                let outcome = match self.state.draft.as_mut() {
                    Some(draft) => draft.pick(side, agent_id),
                    None => return,
                };
                match outcome {
                    Ok(action) => self.after_draft_action(action),
                    Err(err) => debug!(%err, "pick rejected"),
                }
            }
            PlayerCommand::BanAgent { agent_id } => {
                if self.state.phase != MatchPhase::Draft {
                    debug!(agent_id, phase = ?self.state.phase, "ban outside draft ignored");
                    return;
                }
                let outcome = match self.state.draft.as_mut() {
                    Some(draft) => draft.ban(agent_id),
                    None => return,
                };
                match outcome {
                    Ok(action) => self.after_draft_action(action),
                    Err(err) => debug!(%err, "ban rejected"),
                }
            }
            PlayerCommand::CallTimeout { side } => {
                if self.state.call_timeout(side) {
                    self.events.push(MatchEvent::TimeoutCalled {
                        side,
                        remaining: self.state.timeouts_remaining(side),
                    });
                    self.request_advice(side);
                } else {
                    debug!(?side, phase = ?self.state.phase, "timeout call ignored");
                }
            }
            PlayerCommand::ResumeFromTimeout => {
                if self.state.end_timeout() {
                    self.events.push(MatchEvent::TimeoutEnded);
                }
            }
            PlayerCommand::SetPlaying { playing } => {
                if self.state.phase.is_terminal() || self.state.is_playing == playing {
                    return;
                }
                self.state.is_playing = playing;
                self.events.push(MatchEvent::PlayingChanged { playing });
            }
            PlayerCommand::ExitMatch => {
                if self.state.exit() {
                    self.suggestion = None;
                    self.events.push(MatchEvent::MatchExited);
                }
            }
        }
    }

    /// Advance the clock by one unit in the current phase.
    fn step(&mut self) {
        match self.state.phase {
            MatchPhase::MapSelection => {
                self.state.reveal_timer = self.state.reveal_timer.saturating_sub(1);
                if self.state.reveal_timer == 0 {
                    self.open_draft();
                }
            }
            MatchPhase::Draft => {
                let action = match self.state.draft.as_mut() {
                    Some(draft) => draft.tick(&self.ai_sides, &mut self.rng),
                    None => None,
                };
                if let Some(action) = action {
                    self.after_draft_action(action);
                }
            }
            MatchPhase::MapBan => {
                if self.state.start_simulation() {
                    self.events.push(MatchEvent::SimulationStarted);
                }
            }
            // Reserved; nothing drives the match into it yet.
            MatchPhase::Strategy => {}
            MatchPhase::Simulation => self.run_round_clock(),
            MatchPhase::Timeout => {
                self.state.timeout_timer = self.state.timeout_timer.saturating_sub(1);
                if self.state.timeout_timer == 0 && self.state.end_timeout() {
                    self.events.push(MatchEvent::TimeoutEnded);
                }
            }
            MatchPhase::Completed | MatchPhase::Exited => {}
        }
    }

    fn enter_map_selection(&mut self) {
        let map = self
            .maps
            .enabled()
            .choose(&mut self.rng)
            .map(|m| (*m).clone());
        let map = match map {
            Some(map) => map,
            None => {
                warn!("map pool has no enabled maps, using the builtin pool");
                self.maps = MapPool::builtin();
                self.maps
                    .enabled()
                    .choose(&mut self.rng)
                    .map(|m| (*m).clone())
                    .unwrap_or_else(MapLayout::default)
            }
        };
        self.events.push(MatchEvent::MapSelected {
            map_id: map.id,
            name: map.name.clone(),
        });
        self.state.select_map(map);
    }

    fn open_draft(&mut self) {
        let draft = match DraftState::new(self.catalog.ids()) {
            Ok(draft) => draft,
            Err(err) => {
                warn!(%err, "agent pool too small for a draft, using the builtin catalog");
                self.catalog = AgentCatalog::builtin();
                match DraftState::new(self.catalog.ids()) {
                    Ok(draft) => draft,
                    Err(err) => {
                        warn!(%err, "builtin catalog rejected, draft cannot open");
                        return;
                    }
                }
            }
        };
        self.suggestion = suggestion(&draft, &mut self.rng);
        self.state.begin_draft(draft);
        self.events.push(MatchEvent::DraftStarted);
    }

    fn after_draft_action(&mut self, action: DraftAction) {
        self.events.push(match action.phase {
            DraftPhase::Ban => MatchEvent::AgentBanned {
                side: action.side,
                agent_id: action.agent_id,
                auto: action.auto,
            },
            _ => MatchEvent::AgentPicked {
                side: action.side,
                agent_id: action.agent_id,
                auto: action.auto,
            },
        });

        self.suggestion = self
            .state
            .draft
            .as_ref()
            .and_then(|draft| suggestion(draft, &mut self.rng));

        let complete = self.state.draft.as_ref().is_some_and(DraftState::is_complete);
        if complete && self.state.finish_draft() {
            self.suggestion = None;
            self.events.push(MatchEvent::DraftCompleted);
        }
    }

    fn run_round_clock(&mut self) {
        self.state.round_timer = self.state.round_timer.saturating_sub(1);
        let into_round = ROUND_TIMER_UNITS - self.state.round_timer;

        if self.state.round_timer > 0 && into_round % FLAVOR_INTERVAL_UNITS == 0 {
            let text = round_flavor(
                &self.state.home.roster,
                &self.state.away.roster,
                self.state.map.as_ref(),
                &mut self.rng,
            );
            self.events.push(MatchEvent::RoundFlavor {
                round: self.state.round,
                text,
            });
        }

        if self.state.round_timer == 0 {
            self.resolve_current_round();
        }
    }

    fn resolve_current_round(&mut self) {
        let map = self.state.map.clone().unwrap_or_default();
        let home_comp = self.composition(TeamSide::Home);
        let away_comp = self.composition(TeamSide::Away);
        let home = StrengthInputs {
            roster: &self.state.home.roster,
            composition: home_comp,
            map: &map,
        };
        let away = StrengthInputs {
            roster: &self.state.away.roster,
            composition: away_comp,
            map: &map,
        };

        let round = self.state.round;
        let result = resolve_round(
            round,
            &home,
            &away,
            home_side_for_round(round),
            self.state.economy,
            &mut self.rng,
        );
        let winner = result.winner;
        let end_condition = result.end_condition;

        let finished = self.state.apply_round(result);
        self.events.push(MatchEvent::RoundResolved {
            round,
            winner,
            end_condition,
            home_score: self.state.home_score,
            away_score: self.state.away_score,
        });

        if finished {
            self.finish_match();
        }
    }

    fn finish_match(&mut self) {
        let result = summarize(&self.state);
        self.events.push(MatchEvent::MatchCompleted {
            winner: result.winner,
            home_score: result.home_score,
            away_score: result.away_score,
        });

        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.save_match_result(&result) {
                warn!(%err, fixture = result.fixture_id, "failed to persist match result");
            }
        }
        info!(
            mvp = result.mvp.as_ref().map(|m| m.name.as_str()),
            duration = result.duration,
            "match summarized"
        );
        self.result = Some(result);
    }

    fn request_advice(&mut self, side: TeamSide) {
        let context = AdvisoryContext {
            side,
            phase: self.state.phase,
            round: self.state.round,
            home_score: self.state.home_score,
            away_score: self.state.away_score,
            focus_role: self.composition(side).dominant_role(),
        };
        let text = advice_or_fallback(self.advisor.as_deref(), &context);
        self.events.push(MatchEvent::TacticalAdvice { side, text });
    }

    /// Role counts of a side's drafted agents.
    fn composition(&self, side: TeamSide) -> TeamComposition {
        TeamComposition::from_agents(
            self.state
                .agents(side)
                .iter()
                .filter_map(|id| self.catalog.get_agent(*id).ok()),
        )
    }
}
