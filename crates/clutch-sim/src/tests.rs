//! Tests for the strength model, round resolution, the match state machine
//! and the post-match summary.

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use clutch_core::catalog::{AgentCatalog, MapPool};
use clutch_core::commands::PlayerCommand;
use clutch_core::constants::*;
use clutch_core::enums::*;
use clutch_core::error::{AdvisoryError, ProviderError};
use clutch_core::events::MatchEvent;
use clutch_core::providers::{AdvisoryContext, AdvisoryService, PersistenceSink};
use clutch_core::results::MatchResult;
use clutch_core::types::*;

use crate::advisory::{advice_or_fallback, fallback_advice};
use crate::engine::{MatchEngine, MatchSetup, SimConfig};
use crate::match_state::{decided_winner, home_side_for_round, MatchState};
use crate::round::{apply_round_economy, generate_kills, pick_end_condition, resolve_round, win_probability};
use crate::strength::*;
use crate::summary::{mvp_score, summarize};

// ---- Fixtures ----

const ROLES: [PlayerRole; 5] = [
    PlayerRole::Duelist,
    PlayerRole::Initiator,
    PlayerRole::Controller,
    PlayerRole::Sentinel,
    PlayerRole::Flex,
];

fn member(id: PlayerId, role: PlayerRole, skill: f64) -> RosterMember {
    RosterMember {
        id,
        name: format!("Player{id}"),
        role,
        aim: skill,
        game_iq: skill,
        clutch: skill,
        teamwork: skill,
        positioning: skill,
        morale: skill,
    }
}

fn roster(first_id: PlayerId, skill: f64) -> Vec<RosterMember> {
    ROLES
        .iter()
        .enumerate()
        .map(|(i, role)| member(first_id + i as PlayerId, *role, skill))
        .collect()
}

fn team(id: TeamId, first_player: PlayerId, skill: f64) -> Team {
    Team {
        id,
        name: format!("Team{id}"),
        roster: roster(first_player, skill),
    }
}

fn two_site_map() -> MapLayout {
    MapLayout {
        id: 1,
        name: "Harbor".to_string(),
        bomb_sites: 2,
        choke_points: 4,
        enabled: true,
    }
}

fn setup() -> MatchSetup {
    MatchSetup {
        fixture: MatchFixture {
            id: 77,
            home_team: 1,
            away_team: 2,
            scheduled_at: 1_700_000_000,
        },
        home: team(1, 1, 78.0),
        away: team(2, 11, 72.0),
        catalog: AgentCatalog::builtin(),
        maps: MapPool::builtin(),
    }
}

fn auto_config(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        ai_sides: vec![TeamSide::Home, TeamSide::Away],
        start_playing: true,
    }
}

/// Tick one unit at a time until the round clock is running.
fn advance_to_simulation(engine: &mut MatchEngine) {
    for _ in 0..1_000 {
        if engine.phase() == MatchPhase::Simulation {
            return;
        }
        engine.tick(1);
    }
    panic!("never reached simulation, stuck in {:?}", engine.phase());
}

fn run_to_end(engine: &mut MatchEngine) {
    for _ in 0..200_000 {
        if engine.phase().is_terminal() {
            return;
        }
        engine.tick(10);
    }
    panic!("match never finished");
}

struct RecordingSink(Arc<Mutex<Vec<MatchResult>>>);

impl PersistenceSink for RecordingSink {
    fn save_match_result(&mut self, result: &MatchResult) -> Result<(), ProviderError> {
        self.0.lock().unwrap().push(result.clone());
        Ok(())
    }
}

struct FailingSink;

impl PersistenceSink for FailingSink {
    fn save_match_result(&mut self, _result: &MatchResult) -> Result<(), ProviderError> {
        Err(ProviderError::NoFixture)
    }
}

struct BrokenAdvisor;

impl AdvisoryService for BrokenAdvisor {
    fn tactical_advice(&self, _context: &AdvisoryContext) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::Timeout)
    }
}

struct EchoAdvisor;

impl AdvisoryService for EchoAdvisor {
    fn tactical_advice(&self, context: &AdvisoryContext) -> Result<String, AdvisoryError> {
        Ok(format!("round {} plan", context.round))
    }
}

// ---- Strength model ----

#[test]
fn test_strength_empty_roster_is_neutral() {
    let comp = TeamComposition::new(1, 1, 1, 1, 1);
    let strength = compute_strength(&[], &comp, &two_site_map(), Side::Attack);
    assert_eq!(strength, 50.0);
}

#[test]
fn test_strength_empty_composition_is_neutral() {
    let strength = compute_strength(
        &roster(1, 90.0),
        &TeamComposition::default(),
        &two_site_map(),
        Side::Defense,
    );
    assert_eq!(strength, 50.0);
}

#[test]
fn test_strength_components() {
    // All attributes 75: avg skill 75, no teamwork or morale adjustment.
    // Ideal two-site comp with full coverage: synergy = 50 + 20 + 10 = 80.
    let comp = TeamComposition::new(1, 1, 1, 1, 1);
    let map = two_site_map();
    let team = roster(1, 75.0);
    assert!((compute_synergy(&comp, &team, &map) - 80.0).abs() < 1e-10);

    let attack = compute_strength(&team, &comp, &map, Side::Attack);
    // 75 + 80*0.3 + (5 + 3) + 0
    assert!((attack - 107.0).abs() < 1e-10, "got {attack}");
}

#[test]
fn test_side_bonus_by_side() {
    let comp = TeamComposition::new(2, 1, 0, 2, 0);
    assert_eq!(side_bonus(&comp, Side::Attack), 13.0);
    assert_eq!(side_bonus(&comp, Side::Defense), 10.0);
}

#[test]
fn test_morale_bonus_applies() {
    let comp = TeamComposition::new(1, 1, 1, 1, 1);
    let map = two_site_map();
    let mut team = roster(1, 75.0);
    let base = compute_strength(&team, &comp, &map, Side::Attack);
    for m in &mut team {
        m.morale = 95.0;
    }
    let boosted = compute_strength(&team, &comp, &map, Side::Attack);
    assert!((boosted - base - 4.0).abs() < 1e-10);
}

#[test]
fn test_ideal_composition_by_map_shape() {
    let mut map = two_site_map();
    assert_eq!(ideal_composition(&map), TeamComposition::new(1, 1, 1, 1, 1));
    map.choke_points = 6;
    assert_eq!(ideal_composition(&map), TeamComposition::new(1, 2, 1, 1, 0));
    map.bomb_sites = 3;
    assert_eq!(ideal_composition(&map), TeamComposition::new(1, 1, 2, 1, 0));
}

#[test]
fn test_synergy_bounds_for_random_inputs() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..2_000 {
        let comp = TeamComposition::new(
            rng.gen_range(0..6),
            rng.gen_range(0..6),
            rng.gen_range(0..6),
            rng.gen_range(0..6),
            rng.gen_range(0..6),
        );
        let size = rng.gen_range(0..7);
        let team: Vec<RosterMember> = (0..size)
            .map(|i| {
                let mut m = member(i, PlayerRole::Flex, rng.gen_range(0.0..=100.0));
                m.teamwork = if rng.gen_bool(0.5) { 0.0 } else { 100.0 };
                m
            })
            .collect();
        let map = MapLayout {
            bomb_sites: rng.gen_range(1..4),
            choke_points: rng.gen_range(0..10),
            ..two_site_map()
        };
        let synergy = compute_synergy(&comp, &team, &map);
        assert!((0.0..=100.0).contains(&synergy), "synergy {synergy} out of range");
    }
}

#[test]
fn test_economy_factor_thresholds() {
    assert_eq!(economy_factor(2000), 0.8);
    assert_eq!(economy_factor(2999), 0.8);
    assert_eq!(economy_factor(3000), 1.0);
    assert_eq!(economy_factor(4000), 1.0);
    assert_eq!(economy_factor(5000), 1.2);
    assert_eq!(economy_factor(7000), 1.2);
}

// ---- Round resolution ----

#[test]
fn test_symmetric_teams_are_a_coin_flip() {
    let map = two_site_map();
    let home_roster = roster(1, 75.0);
    let away_roster = roster(11, 75.0);
    let comp = TeamComposition::new(1, 1, 1, 1, 1);

    let home_strength = compute_strength(&home_roster, &comp, &map, Side::Attack) * economy_factor(5000);
    let away_strength = compute_strength(&away_roster, &comp, &map, Side::Defense) * economy_factor(5000);
    let p = win_probability(home_strength, away_strength);
    assert!((p - 0.5).abs() < 1e-12, "expected 0.5, got {p}");

    let home = StrengthInputs {
        roster: &home_roster,
        composition: comp,
        map: &map,
    };
    let away = StrengthInputs {
        roster: &away_roster,
        composition: comp,
        map: &map,
    };
    let p = crate::round::home_win_probability(&home, &away, Side::Attack, &Economy::new(5000, 5000));
    assert!((p - 0.5).abs() < 1e-12);
}

#[test]
fn test_win_probability_degenerate_inputs() {
    assert_eq!(win_probability(0.0, 0.0), 0.5);
    assert_eq!(win_probability(-5.0, 10.0), 0.0);
    assert!((win_probability(30.0, 10.0) - 0.75).abs() < 1e-12);
}

#[test]
fn test_loss_bonus_from_empty_bank() {
    let eco = apply_round_economy(Economy::new(0, 4000), TeamSide::Away, EndCondition::Elimination);
    assert_eq!(eco.home, 1900);
    assert_eq!(eco.away, 7000);
}

#[test]
fn test_explode_adds_plant_bonus() {
    let eco = apply_round_economy(Economy::new(1000, 1000), TeamSide::Home, EndCondition::Explode);
    assert_eq!(eco.home, 1000 + 3800);
    assert_eq!(eco.away, 1000 + 1900);

    let capped = apply_round_economy(Economy::new(8000, 8000), TeamSide::Home, EndCondition::Explode);
    assert_eq!(capped.home, MAX_CREDITS);
    assert_eq!(capped.away, MAX_CREDITS);
}

#[test]
fn test_end_condition_matches_winner_side() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let mut saw_defuse = false;
    let mut saw_time = false;
    let mut saw_explode = false;
    for _ in 0..2_000 {
        match pick_end_condition(Side::Attack, &mut rng) {
            EndCondition::Explode => saw_explode = true,
            EndCondition::Elimination => {}
            other => panic!("attack win ended in {other:?}"),
        }
        match pick_end_condition(Side::Defense, &mut rng) {
            EndCondition::Defuse => saw_defuse = true,
            EndCondition::Time => saw_time = true,
            EndCondition::Elimination => {}
            EndCondition::Explode => panic!("defense win cannot explode"),
        }
    }
    assert!(saw_defuse && saw_time && saw_explode);
}

#[test]
fn test_kill_events_are_plausible() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let winners = roster(1, 70.0);
    let losers = roster(11, 70.0);
    for _ in 0..500 {
        let kills = generate_kills(TeamSide::Home, &winners, &losers, 90, &mut rng);
        assert!(kills.len() >= 2 && kills.len() <= 4);

        let mut victims: Vec<PlayerId> = kills.iter().map(|k| k.victim).collect();
        victims.sort_unstable();
        victims.dedup();
        assert_eq!(victims.len(), kills.len(), "a player died twice");

        for kill in &kills {
            let (own, other) = match kill.killer_side {
                TeamSide::Home => (&winners, &losers),
                TeamSide::Away => (&losers, &winners),
            };
            assert!(own.iter().any(|m| m.id == kill.killer));
            assert!(other.iter().any(|m| m.id == kill.victim));
            assert!(kill.time >= 1 && kill.time <= 90);
        }
        assert!(kills.windows(2).all(|w| w[0].time <= w[1].time));
    }
}

#[test]
fn test_kills_with_empty_rosters() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let kills = generate_kills(TeamSide::Away, &[], &[], 60, &mut rng);
    assert!(kills.is_empty());
}

#[test]
fn test_economy_stays_capped_over_many_rounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let map = two_site_map();
    let home_roster = roster(1, 80.0);
    let away_roster = roster(11, 60.0);
    let home = StrengthInputs {
        roster: &home_roster,
        composition: TeamComposition::new(2, 1, 1, 1, 0),
        map: &map,
    };
    let away = StrengthInputs {
        roster: &away_roster,
        composition: TeamComposition::new(0, 1, 2, 2, 0),
        map: &map,
    };

    let mut economy = Economy::default();
    for round in 1..=300 {
        let result = resolve_round(round, &home, &away, home_side_for_round(round), economy, &mut rng);
        assert_eq!(result.round, round);
        assert!(result.economy.home <= MAX_CREDITS);
        assert!(result.economy.away <= MAX_CREDITS);
        if result.end_condition == EndCondition::Time {
            assert_eq!(result.duration, ROUND_TIMER_UNITS);
        } else {
            assert!((MIN_ROUND_DURATION..=MAX_ROUND_DURATION).contains(&result.duration));
        }
        economy = result.economy;
    }
}

#[test]
fn test_stronger_team_wins_more_often() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let map = two_site_map();
    let strong = roster(1, 95.0);
    let weak = roster(11, 40.0);
    let comp = TeamComposition::new(1, 1, 1, 1, 1);
    let home = StrengthInputs {
        roster: &strong,
        composition: comp,
        map: &map,
    };
    let away = StrengthInputs {
        roster: &weak,
        composition: comp,
        map: &map,
    };
    let wins = (0..1_000)
        .filter(|_| {
            resolve_round(1, &home, &away, Side::Attack, Economy::new(4000, 4000), &mut rng).winner
                == TeamSide::Home
        })
        .count();
    assert!(wins > 550, "strong side won only {wins}/1000");
}

// ---- Match rules ----

#[test]
fn test_decided_winner_margin_rule() {
    assert_eq!(decided_winner(13, 11), Some(TeamSide::Home));
    assert_eq!(decided_winner(13, 12), None);
    assert_eq!(decided_winner(12, 12), None);
    assert_eq!(decided_winner(14, 12), Some(TeamSide::Home));
    assert_eq!(decided_winner(9, 13), Some(TeamSide::Away));
    assert_eq!(decided_winner(12, 10), None);
}

#[test]
fn test_home_side_schedule() {
    assert_eq!(home_side_for_round(1), Side::Attack);
    assert_eq!(home_side_for_round(12), Side::Attack);
    assert_eq!(home_side_for_round(13), Side::Defense);
    assert_eq!(home_side_for_round(24), Side::Defense);
    assert_eq!(home_side_for_round(25), Side::Attack);
    assert_eq!(home_side_for_round(26), Side::Defense);
}

fn staged_round(round: u32, winner: TeamSide) -> RoundResult {
    RoundResult {
        round,
        winner,
        home_side: home_side_for_round(round),
        end_condition: EndCondition::Elimination,
        duration: 60,
        kills: Vec::new(),
        economy: Economy::new(5000, 5000),
    }
}

#[test]
fn test_overtime_needs_two_round_lead() {
    let s = setup();
    let mut state = MatchState::new(s.fixture, s.home, s.away);
    state.phase = MatchPhase::Simulation;

    // Alternate wins up to 12-12.
    for i in 0..24 {
        let winner = if i % 2 == 0 { TeamSide::Home } else { TeamSide::Away };
        let round = state.round;
        assert!(!state.apply_round(staged_round(round, winner)));
    }
    assert_eq!((state.home_score, state.away_score), (12, 12));
    assert_eq!(state.phase, MatchPhase::Simulation);

    let round = state.round;
    assert!(!state.apply_round(staged_round(round, TeamSide::Home)), "13-12 is not decided");
    assert_eq!(state.phase, MatchPhase::Simulation);

    let round = state.round;
    assert!(state.apply_round(staged_round(round, TeamSide::Home)));
    assert_eq!((state.home_score, state.away_score), (14, 12));
    assert_eq!(state.phase, MatchPhase::Completed);
    assert_eq!(state.winner(), Some(TeamSide::Home));
    assert_eq!(state.round, 26);
    assert_eq!(state.history.len(), 26);
}

// ---- Engine ----

#[test]
fn test_engine_starts_in_map_selection_with_enabled_map() {
    let mut engine = MatchEngine::new(auto_config(1), setup());
    assert_eq!(engine.phase(), MatchPhase::MapSelection);
    let snapshot = engine.tick(0);
    let map = snapshot.map.expect("map drawn on entry");
    assert!(map.enabled);
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, MatchEvent::MapSelected { .. })));
}

#[test]
fn test_map_reveal_then_draft() {
    let mut engine = MatchEngine::new(auto_config(1), setup());
    engine.tick(MAP_REVEAL_UNITS - 1);
    assert_eq!(engine.phase(), MatchPhase::MapSelection);
    let snapshot = engine.tick(1);
    assert_eq!(engine.phase(), MatchPhase::Draft);
    assert!(snapshot.draft.is_some());
    assert!(snapshot.suggestion.is_some());
}

#[test]
fn test_full_matches_respect_win_condition() {
    for seed in 0..25 {
        let mut engine = MatchEngine::new(auto_config(seed), setup());
        run_to_end(&mut engine);

        let state = engine.state();
        assert_eq!(state.phase, MatchPhase::Completed, "seed {seed}");
        let high = state.home_score.max(state.away_score);
        let margin = state.home_score.abs_diff(state.away_score);
        assert!(high >= ROUNDS_TO_WIN, "seed {seed}: {high}");
        assert!(margin >= WIN_MARGIN, "seed {seed}: margin {margin}");

        assert_eq!(state.history.len() as u32, state.round);
        for (i, round) in state.history.iter().enumerate() {
            assert_eq!(round.round, i as u32 + 1, "rounds increase by one");
            assert!(round.economy.home <= MAX_CREDITS && round.economy.away <= MAX_CREDITS);
        }
        assert_eq!(state.home_agents.len(), AGENTS_PER_SIDE);
        assert_eq!(state.away_agents.len(), AGENTS_PER_SIDE);

        let result = engine.result().expect("result built on completion");
        assert_eq!(result.rounds_played, state.round);
        assert!(result.mvp.is_some());
    }
}

#[test]
fn test_determinism_same_seed() {
    let mut a = MatchEngine::new(auto_config(12345), setup());
    let mut b = MatchEngine::new(auto_config(12345), setup());
    for _ in 0..600 {
        let snap_a = serde_json::to_string(&a.tick(7)).unwrap();
        let snap_b = serde_json::to_string(&b.tick(7)).unwrap();
        assert_eq!(snap_a, snap_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut a = MatchEngine::new(auto_config(111), setup());
    let mut b = MatchEngine::new(auto_config(222), setup());
    run_to_end(&mut a);
    run_to_end(&mut b);
    assert_ne!(
        serde_json::to_string(&a.state().history).unwrap(),
        serde_json::to_string(&b.state().history).unwrap()
    );
}

#[test]
fn test_round_flavor_every_thirty_units() {
    let mut engine = MatchEngine::new(auto_config(3), setup());
    advance_to_simulation(&mut engine);
    let snapshot = engine.tick(ROUND_TIMER_UNITS - 1);
    let flavors = snapshot
        .events
        .iter()
        .filter(|e| matches!(e, MatchEvent::RoundFlavor { round: 1, .. }))
        .count();
    assert_eq!(flavors, 3);
    assert_eq!(snapshot.round_timer, 1);
    assert!(engine.state().history.is_empty());

    let snapshot = engine.tick(1);
    assert_eq!(engine.state().history.len(), 1);
    assert_eq!(snapshot.round, 2);
    assert_eq!(snapshot.round_timer, ROUND_TIMER_UNITS);
}

#[test]
fn test_pause_keeps_round_timer() {
    let mut engine = MatchEngine::new(auto_config(4), setup());
    advance_to_simulation(&mut engine);
    engine.tick(40);
    let before = engine.state().round_timer;

    engine.queue_command(PlayerCommand::SetPlaying { playing: false });
    let snapshot = engine.tick(50);
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.round_timer, before, "paused clock must not move");

    engine.queue_command(PlayerCommand::SetPlaying { playing: true });
    let snapshot = engine.tick(1);
    assert_eq!(snapshot.round_timer, before - 1, "resume continues, not resets");
}

#[test]
fn test_timeout_freezes_round_and_expires() {
    let mut engine = MatchEngine::new(auto_config(5), setup());
    advance_to_simulation(&mut engine);
    engine.tick(10);
    let frozen = engine.state().round_timer;

    engine.queue_command(PlayerCommand::CallTimeout {
        side: TeamSide::Home,
    });
    let snapshot = engine.tick(TIMEOUT_UNITS - 1);
    assert_eq!(snapshot.phase, MatchPhase::Timeout);
    assert_eq!(snapshot.round_timer, frozen);
    assert_eq!(snapshot.timeout_timer, 1);
    assert_eq!(snapshot.timeouts.home, 1);
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, MatchEvent::TacticalAdvice { side: TeamSide::Home, .. })));

    let snapshot = engine.tick(1);
    assert_eq!(snapshot.phase, MatchPhase::Simulation);
    assert_eq!(snapshot.round_timer, frozen);
}

#[test]
fn test_resume_from_timeout_early() {
    let mut engine = MatchEngine::new(auto_config(6), setup());
    advance_to_simulation(&mut engine);
    engine.tick(25);
    let frozen = engine.state().round_timer;

    engine.queue_command(PlayerCommand::CallTimeout {
        side: TeamSide::Away,
    });
    engine.tick(5);
    engine.queue_command(PlayerCommand::ResumeFromTimeout);
    let snapshot = engine.tick(0);
    assert_eq!(snapshot.phase, MatchPhase::Simulation);
    assert_eq!(snapshot.round_timer, frozen);
    assert!(snapshot.events.contains(&MatchEvent::TimeoutEnded));
}

#[test]
fn test_timeout_budget_exhausted_is_noop() {
    let mut engine = MatchEngine::new(auto_config(7), setup());
    advance_to_simulation(&mut engine);

    for _ in 0..TIMEOUTS_PER_SIDE {
        engine.queue_command(PlayerCommand::CallTimeout {
            side: TeamSide::Home,
        });
        engine.queue_command(PlayerCommand::ResumeFromTimeout);
        engine.tick(0);
    }
    assert_eq!(engine.state().timeouts_remaining(TeamSide::Home), 0);

    engine.queue_command(PlayerCommand::CallTimeout {
        side: TeamSide::Home,
    });
    let snapshot = engine.tick(0);
    assert_eq!(snapshot.phase, MatchPhase::Simulation);
    assert_eq!(snapshot.timeouts.home, 0);
    assert_eq!(snapshot.timeouts.away, TIMEOUTS_PER_SIDE);
    assert!(snapshot.events.is_empty());
}

#[test]
fn test_timeout_outside_simulation_ignored() {
    let mut engine = MatchEngine::new(auto_config(8), setup());
    engine.queue_command(PlayerCommand::CallTimeout {
        side: TeamSide::Home,
    });
    let snapshot = engine.tick(0);
    assert_eq!(snapshot.phase, MatchPhase::MapSelection);
    assert_eq!(snapshot.timeouts.home, TIMEOUTS_PER_SIDE);
}

#[test]
fn test_draft_commands() {
    let config = SimConfig {
        ai_sides: Vec::new(),
        ..auto_config(9)
    };
    let mut engine = MatchEngine::new(config, setup());
    engine.tick(MAP_REVEAL_UNITS);
    assert_eq!(engine.phase(), MatchPhase::Draft);

    engine.queue_command(PlayerCommand::SelectAgent {
        side: TeamSide::Home,
        agent_id: 1,
    });
    engine.queue_command(PlayerCommand::BanAgent { agent_id: 4 });
    engine.queue_command(PlayerCommand::BanAgent { agent_id: 4 });
    let snapshot = engine.tick(0);

    let draft = snapshot.draft.expect("draft in progress");
    assert_eq!(draft.banned, vec![4], "pick during bans and repeat ban rejected");
    assert_eq!(draft.acting, Some(TeamSide::Away));
    assert_eq!(
        snapshot.events,
        vec![MatchEvent::AgentBanned {
            side: TeamSide::Home,
            agent_id: 4,
            auto: false
        }]
    );

    for id in [5, 6, 7, 8, 9] {
        engine.queue_command(PlayerCommand::BanAgent { agent_id: id });
    }
    engine.queue_command(PlayerCommand::SelectAgent {
        side: TeamSide::Home,
        agent_id: 1,
    });
    let snapshot = engine.tick(0);
    let draft = snapshot.draft.unwrap();
    assert_eq!(draft.phase, DraftPhase::Pick);
    assert_eq!(draft.home_picks, vec![1]);
}

#[test]
fn test_manual_draft_reaches_simulation() {
    let config = SimConfig {
        ai_sides: Vec::new(),
        ..auto_config(10)
    };
    let mut engine = MatchEngine::new(config, setup());
    engine.tick(MAP_REVEAL_UNITS);

    for id in 1..=6 {
        engine.queue_command(PlayerCommand::BanAgent { agent_id: id });
    }
    for (i, id) in (7..=16).enumerate() {
        engine.queue_command(PlayerCommand::SelectAgent {
            side: TeamSide::for_parity(i),
            agent_id: id,
        });
    }
    let snapshot = engine.tick(0);
    assert!(snapshot.events.contains(&MatchEvent::DraftCompleted));
    assert_eq!(snapshot.phase, MatchPhase::MapBan);
    assert!(snapshot.draft.is_none());
    assert_eq!(engine.state().home_agents, vec![7, 9, 11, 13, 15]);
    assert_eq!(engine.state().away_agents, vec![8, 10, 12, 14, 16]);

    let snapshot = engine.tick(1);
    assert_eq!(snapshot.phase, MatchPhase::Simulation);
    assert!(snapshot.events.contains(&MatchEvent::SimulationStarted));
}

#[test]
fn test_unattended_draft_times_out() {
    let config = SimConfig {
        ai_sides: Vec::new(),
        ..auto_config(11)
    };
    let mut engine = MatchEngine::new(config, setup());
    engine.tick(MAP_REVEAL_UNITS);
    engine.tick(DRAFT_TURN_UNITS * 16);
    assert_eq!(engine.phase(), MatchPhase::MapBan);
}

#[test]
fn test_exit_discards_progress() {
    let mut engine = MatchEngine::new(auto_config(12), setup());
    advance_to_simulation(&mut engine);
    engine.tick(ROUND_TIMER_UNITS * 3);
    assert!(!engine.state().history.is_empty());

    engine.queue_command(PlayerCommand::ExitMatch);
    let snapshot = engine.tick(100);
    assert_eq!(snapshot.phase, MatchPhase::Exited);
    assert!(snapshot.events.contains(&MatchEvent::MatchExited));
    let state = engine.state();
    assert!(state.history.is_empty());
    assert!(state.home_agents.is_empty());
    assert_eq!(state.home_score + state.away_score, 0);
    assert_eq!(state.economy, Economy::default());
    assert!(engine.result().is_none());

    // Terminal: nothing moves any more.
    engine.queue_command(PlayerCommand::SetPlaying { playing: true });
    let snapshot = engine.tick(500);
    assert_eq!(snapshot.phase, MatchPhase::Exited);
}

#[test]
fn test_completed_match_ignores_exit() {
    let mut engine = MatchEngine::new(auto_config(13), setup());
    run_to_end(&mut engine);
    let rounds = engine.state().history.len();
    engine.queue_command(PlayerCommand::ExitMatch);
    let snapshot = engine.tick(10);
    assert_eq!(snapshot.phase, MatchPhase::Completed);
    assert_eq!(engine.state().history.len(), rounds);
}

#[test]
fn test_sink_receives_result_once() {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let mut engine = MatchEngine::new(auto_config(14), setup())
        .with_sink(Box::new(RecordingSink(saved.clone())));
    run_to_end(&mut engine);
    engine.tick(100);

    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].fixture_id, 77);
    assert_eq!(Some(&saved[0]), engine.result());
}

#[test]
fn test_failing_sink_does_not_stop_completion() {
    let mut engine = MatchEngine::new(auto_config(15), setup()).with_sink(Box::new(FailingSink));
    run_to_end(&mut engine);
    assert_eq!(engine.phase(), MatchPhase::Completed);
    assert!(engine.result().is_some());
}

#[test]
fn test_broken_advisor_falls_back() {
    let mut engine =
        MatchEngine::new(auto_config(16), setup()).with_advisor(Box::new(BrokenAdvisor));
    advance_to_simulation(&mut engine);
    engine.queue_command(PlayerCommand::CallTimeout {
        side: TeamSide::Away,
    });
    let snapshot = engine.tick(0);

    let focus = TeamComposition::from_agents(
        engine
            .state()
            .away_agents
            .iter()
            .filter_map(|id| engine.catalog().get_agent(*id).ok()),
    )
    .dominant_role();
    let expected = fallback_advice(focus).to_string();
    assert!(snapshot.events.contains(&MatchEvent::TacticalAdvice {
        side: TeamSide::Away,
        text: expected,
    }));
}

#[test]
fn test_advice_prefers_service_text() {
    let context = AdvisoryContext {
        side: TeamSide::Home,
        phase: MatchPhase::Timeout,
        round: 4,
        home_score: 2,
        away_score: 1,
        focus_role: Some(PlayerRole::Sentinel),
    };
    assert_eq!(advice_or_fallback(Some(&EchoAdvisor), &context), "round 4 plan");
    assert_eq!(
        advice_or_fallback(None, &context),
        fallback_advice(Some(PlayerRole::Sentinel))
    );
}

// ---- Summary ----

fn kill(killer: PlayerId, side: TeamSide, victim: PlayerId, headshot: bool) -> KillEvent {
    KillEvent {
        killer,
        killer_side: side,
        victim,
        weapon: Weapon::Rifle,
        headshot,
        time: 10,
    }
}

#[test]
fn test_summary_stats_and_mvp() {
    let s = setup();
    let mut state = MatchState::new(s.fixture, s.home, s.away);
    state.phase = MatchPhase::Simulation;

    let mut first = staged_round(1, TeamSide::Home);
    first.duration = 50;
    first.kills = vec![kill(1, TeamSide::Home, 11, true)];
    state.apply_round(first);

    let mut second = staged_round(2, TeamSide::Away);
    second.duration = 70;
    second.kills = vec![
        kill(12, TeamSide::Away, 1, false),
        kill(12, TeamSide::Away, 2, false),
        kill(3, TeamSide::Home, 13, false),
    ];
    state.apply_round(second);

    let result = summarize(&state);
    assert_eq!(result.winner, None);
    assert_eq!(result.rounds_played, 2);
    assert_eq!(result.duration, 120);
    assert_eq!(result.player_stats.len(), 10);

    let h1 = result.player_stats.iter().find(|p| p.player_id == 1).unwrap();
    assert_eq!((h1.kills, h1.deaths, h1.headshots, h1.clutches), (1, 1, 1, 1));
    assert!((h1.adr - 75.0).abs() < 1e-10);

    let a2 = result.player_stats.iter().find(|p| p.player_id == 12).unwrap();
    assert_eq!((a2.kills, a2.deaths, a2.clutches), (2, 0, 0));
    assert!((a2.rating - (0.5 / 0.68 + 0.5 / 0.32)).abs() < 1e-10);

    let mvp = result.mvp.expect("mvp");
    assert_eq!(mvp.player_id, 12);
    assert!(mvp_score(&mvp) > mvp_score(h1));
    assert!(result.analysis.iter().any(|l| l.contains("1 of 2 rounds")));
}

#[test]
fn test_summary_of_empty_match() {
    let s = setup();
    let state = MatchState::new(s.fixture, s.home, s.away);
    let result = summarize(&state);
    assert!(result.mvp.is_none());
    assert_eq!(result.duration, 0);
    assert_eq!(result.analysis, vec!["No rounds were played.".to_string()]);
}
