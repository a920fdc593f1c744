//! Post-match summary: per-player statistics, MVP and analysis lines.

use std::collections::HashMap;

use clutch_core::constants::*;
use clutch_core::enums::{EndCondition, TeamSide};
use clutch_core::results::{MatchResult, PlayerMatchStats};
use clutch_core::types::{PlayerId, RoundResult};

use crate::match_state::MatchState;

/// Build the final result from a match's score and round history.
pub fn summarize(state: &MatchState) -> MatchResult {
    let rounds = state.history.len() as u32;
    let player_stats = player_stats(state);
    let mvp = if rounds == 0 {
        None
    } else {
        player_stats
            .iter()
            .max_by(|a, b| mvp_score(a).total_cmp(&mvp_score(b)))
            .cloned()
    };

    let winner = if state.home_score > state.away_score {
        Some(TeamSide::Home)
    } else if state.away_score > state.home_score {
        Some(TeamSide::Away)
    } else {
        None
    };

    MatchResult {
        fixture_id: state.fixture.id,
        home_team: state.home.id,
        away_team: state.away.id,
        map: state.map.as_ref().map(|m| m.id),
        winner,
        home_score: state.home_score,
        away_score: state.away_score,
        rounds_played: rounds,
        duration: state.history.iter().map(|r| r.duration).sum(),
        mvp,
        analysis: analysis(state),
        player_stats,
    }
}

/// MVP weighting over one player's stats.
pub fn mvp_score(stats: &PlayerMatchStats) -> f64 {
    0.4 * stats.rating + 0.3 * stats.kd() + 0.002 * stats.adr + 0.1 * stats.clutches as f64
}

/// Aggregate kill events into per-player lines for both rosters.
pub fn player_stats(state: &MatchState) -> Vec<PlayerMatchStats> {
    let mut lines: Vec<PlayerMatchStats> = Vec::new();
    let mut index: HashMap<(TeamSide, PlayerId), usize> = HashMap::new();

    for side in [TeamSide::Home, TeamSide::Away] {
        for member in &state.team(side).roster {
            index.insert((side, member.id), lines.len());
            lines.push(PlayerMatchStats {
                player_id: member.id,
                name: member.name.clone(),
                side,
                ..Default::default()
            });
        }
    }

    for round in &state.history {
        for kill in &round.kills {
            if let Some(&i) = index.get(&(kill.killer_side, kill.killer)) {
                lines[i].kills += 1;
                lines[i].damage += DAMAGE_PER_KILL;
                if kill.headshot {
                    lines[i].headshots += 1;
                }
            }
            if let Some(&i) = index.get(&(kill.killer_side.opponent(), kill.victim)) {
                lines[i].deaths += 1;
            }
        }
        if let Some((side, player)) = clutch_player(round) {
            if let Some(&i) = index.get(&(side, player)) {
                lines[i].clutches += 1;
            }
        }
    }

    let rounds = state.history.len() as f64;
    if rounds > 0.0 {
        for line in &mut lines {
            line.adr = line.damage as f64 / rounds;
            let kpr = line.kills as f64 / rounds;
            let survival = (rounds - line.deaths as f64).max(0.0) / rounds;
            line.rating = 0.5 * (kpr / AVERAGE_KPR) + 0.5 * (survival / AVERAGE_SURVIVAL);
        }
    }

    lines
}

/// A low-kill round whose winning-side kills all came from one player.
fn clutch_player(round: &RoundResult) -> Option<(TeamSide, PlayerId)> {
    if round.kills.len() > CLUTCH_KILL_THRESHOLD {
        return None;
    }
    let mut killers = round
        .kills
        .iter()
        .filter(|k| k.killer_side == round.winner)
        .map(|k| k.killer);
    let first = killers.next()?;
    if killers.all(|k| k == first) {
        Some((round.winner, first))
    } else {
        None
    }
}

fn is_clutch_round(round: &RoundResult) -> bool {
    round.kills.len() <= CLUTCH_KILL_THRESHOLD
}

fn analysis(state: &MatchState) -> Vec<String> {
    let mut lines = Vec::new();
    let rounds = state.history.len();
    if rounds == 0 {
        lines.push("No rounds were played.".to_string());
        return lines;
    }

    let (winner_name, high, low) = if state.home_score >= state.away_score {
        (&state.home.name, state.home_score, state.away_score)
    } else {
        (&state.away.name, state.away_score, state.home_score)
    };
    let margin = high - low;
    let verdict = if margin >= 8 {
        "a dominant"
    } else if margin >= 4 {
        "a comfortable"
    } else {
        "a narrow"
    };
    lines.push(format!(
        "{winner_name} won {high}-{low}, {verdict} {margin}-round margin."
    ));

    let regulation = (ROUNDS_PER_HALF * 2) as usize;
    let duration: u32 = state.history.iter().map(|r| r.duration).sum();
    if rounds > regulation {
        lines.push(format!(
            "The match went to overtime and lasted {rounds} rounds ({duration} time-units)."
        ));
    } else {
        lines.push(format!(
            "Decided in {rounds} rounds ({duration} time-units)."
        ));
    }

    let clutch_rounds = state.history.iter().filter(|r| is_clutch_round(r)).count();
    let pct = clutch_rounds as f64 * 100.0 / rounds as f64;
    lines.push(format!(
        "{clutch_rounds} of {rounds} rounds ({pct:.0}%) were low-kill clutch rounds."
    ));

    let explodes = state
        .history
        .iter()
        .filter(|r| r.end_condition == EndCondition::Explode)
        .count();
    if explodes * 4 >= rounds {
        lines.push(format!(
            "The spike went off in {explodes} rounds; attacks kept finding the plant."
        ));
    }

    lines
}
