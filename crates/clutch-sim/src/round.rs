//! Round resolution.
//!
//! Draws a winner from the two economy-adjusted strengths, picks how the
//! round ended, generates cosmetic kill events and applies the capped
//! economy earnings.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use clutch_core::constants::*;
use clutch_core::enums::{EndCondition, Side, TeamSide, Weapon};
use clutch_core::types::{Economy, KillEvent, PlayerId, RoundResult, RosterMember};

use crate::strength::{compute_strength, economy_factor, StrengthInputs};

/// Probability that home takes the round given adjusted strengths.
pub fn win_probability(adj_home: f64, adj_away: f64) -> f64 {
    let home = adj_home.max(0.0);
    let away = adj_away.max(0.0);
    let total = home + away;
    if total <= f64::EPSILON {
        0.5
    } else {
        home / total
    }
}

/// Home win probability for one round, economy multiplier included.
pub fn home_win_probability(
    home: &StrengthInputs<'_>,
    away: &StrengthInputs<'_>,
    home_side: Side,
    economy: &Economy,
) -> f64 {
    let raw_home = compute_strength(home.roster, &home.composition, home.map, home_side);
    let raw_away = compute_strength(
        away.roster,
        &away.composition,
        away.map,
        home_side.opposite(),
    );
    let adj_home = raw_home * economy_factor(economy.home);
    let adj_away = raw_away * economy_factor(economy.away);
    debug!(raw_home, raw_away, adj_home, adj_away, "round strengths");
    win_probability(adj_home, adj_away)
}

/// Resolve one round. `home_side` is the side the home team plays.
pub fn resolve_round<R: Rng + ?Sized>(
    round: u32,
    home: &StrengthInputs<'_>,
    away: &StrengthInputs<'_>,
    home_side: Side,
    economy: Economy,
    rng: &mut R,
) -> RoundResult {
    let p_home = home_win_probability(home, away, home_side, &economy);
    let winner = if rng.gen::<f64>() < p_home {
        TeamSide::Home
    } else {
        TeamSide::Away
    };

    let winner_side = match winner {
        TeamSide::Home => home_side,
        TeamSide::Away => home_side.opposite(),
    };
    let end_condition = pick_end_condition(winner_side, rng);

    let duration = match end_condition {
        EndCondition::Time => ROUND_TIMER_UNITS,
        _ => rng.gen_range(MIN_ROUND_DURATION..=MAX_ROUND_DURATION),
    };

    let (winner_roster, loser_roster) = match winner {
        TeamSide::Home => (home.roster, away.roster),
        TeamSide::Away => (away.roster, home.roster),
    };
    let kills = generate_kills(winner, winner_roster, loser_roster, duration, rng);

    let economy = apply_round_economy(economy, winner, end_condition);

    debug!(
        round,
        ?winner,
        ?end_condition,
        p_home,
        home_credits = economy.home,
        away_credits = economy.away,
        "round resolved"
    );

    RoundResult {
        round,
        winner,
        home_side,
        end_condition,
        duration,
        kills,
        economy,
    }
}

/// How a round ended, given the side the winner played.
pub fn pick_end_condition<R: Rng + ?Sized>(winner_side: Side, rng: &mut R) -> EndCondition {
    let roll: f64 = rng.gen();
    match winner_side {
        Side::Attack => {
            if roll < ATTACK_EXPLODE_CHANCE {
                EndCondition::Explode
            } else {
                EndCondition::Elimination
            }
        }
        Side::Defense => {
            if roll < DEFENSE_ELIMINATION_CHANCE {
                EndCondition::Elimination
            } else if roll < DEFENSE_ELIMINATION_CHANCE + DEFENSE_DEFUSE_CHANCE {
                EndCondition::Defuse
            } else {
                EndCondition::Time
            }
        }
    }
}

/// Earnings for both sides, capped at `MAX_CREDITS`.
pub fn apply_round_economy(mut economy: Economy, winner: TeamSide, end: EndCondition) -> Economy {
    let mut win_bonus = WIN_BONUS;
    if end == EndCondition::Explode {
        win_bonus += PLANT_BONUS;
    }
    economy.credit(winner, win_bonus);
    economy.credit(winner.opponent(), LOSS_BONUS);
    economy
}

/// Two to four cosmetic kills. The winner supplies most of the killers and
/// no player dies twice in a round.
pub fn generate_kills<R: Rng + ?Sized>(
    winner: TeamSide,
    winner_roster: &[RosterMember],
    loser_roster: &[RosterMember],
    duration: u32,
    rng: &mut R,
) -> Vec<KillEvent> {
    let count = rng.gen_range(MIN_KILLS_PER_ROUND..=MAX_KILLS_PER_ROUND);

    let mut alive_winners: Vec<PlayerId> = winner_roster.iter().map(|m| m.id).collect();
    let mut alive_losers: Vec<PlayerId> = loser_roster.iter().map(|m| m.id).collect();
    let mut kills = Vec::with_capacity(count);

    for _ in 0..count {
        let winner_scores = rng.gen_bool(WINNER_KILL_SHARE);
        let (killer_side, killers, victims) = if winner_scores {
            (winner, &alive_winners, &mut alive_losers)
        } else {
            (winner.opponent(), &alive_losers, &mut alive_winners)
        };

        let Some(&killer) = killers.choose(rng) else {
            continue;
        };
        if victims.is_empty() {
            continue;
        }
        let victim = victims.swap_remove(rng.gen_range(0..victims.len()));

        kills.push(KillEvent {
            killer,
            killer_side,
            victim,
            weapon: *Weapon::ALL.choose(rng).unwrap_or(&Weapon::Rifle),
            headshot: rng.gen_bool(HEADSHOT_CHANCE),
            time: rng.gen_range(1..=duration.max(1)),
        });
    }

    kills.sort_by_key(|k| k.time);
    kills
}
