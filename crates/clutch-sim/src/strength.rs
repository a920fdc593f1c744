//! Team strength model.
//!
//! Pure functions mapping a roster, its drafted composition, the map and the
//! side being played to a scalar combat strength. The economy multiplier is
//! kept separate so the caller applies it to the combined value.

use clutch_core::constants::*;
use clutch_core::enums::Side;
use clutch_core::types::{MapLayout, RosterMember, TeamComposition};

/// Everything the model needs about one team for one round.
#[derive(Debug, Clone, Copy)]
pub struct StrengthInputs<'a> {
    pub roster: &'a [RosterMember],
    pub composition: TeamComposition,
    pub map: &'a MapLayout,
}

/// Combined strength before the economy multiplier.
///
/// Returns `NEUTRAL_STRENGTH` for an empty roster or composition.
pub fn compute_strength(
    roster: &[RosterMember],
    composition: &TeamComposition,
    map: &MapLayout,
    side: Side,
) -> f64 {
    if roster.is_empty() || composition.is_empty() {
        return NEUTRAL_STRENGTH;
    }

    let avg_skill = mean(roster.iter().map(RosterMember::skill_average));
    let synergy = compute_synergy(composition, roster, map) * SYNERGY_WEIGHT;
    let side_bonus = side_bonus(composition, side);
    let avg_morale = mean(roster.iter().map(|m| m.morale));
    let morale_bonus = MORALE_WEIGHT * (avg_morale - MORALE_BASELINE);

    avg_skill + synergy + side_bonus + morale_bonus
}

/// Flat bonus for roles suited to the side: duelists and initiators on
/// attack, sentinels and controllers on defense.
pub fn side_bonus(composition: &TeamComposition, side: Side) -> f64 {
    let (primary, secondary) = match side {
        Side::Attack => (composition.duelist, composition.initiator),
        Side::Defense => (composition.sentinel, composition.controller),
    };
    PRIMARY_ROLE_BONUS * primary as f64 + SECONDARY_ROLE_BONUS * secondary as f64
}

/// Role synergy in `[0, 100]`.
pub fn compute_synergy(
    composition: &TeamComposition,
    roster: &[RosterMember],
    map: &MapLayout,
) -> f64 {
    let ideal = ideal_composition(map);

    let actual = composition.as_array();
    let target = ideal.as_array();
    let composition_score = actual
        .iter()
        .zip(target.iter())
        .map(|(&a, &t)| (1.0 - 0.5 * (a as f64 - t as f64).abs()).max(0.0))
        .sum::<f64>()
        / actual.len() as f64;

    // An empty roster contributes no teamwork adjustment.
    let avg_teamwork = if roster.is_empty() {
        TEAMWORK_BASELINE
    } else {
        mean(roster.iter().map(|m| m.teamwork))
    };

    let mut synergy = SYNERGY_BASE;
    synergy += composition_score * COMPOSITION_WEIGHT;
    synergy += (avg_teamwork - TEAMWORK_BASELINE) * TEAMWORK_WEIGHT;
    if composition.covered_roles() >= ROLE_COVERAGE_MIN {
        synergy += ROLE_COVERAGE_BONUS;
    }

    synergy.clamp(0.0, 100.0)
}

/// Composition the map rewards.
pub fn ideal_composition(map: &MapLayout) -> TeamComposition {
    if map.bomb_sites == 3 {
        TeamComposition::new(1, 1, 2, 1, 0)
    } else if map.choke_points > CHOKE_HEAVY_THRESHOLD {
        TeamComposition::new(1, 2, 1, 1, 0)
    } else {
        TeamComposition::new(1, 1, 1, 1, 1)
    }
}

/// Buy-level multiplier for a side's credits.
pub fn economy_factor(credits: u32) -> f64 {
    if credits < ECO_THRESHOLD {
        ECO_FACTOR
    } else if credits < FULL_BUY_THRESHOLD {
        HALF_BUY_FACTOR
    } else {
        FULL_BUY_FACTOR
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
