//! Match tuning parameters.
//!
//! All timers are expressed in abstract time-units. The host decides how much
//! wall-clock time one unit represents.

// --- Clocks ---

/// Round countdown length.
pub const ROUND_TIMER_UNITS: u32 = 120;

/// Per-turn draft countdown before the turn auto-resolves.
pub const DRAFT_TURN_UNITS: u32 = 20;

/// Timeout countdown length.
pub const TIMEOUT_UNITS: u32 = 30;

/// How long the selected map is displayed before the draft opens.
pub const MAP_REVEAL_UNITS: u32 = 3;

/// Think delay before an AI-controlled side makes its draft selection.
pub const AI_DRAFT_THINK_UNITS: u32 = 3;

/// A flavor event is emitted every this many round-timer ticks.
pub const FLAVOR_INTERVAL_UNITS: u32 = 30;

// --- Draft ---

/// Number of ban turns (alternating home/away).
pub const BAN_TURNS: usize = 6;

/// Number of pick turns (alternating home/away).
pub const PICK_TURNS: usize = 10;

/// Agents each side ends the draft with.
pub const AGENTS_PER_SIDE: usize = 5;

// --- Match format ---

/// Rounds needed to win, subject to the margin rule.
pub const ROUNDS_TO_WIN: u32 = 13;

/// Minimum lead required to close out the match.
pub const WIN_MARGIN: u32 = 2;

/// Rounds played before sides swap.
pub const ROUNDS_PER_HALF: u32 = 12;

/// Timeouts each side may call per match.
pub const TIMEOUTS_PER_SIDE: u8 = 2;

// --- Economy ---

/// Credits each side starts the match with.
pub const STARTING_CREDITS: u32 = 800;

/// Credit ceiling.
pub const MAX_CREDITS: u32 = 9000;

/// Credits awarded to the round loser.
pub const LOSS_BONUS: u32 = 1900;

/// Credits awarded to the round winner.
pub const WIN_BONUS: u32 = 3000;

/// Extra credits when the round ends in a spike detonation.
pub const PLANT_BONUS: u32 = 800;

/// Below this the side is on an eco round.
pub const ECO_THRESHOLD: u32 = 3000;

/// At or above this the side has a full buy.
pub const FULL_BUY_THRESHOLD: u32 = 5000;

pub const ECO_FACTOR: f64 = 0.8;
pub const HALF_BUY_FACTOR: f64 = 1.0;
pub const FULL_BUY_FACTOR: f64 = 1.2;

// --- Strength model ---

/// Strength returned when there is nothing to evaluate.
pub const NEUTRAL_STRENGTH: f64 = 50.0;

/// Weight of the synergy score in the combined strength.
pub const SYNERGY_WEIGHT: f64 = 0.3;

/// Per-agent side bonus for the primary role of a side.
pub const PRIMARY_ROLE_BONUS: f64 = 5.0;

/// Per-agent side bonus for the secondary role of a side.
pub const SECONDARY_ROLE_BONUS: f64 = 3.0;

/// Morale at which the morale bonus is zero.
pub const MORALE_BASELINE: f64 = 75.0;

pub const MORALE_WEIGHT: f64 = 0.2;

/// Synergy starting value before adjustments.
pub const SYNERGY_BASE: f64 = 50.0;

/// Multiplier on the 0..1 composition match score.
pub const COMPOSITION_WEIGHT: f64 = 20.0;

/// Teamwork at which the teamwork adjustment is zero.
pub const TEAMWORK_BASELINE: f64 = 75.0;

pub const TEAMWORK_WEIGHT: f64 = 0.3;

/// Flat bonus when at least `ROLE_COVERAGE_MIN` roles are represented.
pub const ROLE_COVERAGE_BONUS: f64 = 10.0;

pub const ROLE_COVERAGE_MIN: usize = 4;

/// Choke points above which a map favours an extra initiator.
pub const CHOKE_HEAVY_THRESHOLD: u8 = 4;

// --- Round flavor ---

pub const MIN_KILLS_PER_ROUND: usize = 2;
pub const MAX_KILLS_PER_ROUND: usize = 4;

/// Share of kills credited to the round winner.
pub const WINNER_KILL_SHARE: f64 = 0.7;

pub const HEADSHOT_CHANCE: f64 = 0.25;

/// Attack-side win ending in detonation.
pub const ATTACK_EXPLODE_CHANCE: f64 = 0.3;

/// Defense-side win ending in elimination.
pub const DEFENSE_ELIMINATION_CHANCE: f64 = 0.6;

/// Defense-side win ending in a defuse (cumulative with elimination).
pub const DEFENSE_DEFUSE_CHANCE: f64 = 0.2;

/// Shortest non-timed round.
pub const MIN_ROUND_DURATION: u32 = 30;

/// Longest non-timed round.
pub const MAX_ROUND_DURATION: u32 = 110;

// --- Post-match ---

/// Damage attributed to each kill when deriving ADR.
pub const DAMAGE_PER_KILL: u32 = 150;

/// League-average kills per round used to normalise the rating.
pub const AVERAGE_KPR: f64 = 0.68;

/// League-average survival rate used to normalise the rating.
pub const AVERAGE_SURVIVAL: f64 = 0.32;

/// Rounds with at most this many kills count as clutch rounds.
pub const CLUTCH_KILL_THRESHOLD: usize = 2;
