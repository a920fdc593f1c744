//! Snapshot builder: reads the match aggregate into a serialisable view.

use clutch_core::events::MatchEvent;
use clutch_core::state::MatchSnapshot;
use clutch_core::types::AgentId;

use crate::match_state::MatchState;

/// Build the snapshot returned from a tick.
pub fn build_snapshot(
    state: &MatchState,
    elapsed: u64,
    suggestion: Option<AgentId>,
    events: Vec<MatchEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        elapsed,
        phase: state.phase,
        is_playing: state.is_playing,
        map: state.map.clone(),
        round: state.round,
        home_score: state.home_score,
        away_score: state.away_score,
        round_timer: state.round_timer,
        timeout_timer: state.timeout_timer,
        timeouts: state.timeouts,
        economy: state.economy,
        draft: state.draft.as_ref().map(|d| d.to_view()),
        suggestion,
        events,
    }
}
