//! Random selection over the available pool.
//!
//! Shared by turn expiry, AI-controlled sides and the UI hint.

use rand::seq::SliceRandom;
use rand::Rng;

use clutch_core::types::AgentId;

use crate::negotiator::DraftState;

/// Uniformly random agent among those still available.
pub fn random_available<R: Rng + ?Sized>(draft: &DraftState, rng: &mut R) -> Option<AgentId> {
    draft.available().choose(rng).copied()
}

/// Advisory pick for the side to act. Never mutates the draft.
pub fn suggestion<R: Rng + ?Sized>(draft: &DraftState, rng: &mut R) -> Option<AgentId> {
    if draft.is_complete() {
        return None;
    }
    random_available(draft, rng)
}
