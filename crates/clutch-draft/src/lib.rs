//! Draft/ban negotiation for CLUTCH.
//!
//! Alternating-turn state machine over a ban phase and a pick phase, with
//! per-turn countdown auto-resolution and advisory suggestions. Operates on
//! plain data with an injected random source.

pub mod negotiator;
pub mod suggest;

pub use clutch_core as core;
pub use negotiator::{DraftAction, DraftState, DraftTurn};
