//! Match simulation engine for CLUTCH.
//!
//! Owns the match aggregate, resolves rounds from the team strength model,
//! drives the phase machine from an explicit tick, and produces
//! `MatchSnapshot`s and the final `MatchResult`.

pub mod advisory;
pub mod engine;
pub mod flavor;
pub mod match_state;
pub mod round;
pub mod snapshot;
pub mod strength;
pub mod summary;

pub use clutch_core as core;
pub use engine::{MatchEngine, MatchSetup, SimConfig};

#[cfg(test)]
mod tests;
