//! CLUTCH host.
//!
//! Loads configuration, wires the file-backed collaborators into the match
//! engine and runs it on a wall-clock game loop thread.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod persistence;
pub mod providers;
pub mod setup;
pub mod state;

pub use clutch_core as core;
