//! Core types and definitions for the CLUTCH match engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the data model, reference catalogs, commands, events, snapshots,
//! constants, errors and collaborator traits. It has no dependency on
//! any runtime or host.

pub mod catalog;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod providers;
pub mod results;
pub mod state;
pub mod types;
