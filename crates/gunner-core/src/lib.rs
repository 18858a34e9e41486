//! Core types and definitions for the GUNNER encounter simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! enums, commands, feedback events, state snapshots, static catalogs,
//! the persistent profile and constants.
//! It has no dependency on any runtime framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod profile;
pub mod state;
pub mod types;
