//! Encounter simulation for GUNNER.
//!
//! Owns the hecs world of enemies, runs systems once per frame,
//! and produces RunSnapshots for the presentation layer.

pub mod engine;
pub mod run_state;
pub mod systems;
pub mod timers;

pub use engine::{EncounterEngine, EncounterError, SimConfig};
pub use gunner_core as core;
