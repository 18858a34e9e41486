//! GUNNER headless driver.
//!
//! Wires the simulation and campaign crates together: a fixed-rate game
//! loop thread, an autopilot for unattended runs, and feedback logging.

pub mod autopilot;
pub mod feedback;
pub mod game_loop;
pub mod state;

pub use gunner_core as core;
