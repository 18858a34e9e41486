//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

/// Simulation time tracking. Reset to zero at the start of every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: u64,
}

impl SimTime {
    /// Advance by one tick of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: u64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms;
    }
}

/// Player-facing weapon stats derived from upgrade levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub max_ammo: u32,
    pub reload_ms: u64,
    pub damage: u32,
}
