//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::GameMode;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Begin a new run. `level_id` is ignored in endless mode.
    Start { mode: GameMode, level_id: u32 },
    /// Abandon the current run (navigating away from the play field).
    Stop,
    /// Pull the trigger. `target` is the enemy under the cursor, if any.
    /// `on_ui_control` is set when the click landed on a button.
    Shoot {
        #[serde(default)]
        target: Option<u32>,
        #[serde(default)]
        on_ui_control: bool,
    },
    /// Click directly on an enemy.
    Hit { enemy_id: u32 },
    /// Start reloading.
    Reload,
}
