//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, EnemyState};

/// One hostile occupying a lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique per spawn, never reused within an engine.
    pub id: u32,
    pub lane: u8,
    pub kind: EnemyKind,
    pub hp: u32,
    /// Starting hp after difficulty scaling.
    pub max_hp: u32,
    /// Sim time (ms) at which the current state's timer started.
    pub appear_ms: u64,
    /// Visible window before the enemy attacks (ms).
    pub duration_ms: f64,
    pub state: EnemyState,
}
