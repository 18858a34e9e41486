//! Run snapshot: the complete visible state handed to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::FeedbackEvent;
use crate::types::SimTime;

/// Complete run state broadcast after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub time: SimTime,
    pub phase: RunPhase,
    pub mode: GameMode,
    pub level: LevelView,
    pub stats: RunStatsView,
    /// Active enemies ordered by id.
    pub enemies: Vec<EnemyView>,
    /// Feedback emitted since the previous snapshot.
    pub events: Vec<FeedbackEvent>,
}

impl RunSnapshot {
    /// Enemy currently holding `lane`, ignoring dying ones.
    pub fn lane_occupant(&self, lane: u8) -> Option<&EnemyView> {
        self.enemies
            .iter()
            .find(|enemy| enemy.lane == lane && !enemy.state.is_terminal())
    }
}

/// The level being played.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelView {
    pub id: u32,
    pub name: String,
    pub required_kills: Option<u32>,
}

/// Player-facing counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatsView {
    pub score: u32,
    /// Endless best at run start (0 in campaign).
    pub high_score: u32,
    pub kills: u32,
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    /// Currency earned this run, not yet banked.
    pub currency: u32,
}

/// One enemy on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub lane: u8,
    pub kind: EnemyKind,
    pub hp: u32,
    pub max_hp: u32,
    pub state: EnemyState,
}
