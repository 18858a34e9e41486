//! Per-run counters owned by the engine.
//!
//! Stored on `EncounterEngine`, NOT as ECS entities.

use gunner_core::catalog::{LevelDescriptor, CAMPAIGN_LEVELS};
use gunner_core::constants::MAX_PLAYER_HEALTH;
use gunner_core::enums::{GameMode, RunPhase};
use gunner_core::profile::UpgradeLevels;
use gunner_core::types::Loadout;

/// Authoritative state of the current (or last) run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub phase: RunPhase,
    pub mode: GameMode,
    pub level: &'static LevelDescriptor,
    pub loadout: Loadout,
    pub score: u32,
    pub high_score: u32,
    pub kills: u32,
    pub health: u32,
    pub ammo: u32,
    pub reloading: bool,
    /// Currency earned this run, banked on victory or defeat.
    pub currency: u32,
    /// The kill target was reached and the victory delay is running.
    pub victory_pending: bool,
}

impl Default for RunState {
    fn default() -> Self {
        let loadout = UpgradeLevels::default().loadout();
        Self {
            phase: RunPhase::Idle,
            mode: GameMode::Campaign,
            level: &CAMPAIGN_LEVELS[0],
            loadout,
            score: 0,
            high_score: 0,
            kills: 0,
            health: MAX_PLAYER_HEALTH,
            ammo: loadout.max_ammo,
            reloading: false,
            currency: 0,
            victory_pending: false,
        }
    }
}

impl RunState {
    /// Fresh state for a run that is about to start.
    pub fn start(
        mode: GameMode,
        level: &'static LevelDescriptor,
        loadout: Loadout,
        high_score: u32,
    ) -> Self {
        Self {
            phase: RunPhase::Running,
            mode,
            level,
            loadout,
            high_score,
            ammo: loadout.max_ammo,
            ..Self::default()
        }
    }

    /// The run accepts hits and spawns. False once the kill target is reached.
    pub fn is_live(&self) -> bool {
        self.phase == RunPhase::Running && !self.victory_pending
    }

    /// Kill target reached in campaign mode.
    pub fn target_reached(&self) -> bool {
        self.mode == GameMode::Campaign
            && self
                .level
                .required_kills
                .is_some_and(|required| self.kills >= required)
    }
}
