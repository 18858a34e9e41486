//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. The set is closed; per-kind stats live in `catalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Weak melee grunt.
    Slime,
    /// Fast flyer with a short visible window.
    Bat,
    /// Slow tank with a lot of hit points.
    Bear,
    /// Special enemy that flickers while visible.
    Ghost,
}

impl EnemyKind {
    /// Every kind, in catalog order.
    pub const ALL: [EnemyKind; 4] = [Self::Slime, Self::Bat, Self::Bear, Self::Ghost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slime => "slime",
            Self::Bat => "bat",
            Self::Bear => "bear",
            Self::Ghost => "ghost",
        }
    }
}

/// Enemy lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Rising out of cover.
    #[default]
    Appearing,
    /// Fully exposed and waiting to attack.
    Visible,
    /// Winding up an attack on the player.
    Attacking,
    /// Killed, playing its death before removal.
    Dying,
    /// Retreated after attacking. Removed on the tick it is reached.
    Hiding,
}

impl EnemyState {
    /// Dying and hiding enemies no longer hold their lane.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dying | Self::Hiding)
    }

    /// Only enemies still coming up or fully visible can be shot.
    pub fn is_targetable(&self) -> bool {
        matches!(self, Self::Appearing | Self::Visible)
    }
}

/// Run mode selected at start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Fixed level with a kill target.
    #[default]
    Campaign,
    /// No kill target, difficulty ramps with kills.
    Endless,
}

/// Top-level run phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Victory,
    Defeat,
}

/// Upgrade track purchasable in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeTrack {
    Damage,
    Capacity,
    ReloadSpeed,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 3] = [Self::Damage, Self::Capacity, Self::ReloadSpeed];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "damage" => Some(Self::Damage),
            "capacity" => Some(Self::Capacity),
            "reload" | "reload_speed" | "reloadspeed" => Some(Self::ReloadSpeed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Damage => "damage",
            Self::Capacity => "capacity",
            Self::ReloadSpeed => "reload_speed",
        }
    }
}
