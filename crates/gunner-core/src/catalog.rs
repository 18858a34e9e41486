//! Static game data: enemy type table, level catalog and lane layout.
//!
//! Nothing here is mutated at runtime. The simulation reads these tables
//! by reference at run start and on every spawn.

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use crate::constants::LANE_COUNT;
use crate::enums::{EnemyKind, GameMode};

/// Per-kind base stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyStats {
    pub base_hp: u32,
    pub score: u32,
    /// Divides the visible window along with the level multiplier.
    pub speed_mod: f64,
}

impl EnemyKind {
    /// Exhaustive stat lookup.
    pub fn stats(&self) -> EnemyStats {
        match self {
            Self::Slime => EnemyStats {
                base_hp: 1,
                score: 50,
                speed_mod: 1.0,
            },
            Self::Bat => EnemyStats {
                base_hp: 1,
                score: 100,
                speed_mod: 0.7,
            },
            Self::Bear => EnemyStats {
                base_hp: 4,
                score: 200,
                speed_mod: 1.5,
            },
            Self::Ghost => EnemyStats {
                base_hp: 2,
                score: 150,
                speed_mod: 1.2,
            },
        }
    }
}

/// Immutable level definition.
#[derive(Debug, Clone, Serialize)]
pub struct LevelDescriptor {
    pub id: u32,
    pub name: &'static str,
    /// Kills needed to clear the level. `None` for the endless level.
    pub required_kills: Option<u32>,
    /// Baseline delay between spawn attempts (ms).
    pub spawn_interval_ms: u64,
    /// Divides every enemy's visible window.
    pub speed_multiplier: f64,
    pub allowed: &'static [EnemyKind],
    /// Presentation hint, opaque to the simulation.
    pub backdrop: &'static str,
}

/// Level id used for the endless run.
pub const ENDLESS_LEVEL_ID: u32 = 999;

pub static CAMPAIGN_LEVELS: [LevelDescriptor; 5] = [
    LevelDescriptor {
        id: 1,
        name: "Sunny Meadow",
        required_kills: Some(10),
        spawn_interval_ms: 2000,
        speed_multiplier: 1.0,
        allowed: &[EnemyKind::Slime],
        backdrop: "sky",
    },
    LevelDescriptor {
        id: 2,
        name: "Twilight Hill",
        required_kills: Some(15),
        spawn_interval_ms: 1800,
        speed_multiplier: 1.2,
        allowed: &[EnemyKind::Slime, EnemyKind::Bat],
        backdrop: "indigo",
    },
    LevelDescriptor {
        id: 3,
        name: "Misty Ruins",
        required_kills: Some(20),
        spawn_interval_ms: 1500,
        speed_multiplier: 1.4,
        allowed: &[EnemyKind::Slime, EnemyKind::Bat, EnemyKind::Ghost],
        backdrop: "slate",
    },
    LevelDescriptor {
        id: 4,
        name: "Candy Fort",
        required_kills: Some(25),
        spawn_interval_ms: 1300,
        speed_multiplier: 1.6,
        allowed: &[EnemyKind::Slime, EnemyKind::Bear, EnemyKind::Ghost],
        backdrop: "rose",
    },
    LevelDescriptor {
        id: 5,
        name: "Void Edge",
        required_kills: Some(40),
        spawn_interval_ms: 1000,
        speed_multiplier: 2.0,
        allowed: &[
            EnemyKind::Slime,
            EnemyKind::Bat,
            EnemyKind::Bear,
            EnemyKind::Ghost,
        ],
        backdrop: "purple",
    },
];

pub static ENDLESS_LEVEL: LevelDescriptor = LevelDescriptor {
    id: ENDLESS_LEVEL_ID,
    name: "Endless Defense",
    required_kills: None,
    spawn_interval_ms: 2000,
    speed_multiplier: 1.0,
    allowed: &[
        EnemyKind::Slime,
        EnemyKind::Bat,
        EnemyKind::Bear,
        EnemyKind::Ghost,
    ],
    backdrop: "fuchsia",
};

/// Look up a campaign level by id.
pub fn campaign_level(id: u32) -> Option<&'static LevelDescriptor> {
    CAMPAIGN_LEVELS.iter().find(|level| level.id == id)
}

/// Resolve the level a run plays. Endless mode ignores `id`.
pub fn level_for(mode: GameMode, id: u32) -> Option<&'static LevelDescriptor> {
    match mode {
        GameMode::Campaign => campaign_level(id),
        GameMode::Endless => Some(&ENDLESS_LEVEL),
    }
}

/// Id of the campaign level after `id`, if there is one.
pub fn next_campaign_level(id: u32) -> Option<u32> {
    campaign_level(id + 1).map(|level| level.id)
}

/// Screen placement of one lane, in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaneAnchor {
    pub lane: u8,
    /// (x, y) as fractions of the play field.
    pub anchor: Vec2,
    /// Depth scale applied to the enemy sprite and its cover.
    pub scale: f32,
}

pub const LANES: [LaneAnchor; LANE_COUNT as usize] = [
    LaneAnchor {
        lane: 0,
        anchor: Vec2::new(0.15, 0.40),
        scale: 0.70,
    },
    LaneAnchor {
        lane: 1,
        anchor: Vec2::new(0.35, 0.38),
        scale: 0.65,
    },
    LaneAnchor {
        lane: 2,
        anchor: Vec2::new(0.60, 0.42),
        scale: 0.75,
    },
    LaneAnchor {
        lane: 3,
        anchor: Vec2::new(0.85, 0.45),
        scale: 0.80,
    },
];

/// Catalog integrity violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("level {0} allows no enemy kinds")]
    EmptyRoster(u32),
    #[error("level {0} has a non-positive speed multiplier")]
    BadSpeedMultiplier(u32),
    #[error("level {0} has a zero spawn interval")]
    ZeroSpawnInterval(u32),
    #[error("campaign level at index {index} has id {id}, expected {expected}")]
    NonContiguousId { index: usize, id: u32, expected: u32 },
    #[error("campaign level {0} has no kill target")]
    MissingKillTarget(u32),
    #[error("enemy kind {0} has zero hit points or a non-positive speed modifier")]
    BadEnemyStats(&'static str),
    #[error("lane table entry {index} is for lane {lane}")]
    LaneMismatch { index: usize, lane: u8 },
}

/// Check the static tables. Called once by the engine in debug builds.
pub fn validate_catalog() -> Result<(), CatalogError> {
    for kind in EnemyKind::ALL {
        let stats = kind.stats();
        if stats.base_hp == 0 || stats.speed_mod <= 0.0 {
            return Err(CatalogError::BadEnemyStats(kind.as_str()));
        }
    }

    for (index, level) in CAMPAIGN_LEVELS.iter().enumerate() {
        let expected = index as u32 + 1;
        if level.id != expected {
            return Err(CatalogError::NonContiguousId {
                index,
                id: level.id,
                expected,
            });
        }
        if level.required_kills.is_none() {
            return Err(CatalogError::MissingKillTarget(level.id));
        }
        validate_level(level)?;
    }
    validate_level(&ENDLESS_LEVEL)?;

    for (index, lane) in LANES.iter().enumerate() {
        if lane.lane as usize != index {
            return Err(CatalogError::LaneMismatch {
                index,
                lane: lane.lane,
            });
        }
    }
    Ok(())
}

fn validate_level(level: &LevelDescriptor) -> Result<(), CatalogError> {
    if level.allowed.is_empty() {
        return Err(CatalogError::EmptyRoster(level.id));
    }
    if level.speed_multiplier <= 0.0 {
        return Err(CatalogError::BadSpeedMultiplier(level.id));
    }
    if level.spawn_interval_ms == 0 {
        return Err(CatalogError::ZeroSpawnInterval(level.id));
    }
    Ok(())
}
