//! Persistent player profile and the Save Store contract.
//!
//! The simulation only touches the profile at run boundaries (start, victory,
//! defeat). Storage format is up to the implementation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::UpgradeTrack;
use crate::types::Loadout;

/// Upgrade level per track. Every track starts at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub damage: u32,
    pub capacity: u32,
    pub reload_speed: u32,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            damage: 1,
            capacity: 1,
            reload_speed: 1,
        }
    }
}

impl UpgradeLevels {
    pub fn level_for(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Damage => self.damage,
            UpgradeTrack::Capacity => self.capacity,
            UpgradeTrack::ReloadSpeed => self.reload_speed,
        }
    }

    pub fn set_level(&mut self, track: UpgradeTrack, level: u32) {
        match track {
            UpgradeTrack::Damage => self.damage = level,
            UpgradeTrack::Capacity => self.capacity = level,
            UpgradeTrack::ReloadSpeed => self.reload_speed = level,
        }
    }

    /// Weapon stats for these upgrade levels.
    pub fn loadout(&self) -> Loadout {
        let capacity_steps = self.capacity.saturating_sub(1);
        let reload_steps = u64::from(self.reload_speed.saturating_sub(1));
        Loadout {
            max_ammo: BASE_AMMO + capacity_steps * AMMO_PER_CAPACITY_LEVEL,
            reload_ms: BASE_RELOAD_MS
                .saturating_sub(reload_steps * RELOAD_MS_PER_LEVEL)
                .max(MIN_RELOAD_MS),
            damage: BASE_DAMAGE + self.damage.saturating_sub(1),
        }
    }
}

/// Everything that survives between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Highest campaign level the player may start (1-based).
    pub unlocked_levels: u32,
    pub high_score_endless: u32,
    pub total_currency: u32,
    pub upgrades: UpgradeLevels,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            unlocked_levels: 1,
            high_score_endless: 0,
            total_currency: 0,
            upgrades: UpgradeLevels::default(),
        }
    }
}

impl Profile {
    pub fn is_level_unlocked(&self, level_id: u32) -> bool {
        level_id >= 1 && level_id <= self.unlocked_levels
    }
}

/// Save Store failures.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistent profile storage.
///
/// Implementors provide `load` and `save`; the run-boundary operations are
/// built on top of them as read-modify-write cycles.
pub trait SaveStore {
    /// Read the stored profile. Read failures yield `Profile::default()`.
    fn load(&self) -> Profile;

    /// Replace the stored profile.
    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError>;

    /// Raise the unlock watermark past `level_id` if it is the current frontier.
    fn record_level_cleared(&mut self, level_id: u32) -> Result<(), ProfileError> {
        let mut profile = self.load();
        if level_id >= profile.unlocked_levels {
            profile.unlocked_levels = level_id + 1;
            self.save(&profile)?;
        }
        Ok(())
    }

    /// Store `score` as the endless best if it beats the current one.
    /// Returns whether it was a new best.
    fn record_endless_score(&mut self, score: u32) -> Result<bool, ProfileError> {
        let mut profile = self.load();
        if score > profile.high_score_endless {
            profile.high_score_endless = score;
            self.save(&profile)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn add_currency(&mut self, amount: u32) -> Result<(), ProfileError> {
        let mut profile = self.load();
        profile.total_currency = profile.total_currency.saturating_add(amount);
        self.save(&profile)
    }

    /// Spend `cost` to raise `track` by one level. Returns `false` without
    /// touching the profile when the player cannot afford it.
    fn purchase_upgrade(&mut self, track: UpgradeTrack, cost: u32) -> Result<bool, ProfileError> {
        let mut profile = self.load();
        if profile.total_currency < cost {
            return Ok(false);
        }
        profile.total_currency -= cost;
        let level = profile.upgrades.level_for(track);
        profile.upgrades.set_level(track, level + 1);
        self.save(&profile)?;
        Ok(true)
    }
}

/// In-memory store. Used by tests and by runs with no save file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Profile,
}

impl MemoryStore {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Profile {
        self.profile.clone()
    }

    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError> {
        self.profile = profile.clone();
        Ok(())
    }
}

/// Shared handles are stores too, so a caller can keep reading the profile
/// while an engine owns the other end.
impl<S: SaveStore> SaveStore for std::sync::Arc<std::sync::Mutex<S>> {
    fn load(&self) -> Profile {
        match self.lock() {
            Ok(store) => store.load(),
            Err(poisoned) => poisoned.into_inner().load(),
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError> {
        match self.lock() {
            Ok(mut store) => store.save(profile),
            Err(poisoned) => poisoned.into_inner().save(profile),
        }
    }
}
