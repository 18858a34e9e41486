//! Upgrade shop and level-select queries.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, trace};

use gunner_core::catalog::{self, CAMPAIGN_LEVELS};
use gunner_core::constants::{UPGRADE_COSTS, UPGRADE_MAX_LEVEL};
use gunner_core::enums::UpgradeTrack;
use gunner_core::events::{FeedbackEvent, FeedbackSink};
use gunner_core::profile::{Profile, ProfileError, SaveStore};

/// Cost to raise a track from `current_level` to the next one.
/// Returns None if already at max level.
pub fn upgrade_cost(current_level: u32) -> Option<u32> {
    if current_level >= UPGRADE_MAX_LEVEL {
        return None;
    }
    UPGRADE_COSTS.get(current_level as usize).copied()
}

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("{} already at max level", .0.as_str())]
    MaxLevel(UpgradeTrack),
    #[error("insufficient currency: have {have}, need {need}")]
    Insufficient { have: u32, need: u32 },
    #[error(transparent)]
    Store(#[from] ProfileError),
}

/// One row of the shop screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopOffer {
    pub track: UpgradeTrack,
    pub level: u32,
    /// `None` at max level.
    pub cost: Option<u32>,
    pub affordable: bool,
}

pub fn offers(profile: &Profile) -> Vec<ShopOffer> {
    UpgradeTrack::ALL
        .into_iter()
        .map(|track| {
            let level = profile.upgrades.level_for(track);
            let cost = upgrade_cost(level);
            ShopOffer {
                track,
                level,
                cost,
                affordable: cost.is_some_and(|cost| profile.total_currency >= cost),
            }
        })
        .collect()
}

/// Buy the next level of `track`. Returns the amount spent.
pub fn purchase(
    store: &mut impl SaveStore,
    track: UpgradeTrack,
    sink: &mut impl FeedbackSink,
) -> Result<u32, ShopError> {
    let profile = store.load();
    let level = profile.upgrades.level_for(track);
    let cost = upgrade_cost(level).ok_or(ShopError::MaxLevel(track))?;
    let insufficient = ShopError::Insufficient {
        have: profile.total_currency,
        need: cost,
    };

    if profile.total_currency < cost || !store.purchase_upgrade(track, cost)? {
        trace!(track = track.as_str(), cost, "purchase declined");
        return Err(insufficient);
    }

    sink.notify(&FeedbackEvent::Upgrade { track });
    info!(track = track.as_str(), level = level + 1, cost, "upgrade purchased");
    Ok(cost)
}

/// One row of the level-select screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    pub id: u32,
    pub name: &'static str,
    pub required_kills: Option<u32>,
    pub unlocked: bool,
}

pub fn level_select(profile: &Profile) -> Vec<LevelEntry> {
    CAMPAIGN_LEVELS
        .iter()
        .map(|level| LevelEntry {
            id: level.id,
            name: level.name,
            required_kills: level.required_kills,
            unlocked: profile.is_level_unlocked(level.id),
        })
        .collect()
}

/// The level offered after clearing `cleared`, if it exists and is unlocked.
pub fn next_playable(profile: &Profile, cleared: u32) -> Option<u32> {
    catalog::next_campaign_level(cleared).filter(|&id| profile.is_level_unlocked(id))
}
