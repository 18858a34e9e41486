//! Feedback events emitted by the simulation for audio and UI effects.
//!
//! Events never feed back into simulation state.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, UpgradeTrack};

/// Fire-and-forget notifications for the audio/effects layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackEvent {
    /// A round was fired. `heavy` when damage is upgraded past the base.
    Shoot { heavy: bool },
    /// An enemy took damage and survived.
    Hit { enemy_id: u32 },
    /// An enemy was killed.
    Kill { enemy_id: u32, kind: EnemyKind },
    /// The player lost health this tick.
    PlayerDamage { amount: u32 },
    ReloadStart,
    ReloadEnd,
    /// An upgrade was purchased in the shop.
    Upgrade { track: UpgradeTrack },
    /// A menu control was used.
    UiAction,
}

/// Receives feedback events as they happen. Implementations may do nothing.
pub trait FeedbackSink {
    fn notify(&mut self, event: &FeedbackEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FeedbackSink for NullSink {
    fn notify(&mut self, _event: &FeedbackEvent) {}
}
