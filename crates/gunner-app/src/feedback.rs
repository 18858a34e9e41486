//! Feedback sink that turns simulation events into log lines.
//!
//! Stands in for the audio layer when running headless.

use tracing::{debug, info, trace};

use gunner_core::events::{FeedbackEvent, FeedbackSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl FeedbackSink for TracingSink {
    fn notify(&mut self, event: &FeedbackEvent) {
        match event {
            FeedbackEvent::Shoot { heavy } => trace!(heavy, "bang"),
            FeedbackEvent::Hit { enemy_id } => trace!(enemy_id, "hit"),
            FeedbackEvent::Kill { enemy_id, kind } => {
                debug!(enemy_id, kind = kind.as_str(), "kill")
            }
            FeedbackEvent::PlayerDamage { amount } => info!(amount, "player hurt"),
            FeedbackEvent::ReloadStart => trace!("reloading"),
            FeedbackEvent::ReloadEnd => trace!("reloaded"),
            FeedbackEvent::Upgrade { track } => info!(track = track.as_str(), "upgrade"),
            FeedbackEvent::UiAction => trace!("click"),
        }
    }
}
