//! Hit resolution: applies player damage to one enemy.
//!
//! Only decides what happens to the enemy. Ammo, reload and run-liveness
//! gating plus score bookkeeping are done by the engine.

use hecs::World;

use gunner_core::components::Enemy;
use gunner_core::constants::CURRENCY_DIVISOR;
use gunner_core::enums::{EnemyKind, EnemyState};

/// Result of a hit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// No such enemy, or it could not be targeted. Nothing changed.
    Rejected,
    /// Enemy survived with `hp` left.
    Wounded { enemy_id: u32, hp: u32 },
    /// Enemy is now dying.
    Killed {
        enemy_id: u32,
        kind: EnemyKind,
        score: u32,
        currency: u32,
    },
}

/// Apply `damage` to enemy `enemy_id` at `now_ms`.
pub fn resolve(world: &mut World, enemy_id: u32, damage: u32, now_ms: u64) -> HitOutcome {
    let Some((_entity, enemy)) = world
        .query_mut::<&mut Enemy>()
        .into_iter()
        .find(|(_, enemy)| enemy.id == enemy_id)
    else {
        return HitOutcome::Rejected;
    };

    if !enemy.state.is_targetable() {
        return HitOutcome::Rejected;
    }

    // Zero damage would leave hp unchanged, so every valid hit takes at least one.
    let remaining = enemy.hp.saturating_sub(damage.max(1));
    if remaining > 0 {
        enemy.hp = remaining;
        return HitOutcome::Wounded {
            enemy_id,
            hp: remaining,
        };
    }

    enemy.hp = 0;
    enemy.state = EnemyState::Dying;
    enemy.appear_ms = now_ms;

    let score = enemy.kind.stats().score;
    HitOutcome::Killed {
        enemy_id,
        kind: enemy.kind,
        score,
        currency: score / CURRENCY_DIVISOR,
    }
}
