//! Cleanup system: removes enemies that retreated or finished dying.

use hecs::{Entity, World};

use gunner_core::components::Enemy;
use gunner_core::constants::DYING_MS;
use gunner_core::enums::EnemyState;

/// Despawn hiding enemies and dying enemies past their grace period.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
/// Returns the number of enemies removed.
pub fn run(world: &mut World, now_ms: u64, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, enemy) in world.query_mut::<&Enemy>() {
        let expired = match enemy.state {
            EnemyState::Hiding => true,
            EnemyState::Dying => now_ms.saturating_sub(enemy.appear_ms) >= DYING_MS,
            _ => false,
        };
        if expired {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
