//! Enemy lifecycle state machine.
//!
//! `evaluate` is a pure transition function on plain data; `run` applies it to
//! every enemy in the world against a single `now` and sums the health loss.

use hecs::World;

use gunner_core::components::Enemy;
use gunner_core::constants::{APPEAR_MS, ATTACK_MS};
use gunner_core::enums::EnemyState;

/// What happens to one enemy this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStep {
    Stay,
    Advance {
        to: EnemyState,
        /// Restart the state timer at `now`.
        reset_clock: bool,
        /// Health the player loses from this transition.
        damage: u32,
    },
}

/// Aggregate result of one lifecycle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleOutcome {
    pub health_loss: u32,
    pub transitions: u32,
}

/// Evaluate one enemy. Dying and hiding enemies never transition here;
/// removal is the cleanup system's job.
pub fn evaluate(enemy: &Enemy, now_ms: u64) -> LifecycleStep {
    let elapsed = now_ms.saturating_sub(enemy.appear_ms);

    match enemy.state {
        EnemyState::Appearing if elapsed > APPEAR_MS => LifecycleStep::Advance {
            to: EnemyState::Visible,
            reset_clock: false,
            damage: 0,
        },
        EnemyState::Visible if elapsed as f64 > enemy.duration_ms => LifecycleStep::Advance {
            to: EnemyState::Attacking,
            reset_clock: true,
            damage: 0,
        },
        EnemyState::Attacking if elapsed > ATTACK_MS => LifecycleStep::Advance {
            to: EnemyState::Hiding,
            reset_clock: false,
            damage: 1,
        },
        _ => LifecycleStep::Stay,
    }
}

/// Advance every enemy one step. Health loss is returned, not applied.
pub fn run(world: &mut World, now_ms: u64) -> LifecycleOutcome {
    let mut outcome = LifecycleOutcome::default();

    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        if let LifecycleStep::Advance {
            to,
            reset_clock,
            damage,
        } = evaluate(enemy, now_ms)
        {
            enemy.state = to;
            if reset_clock {
                enemy.appear_ms = now_ms;
            }
            outcome.health_loss += damage;
            outcome.transitions += 1;
        }
    }

    outcome
}
