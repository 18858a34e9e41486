//! Snapshot system: queries the world and run state and builds a RunSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use gunner_core::components::Enemy;
use gunner_core::constants::MAX_PLAYER_HEALTH;
use gunner_core::events::FeedbackEvent;
use gunner_core::state::*;
use gunner_core::types::SimTime;

use crate::run_state::RunState;

/// Build a complete RunSnapshot.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    run: &RunState,
    events: Vec<FeedbackEvent>,
) -> RunSnapshot {
    RunSnapshot {
        time: *time,
        phase: run.phase,
        mode: run.mode,
        level: LevelView {
            id: run.level.id,
            name: run.level.name.to_string(),
            required_kills: run.level.required_kills,
        },
        stats: RunStatsView {
            score: run.score,
            high_score: run.high_score,
            kills: run.kills,
            health: run.health,
            max_health: MAX_PLAYER_HEALTH,
            ammo: run.ammo,
            max_ammo: run.loadout.max_ammo,
            reloading: run.reloading,
            currency: run.currency,
        },
        enemies: build_enemies(world),
        events,
    }
}

/// Enemy views ordered by id so snapshots are stable across runs.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<&Enemy>()
        .iter()
        .map(|(_, enemy)| EnemyView {
            id: enemy.id,
            lane: enemy.lane,
            kind: enemy.kind,
            hp: enemy.hp,
            max_hp: enemy.max_hp,
            state: enemy.state,
        })
        .collect();
    enemies.sort_by_key(|enemy| enemy.id);
    enemies
}
