//! Spawn scheduler: decides what to spawn into which lane and when to try again.
//!
//! Invoked by the engine's spawn timer. Produces at most one enemy per call.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use gunner_core::catalog::LevelDescriptor;
use gunner_core::components::Enemy;
use gunner_core::constants::*;
use gunner_core::enums::{EnemyKind, EnemyState, GameMode};

use crate::run_state::RunState;

/// Lane occupancy, indexed by lane.
pub type LaneOccupancy = [bool; LANE_COUNT as usize];

/// A new enemy to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    pub lane: u8,
    pub kind: EnemyKind,
    pub hp: u32,
    pub duration_ms: f64,
}

/// Result of one scheduler invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnDecision {
    /// `None` when the rolled lane was occupied.
    pub spawn: Option<EnemySpawn>,
    /// Delay until the next invocation (ms).
    pub next_delay_ms: u64,
}

/// Roll one spawn attempt.
pub fn roll(
    level: &LevelDescriptor,
    mode: GameMode,
    kills: u32,
    occupied: &LaneOccupancy,
    rng: &mut ChaCha8Rng,
) -> SpawnDecision {
    let next_delay_ms = next_spawn_delay_ms(level, mode, kills);

    let lane = rng.gen_range(0..LANE_COUNT);
    if occupied[lane as usize] {
        return SpawnDecision {
            spawn: None,
            next_delay_ms,
        };
    }

    let kind = level.allowed[rng.gen_range(0..level.allowed.len())];
    let base_window = rng.gen_range(VISIBLE_WINDOW_MIN_MS..VISIBLE_WINDOW_MAX_MS);

    SpawnDecision {
        spawn: Some(EnemySpawn {
            lane,
            kind,
            hp: starting_hp(kind, mode, kills),
            duration_ms: visible_window_ms(base_window, level, kind, mode, kills),
        }),
        next_delay_ms,
    }
}

/// Starting hp. Endless runs past the kill threshold spawn tougher enemies.
pub fn starting_hp(kind: EnemyKind, mode: GameMode, kills: u32) -> u32 {
    let base = kind.stats().base_hp;
    if mode == GameMode::Endless && kills > ENDLESS_HP_KILL_THRESHOLD {
        (f64::from(base) * ENDLESS_HP_MULTIPLIER).ceil() as u32
    } else {
        base
    }
}

/// Visible window for a freshly rolled `base_window_ms`.
pub fn visible_window_ms(
    base_window_ms: f64,
    level: &LevelDescriptor,
    kind: EnemyKind,
    mode: GameMode,
    kills: u32,
) -> f64 {
    let acceleration = match mode {
        GameMode::Endless => 1.0 + f64::from(kills) * ENDLESS_SPEED_RAMP_PER_KILL,
        GameMode::Campaign => 1.0,
    };
    let divisor = level.speed_multiplier * kind.stats().speed_mod * acceleration;
    (base_window_ms / divisor).max(MIN_VISIBLE_WINDOW_MS)
}

/// Delay until the next spawn attempt.
pub fn next_spawn_delay_ms(level: &LevelDescriptor, mode: GameMode, kills: u32) -> u64 {
    let endurance = match mode {
        GameMode::Endless => 1.0 + f64::from(kills) * ENDLESS_SPAWN_RAMP_PER_KILL,
        GameMode::Campaign => 1.0,
    };
    let delay = (level.spawn_interval_ms as f64 / endurance) as u64;
    delay.max(MIN_SPAWN_DELAY_MS)
}

/// Lanes currently held by a non-terminal enemy.
pub fn occupied_lanes(world: &World) -> LaneOccupancy {
    let mut occupied = [false; LANE_COUNT as usize];
    for (_entity, enemy) in world.query::<&Enemy>().iter() {
        if !enemy.state.is_terminal() {
            occupied[enemy.lane as usize] = true;
        }
    }
    occupied
}

/// Run one scheduler invocation against the world. Returns the delay until
/// the next invocation.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_enemy_id: &mut u32,
    run: &RunState,
    now_ms: u64,
) -> u64 {
    let occupied = occupied_lanes(world);
    let decision = roll(run.level, run.mode, run.kills, &occupied, rng);

    match decision.spawn {
        Some(spawn) => {
            let id = *next_enemy_id;
            *next_enemy_id += 1;
            debug!(
                id,
                lane = spawn.lane,
                kind = spawn.kind.as_str(),
                hp = spawn.hp,
                window_ms = spawn.duration_ms,
                "enemy spawned"
            );
            world.spawn((Enemy {
                id,
                lane: spawn.lane,
                kind: spawn.kind,
                hp: spawn.hp,
                max_hp: spawn.hp,
                appear_ms: now_ms,
                duration_ms: spawn.duration_ms,
                state: EnemyState::Appearing,
            },));
        }
        None => trace!("spawn dropped, lane occupied"),
    }

    decision.next_delay_ms
}
