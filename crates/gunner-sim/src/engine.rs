//! Encounter engine, the core of the game.
//!
//! `EncounterEngine` owns the hecs world of enemies, the run state, the timer
//! queue and the RNG. It processes player commands, runs all systems and
//! produces `RunSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use gunner_core::catalog::{self, LevelDescriptor};
use gunner_core::commands::PlayerCommand;
use gunner_core::constants::{BASE_DAMAGE, FRAME_MS, VICTORY_DELAY_MS};
use gunner_core::enums::{GameMode, RunPhase};
use gunner_core::events::{FeedbackEvent, FeedbackSink, NullSink};
use gunner_core::profile::{Profile, SaveStore};
use gunner_core::state::RunSnapshot;
use gunner_core::types::SimTime;

use crate::run_state::RunState;
use crate::systems;
use crate::systems::hit_resolution::HitOutcome;
use crate::timers::{TimerKind, TimerQueue};

/// Configuration for a new engine.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Simulated milliseconds per `tick()`.
    pub frame_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_ms: FRAME_MS,
        }
    }
}

/// Reasons a run cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncounterError {
    #[error("no campaign level with id {0}")]
    UnknownLevel(u32),
    #[error("level {level} is locked (unlocked up to {unlocked})")]
    LevelLocked { level: u32, unlocked: u32 },
}

/// The encounter engine. Sole owner of enemies and run state.
pub struct EncounterEngine {
    world: World,
    time: SimTime,
    frame_ms: u64,
    rng: ChaCha8Rng,
    run: RunState,
    /// Bumped whenever a run starts, stops or ends.
    generation: u64,
    timers: TimerQueue,
    next_enemy_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<FeedbackEvent>,
    store: Box<dyn SaveStore + Send>,
    sink: Box<dyn FeedbackSink + Send>,
}

impl EncounterEngine {
    /// Create an engine that reads and banks progress through `store`.
    pub fn new(config: SimConfig, store: impl SaveStore + Send + 'static) -> Self {
        debug_assert!(
            catalog::validate_catalog().is_ok(),
            "static catalog failed validation: {:?}",
            catalog::validate_catalog()
        );

        Self {
            world: World::new(),
            time: SimTime::default(),
            frame_ms: config.frame_ms.max(1),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            run: RunState::default(),
            generation: 0,
            timers: TimerQueue::new(),
            next_enemy_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            store: Box::new(store),
            sink: Box::new(NullSink),
        }
    }

    /// Forward feedback events to `sink` as they happen.
    pub fn with_sink(mut self, sink: impl FeedbackSink + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame and return the resulting snapshot.
    pub fn tick(&mut self) -> RunSnapshot {
        self.tick_for(self.frame_ms)
    }

    /// Advance by `dt_ms` and return the resulting snapshot.
    ///
    /// Every comparison inside one call uses the same `now`.
    pub fn tick_for(&mut self, dt_ms: u64) -> RunSnapshot {
        self.process_commands();

        if self.run.phase == RunPhase::Running {
            self.time.advance(dt_ms);
            self.fire_timers();
            if self.run.phase == RunPhase::Running {
                self.run_systems();
            }
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.run, events)
    }

    /// Current snapshot without advancing time. Pending events are included
    /// but not drained.
    pub fn snapshot(&self) -> RunSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, &self.run, self.events.clone())
    }

    pub fn phase(&self) -> RunPhase {
        self.run.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn level(&self) -> &'static LevelDescriptor {
        self.run.level
    }

    /// Pending timers (read-only).
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current persistent profile, as the store reports it.
    pub fn profile(&self) -> Profile {
        self.store.load()
    }

    // --- Commands ---

    /// Begin a new run, replacing whatever was running.
    pub fn start(&mut self, mode: GameMode, level_id: u32) -> Result<(), EncounterError> {
        let level =
            catalog::level_for(mode, level_id).ok_or(EncounterError::UnknownLevel(level_id))?;
        let profile = self.store.load();
        if mode == GameMode::Campaign && !profile.is_level_unlocked(level.id) {
            return Err(EncounterError::LevelLocked {
                level: level.id,
                unlocked: profile.unlocked_levels,
            });
        }

        self.cancel_pending();
        self.world.clear();
        self.time = SimTime::default();

        let high_score = match mode {
            GameMode::Endless => profile.high_score_endless,
            GameMode::Campaign => 0,
        };
        self.run = RunState::start(mode, level, profile.upgrades.loadout(), high_score);

        // First spawn is due immediately.
        self.timers.arm(TimerKind::Spawn, 0, self.generation);
        self.emit(FeedbackEvent::UiAction);

        info!(
            ?mode,
            level = level.id,
            name = level.name,
            generation = self.generation,
            max_ammo = self.run.loadout.max_ammo,
            damage = self.run.loadout.damage,
            "run started"
        );
        Ok(())
    }

    /// Abandon the run. Every pending timer is cancelled and unbanked currency
    /// is discarded, unless the kill target was already reached: that clear
    /// is saved before leaving.
    pub fn stop(&mut self) {
        if self.run.phase == RunPhase::Idle {
            return;
        }
        if self.run.victory_pending {
            self.persist_clear();
        }
        self.cancel_pending();
        self.run.phase = RunPhase::Idle;
        self.run.reloading = false;
        self.run.victory_pending = false;
        info!(generation = self.generation, "run stopped");
    }

    /// Pull the trigger, optionally at an enemy.
    ///
    /// Rejected once the run stops being live, while reloading, or when the
    /// click landed on a UI control.
    /// With an empty magazine the shot becomes a reload request.
    pub fn shoot(&mut self, target: Option<u32>, on_ui_control: bool) -> Option<HitOutcome> {
        if !self.run.is_live() || on_ui_control || self.run.reloading {
            trace!(on_ui_control, reloading = self.run.reloading, "shot rejected");
            return None;
        }
        if self.run.ammo == 0 {
            self.reload();
            return None;
        }

        self.run.ammo -= 1;
        self.emit(FeedbackEvent::Shoot {
            heavy: self.run.loadout.damage > BASE_DAMAGE,
        });

        target.map(|enemy_id| self.apply_hit(enemy_id))
    }

    /// Click directly on an enemy. Does not spend ammo, but needs some loaded.
    pub fn hit(&mut self, enemy_id: u32) -> HitOutcome {
        if !self.run.is_live() || self.run.reloading || self.run.ammo == 0 {
            trace!(enemy_id, "hit rejected");
            return HitOutcome::Rejected;
        }
        self.apply_hit(enemy_id)
    }

    /// Start reloading. No-op while a reload is in flight or the magazine is full.
    pub fn reload(&mut self) {
        if self.run.phase != RunPhase::Running
            || self.run.reloading
            || self.run.ammo >= self.run.loadout.max_ammo
        {
            return;
        }
        self.run.reloading = true;
        let due = self.time.elapsed_ms + self.run.loadout.reload_ms;
        self.timers.arm(TimerKind::ReloadComplete, due, self.generation);
        self.emit(FeedbackEvent::ReloadStart);
        debug!(due_ms = due, "reload started");
    }

    // --- Internals ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start { mode, level_id } => {
                if let Err(e) = self.start(mode, level_id) {
                    warn!(error = %e, "start rejected");
                }
            }
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Shoot {
                target,
                on_ui_control,
            } => {
                let _ = self.shoot(target, on_ui_control);
            }
            PlayerCommand::Hit { enemy_id } => {
                let _ = self.hit(enemy_id);
            }
            PlayerCommand::Reload => self.reload(),
        }
    }

    /// Fire every timer due at the current time.
    fn fire_timers(&mut self) {
        let now = self.time.elapsed_ms;
        while let Some(timer) = self.timers.pop_due(now) {
            if timer.generation != self.generation {
                debug!(
                    kind = ?timer.kind,
                    armed = timer.generation,
                    current = self.generation,
                    "stale timer discarded"
                );
                continue;
            }
            match timer.kind {
                TimerKind::Spawn => self.on_spawn_timer(now),
                TimerKind::ReloadComplete => self.on_reload_complete(),
                TimerKind::Victory => self.on_victory(),
            }
        }
    }

    fn on_spawn_timer(&mut self, now: u64) {
        if !self.run.is_live() {
            return;
        }
        let delay = systems::spawn_scheduler::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_enemy_id,
            &self.run,
            now,
        );
        self.timers.arm(TimerKind::Spawn, now + delay, self.generation);
    }

    fn on_reload_complete(&mut self) {
        if self.run.phase != RunPhase::Running || !self.run.reloading {
            return;
        }
        self.run.ammo = self.run.loadout.max_ammo;
        self.run.reloading = false;
        self.emit(FeedbackEvent::ReloadEnd);
        debug!(ammo = self.run.ammo, "reload complete");
    }

    fn on_victory(&mut self) {
        if self.run.phase != RunPhase::Running || !self.run.victory_pending {
            return;
        }
        self.run.phase = RunPhase::Victory;
        self.cancel_pending();
        self.persist_clear();
        info!(
            level_id = self.run.level.id,
            score = self.run.score,
            kills = self.run.kills,
            currency = self.run.currency,
            "level cleared"
        );
    }

    /// Run all per-tick systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_ms;

        // 1. Lifecycle. Frozen during the victory delay so a cleared level
        //    cannot be lost to enemies still on screen.
        let health_loss = if self.run.is_live() {
            systems::lifecycle::run(&mut self.world, now).health_loss
        } else {
            0
        };

        // 2. Cleanup (hiding and expired dying enemies).
        systems::cleanup::run(&mut self.world, now, &mut self.despawn_buffer);

        // 3. Health loss, applied once for the whole tick.
        if health_loss > 0 {
            self.apply_health_loss(health_loss);
        }
    }

    fn apply_hit(&mut self, enemy_id: u32) -> HitOutcome {
        let now = self.time.elapsed_ms;
        let outcome =
            systems::hit_resolution::resolve(&mut self.world, enemy_id, self.run.loadout.damage, now);

        match outcome {
            HitOutcome::Rejected => trace!(enemy_id, "hit on untargetable enemy"),
            HitOutcome::Wounded { enemy_id, .. } => {
                self.emit(FeedbackEvent::Hit { enemy_id });
            }
            HitOutcome::Killed {
                enemy_id,
                kind,
                score,
                currency,
            } => {
                self.emit(FeedbackEvent::Hit { enemy_id });
                self.emit(FeedbackEvent::Kill { enemy_id, kind });
                self.run.score += score;
                self.run.kills += 1;
                self.run.currency += currency;
                debug!(enemy_id, kills = self.run.kills, score = self.run.score, "enemy killed");

                if self.run.target_reached() {
                    self.run.victory_pending = true;
                    self.timers.cancel(TimerKind::Spawn);
                    let due = now + VICTORY_DELAY_MS;
                    self.timers.arm(TimerKind::Victory, due, self.generation);
                    info!(kills = self.run.kills, "kill target reached");
                }
            }
        }
        outcome
    }

    fn apply_health_loss(&mut self, amount: u32) {
        self.run.health = self.run.health.saturating_sub(amount);
        self.emit(FeedbackEvent::PlayerDamage { amount });
        debug!(amount, health = self.run.health, "player damaged");

        if self.run.health == 0 {
            self.on_defeat();
        }
    }

    fn on_defeat(&mut self) {
        self.run.phase = RunPhase::Defeat;
        self.run.reloading = false;
        self.run.victory_pending = false;
        self.cancel_pending();

        if self.run.mode == GameMode::Endless {
            match self.store.record_endless_score(self.run.score) {
                Ok(true) => info!(score = self.run.score, "new endless best"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "failed to record endless score"),
            }
        }
        self.bank_currency();
        info!(score = self.run.score, kills = self.run.kills, "run lost");
    }

    /// Save a reached kill target: unlock progress plus session currency.
    fn persist_clear(&mut self) {
        self.run.victory_pending = false;
        let level_id = self.run.level.id;
        if let Err(e) = self.store.record_level_cleared(level_id) {
            warn!(error = %e, level_id, "failed to record level progress");
        }
        self.bank_currency();
    }

    fn bank_currency(&mut self) {
        if let Err(e) = self.store.add_currency(self.run.currency) {
            warn!(error = %e, amount = self.run.currency, "failed to bank currency");
        }
    }

    /// Hard cancellation boundary: drop every pending timer and invalidate
    /// any that might still be referenced.
    fn cancel_pending(&mut self) {
        self.timers.clear();
        self.generation += 1;
    }

    fn emit(&mut self, event: FeedbackEvent) {
        self.sink.notify(&event);
        self.events.push(event);
    }

    // --- Test hooks ---

    /// Current run generation.
    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the spawn timer so tests control every enemy on the field.
    #[cfg(test)]
    pub fn halt_spawner(&mut self) {
        self.timers.cancel(TimerKind::Spawn);
    }

    /// Arm a timer under an arbitrary generation.
    #[cfg(test)]
    pub fn arm_timer(&mut self, kind: TimerKind, due_ms: u64, generation: u64) {
        self.timers.arm(kind, due_ms, generation);
    }

    /// Place an enemy directly, bypassing the scheduler's dice.
    /// Returns `None` if the lane is held.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        lane: u8,
        kind: gunner_core::enums::EnemyKind,
        duration_ms: f64,
    ) -> Option<u32> {
        use gunner_core::components::Enemy;
        use gunner_core::enums::EnemyState;

        if systems::spawn_scheduler::occupied_lanes(&self.world)[lane as usize] {
            return None;
        }
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        let hp = kind.stats().base_hp;
        self.world.spawn((Enemy {
            id,
            lane,
            kind,
            hp,
            max_hp: hp,
            appear_ms: self.time.elapsed_ms,
            duration_ms,
            state: EnemyState::Appearing,
        },));
        Some(id)
    }

    /// Overwrite the run's kill counter.
    #[cfg(test)]
    pub fn set_kills(&mut self, kills: u32) {
        self.run.kills = kills;
    }
}
