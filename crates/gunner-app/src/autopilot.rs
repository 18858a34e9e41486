//! Autopilot: a seeded bot player for unattended runs.
//!
//! Reads a snapshot, fires at targetable enemies with a fixed hit
//! probability, and reloads when the magazine runs dry.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use gunner_core::commands::PlayerCommand;
use gunner_core::enums::RunPhase;
use gunner_core::state::RunSnapshot;
use gunner_sim::EncounterEngine;

pub struct Autopilot {
    rng: ChaCha8Rng,
    /// Probability that a shot lands on its target.
    accuracy: f64,
}

impl Autopilot {
    pub fn new(seed: u64, accuracy: f64) -> Self {
        let accuracy = if accuracy.is_finite() {
            accuracy.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            accuracy,
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Commands for the next tick.
    pub fn decide(&mut self, snapshot: &RunSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != RunPhase::Running || snapshot.stats.reloading {
            return Vec::new();
        }
        if snapshot.stats.ammo == 0 {
            return vec![PlayerCommand::Reload];
        }

        let mut rounds = snapshot.stats.ammo;
        let mut commands = Vec::new();
        for enemy in snapshot.enemies.iter().filter(|e| e.state.is_targetable()) {
            if rounds == 0 {
                break;
            }
            rounds -= 1;
            let target = self.rng.gen_bool(self.accuracy).then_some(enemy.id);
            commands.push(PlayerCommand::Shoot {
                target,
                on_ui_control: false,
            });
        }
        commands
    }
}

/// Drive `engine` with `pilot` until the run ends or `max_frames` elapse.
/// Returns the last snapshot.
pub fn drive(engine: &mut EncounterEngine, pilot: &mut Autopilot, max_frames: u64) -> RunSnapshot {
    let mut snapshot = engine.tick();
    for _ in 1..max_frames {
        if matches!(snapshot.phase, RunPhase::Victory | RunPhase::Defeat) {
            break;
        }
        engine.queue_commands(pilot.decide(&snapshot));
        snapshot = engine.tick();
    }
    info!(
        phase = ?snapshot.phase,
        score = snapshot.stats.score,
        kills = snapshot.stats.kills,
        elapsed_ms = snapshot.time.elapsed_ms,
        "autopilot finished"
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use gunner_core::enums::{EnemyKind, EnemyState, GameMode};
    use gunner_core::state::{EnemyView, RunStatsView};

    fn running(ammo: u32, enemies: Vec<EnemyView>) -> RunSnapshot {
        RunSnapshot {
            phase: RunPhase::Running,
            mode: GameMode::Campaign,
            stats: RunStatsView {
                ammo,
                max_ammo: 12,
                health: 3,
                max_health: 3,
                ..Default::default()
            },
            enemies,
            ..Default::default()
        }
    }

    fn enemy(id: u32, lane: u8, state: EnemyState) -> EnemyView {
        EnemyView {
            id,
            lane,
            kind: EnemyKind::Slime,
            hp: 1,
            max_hp: 1,
            state,
        }
    }

    #[test]
    fn test_perfect_aim_targets_every_live_enemy() {
        let mut pilot = Autopilot::new(1, 1.0);
        let snapshot = running(
            12,
            vec![
                enemy(0, 0, EnemyState::Visible),
                enemy(1, 1, EnemyState::Attacking),
                enemy(2, 2, EnemyState::Appearing),
                enemy(3, 3, EnemyState::Dying),
            ],
        );
        let commands = pilot.decide(&snapshot);
        let targets: Vec<Option<u32>> = commands
            .iter()
            .map(|cmd| match cmd {
                PlayerCommand::Shoot { target, .. } => *target,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(targets, vec![Some(0), Some(2)]);
    }

    #[test]
    fn test_zero_accuracy_misses() {
        let mut pilot = Autopilot::new(1, 0.0);
        let commands = pilot.decide(&running(12, vec![enemy(5, 0, EnemyState::Visible)]));
        assert!(matches!(
            commands.as_slice(),
            [PlayerCommand::Shoot { target: None, .. }]
        ));
    }

    #[test]
    fn test_reloads_when_empty() {
        let mut pilot = Autopilot::new(1, 1.0);
        let commands = pilot.decide(&running(0, vec![enemy(0, 0, EnemyState::Visible)]));
        assert!(matches!(commands.as_slice(), [PlayerCommand::Reload]));
    }

    #[test]
    fn test_never_fires_more_than_loaded() {
        let mut pilot = Autopilot::new(1, 1.0);
        let snapshot = running(
            2,
            (0..4).map(|i| enemy(i, i as u8, EnemyState::Visible)).collect(),
        );
        assert_eq!(pilot.decide(&snapshot).len(), 2);
    }

    #[test]
    fn test_idle_when_not_running() {
        let mut pilot = Autopilot::new(1, 1.0);
        let mut snapshot = running(12, vec![enemy(0, 0, EnemyState::Visible)]);
        snapshot.phase = RunPhase::Victory;
        assert!(pilot.decide(&snapshot).is_empty());
    }

    #[test]
    fn test_accuracy_clamped() {
        assert_eq!(Autopilot::new(0, 3.0).accuracy(), 1.0);
        assert_eq!(Autopilot::new(0, -1.0).accuracy(), 0.0);
        assert_eq!(Autopilot::new(0, f64::NAN).accuracy(), 0.0);
    }
}
