//! Simulation constants and tuning parameters.

/// Nominal display refresh rate driving the tick (Hz).
pub const TICK_RATE: u32 = 60;

/// Simulated milliseconds per tick, rounded down from one tick of wall time.
///
/// The realtime loop sleeps a full 1/TICK_RATE second per tick, so the sim
/// clock trails the wall clock by the rounding (about 4% at 60 Hz).
pub const FRAME_MS: u64 = 1000 / TICK_RATE as u64;

// --- Lanes ---

/// Number of lanes enemies can occupy.
pub const LANE_COUNT: u8 = 4;

// --- Player ---

/// Player health at the start of every run.
pub const MAX_PLAYER_HEALTH: u32 = 3;

/// Magazine size before capacity upgrades.
pub const BASE_AMMO: u32 = 12;

/// Extra rounds per capacity upgrade level above 1.
pub const AMMO_PER_CAPACITY_LEVEL: u32 = 4;

/// Reload duration before reload-speed upgrades (ms).
pub const BASE_RELOAD_MS: u64 = 2000;

/// Reload time saved per reload-speed upgrade level above 1 (ms).
pub const RELOAD_MS_PER_LEVEL: u64 = 300;

/// Reload duration never drops below this (ms).
pub const MIN_RELOAD_MS: u64 = 500;

/// Damage per hit before damage upgrades.
pub const BASE_DAMAGE: u32 = 1;

// --- Enemy lifecycle ---

/// Time an enemy spends rising out of cover before it can time out (ms).
pub const APPEAR_MS: u64 = 300;

/// Wind-up between an enemy starting its attack and the hit landing (ms).
pub const ATTACK_MS: u64 = 500;

/// Grace period a killed enemy stays on screen before removal (ms).
pub const DYING_MS: u64 = 300;

// --- Spawning ---

/// Lower bound of the randomized visible window (ms).
pub const VISIBLE_WINDOW_MIN_MS: f64 = 2000.0;

/// Upper bound (exclusive) of the randomized visible window (ms).
pub const VISIBLE_WINDOW_MAX_MS: f64 = 4000.0;

/// Visible window floor so late endless waves stay hittable (ms).
pub const MIN_VISIBLE_WINDOW_MS: f64 = 350.0;

/// Spawn delay floor (ms).
pub const MIN_SPAWN_DELAY_MS: u64 = 500;

/// Endless: spawn rate speeds up by this fraction per kill.
pub const ENDLESS_SPAWN_RAMP_PER_KILL: f64 = 0.1;

/// Endless: visible windows shrink by this fraction per kill.
pub const ENDLESS_SPEED_RAMP_PER_KILL: f64 = 0.05;

/// Endless: kill count after which new enemies spawn tougher.
pub const ENDLESS_HP_KILL_THRESHOLD: u32 = 20;

/// Endless: starting hp multiplier once past the threshold.
pub const ENDLESS_HP_MULTIPLIER: f64 = 1.5;

// --- Run outcome ---

/// Delay between the final campaign kill and the victory screen (ms).
pub const VICTORY_DELAY_MS: u64 = 500;

/// Currency earned per kill is the enemy score divided by this.
pub const CURRENCY_DIVISOR: u32 = 10;

// --- Economy ---

/// Cost to buy the next upgrade level, indexed by the current level.
pub const UPGRADE_COSTS: [u32; 6] = [0, 500, 1500, 3000, 5000, 9999];

/// Highest level any upgrade track can reach.
pub const UPGRADE_MAX_LEVEL: u32 = 5;
