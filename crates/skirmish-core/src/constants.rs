//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena bounds ---

/// Minimum arena size (tiles per side).
pub const ARENA_SIZE_MIN: u32 = 6;

/// Maximum arena size (tiles per side).
pub const ARENA_SIZE_MAX: u32 = 40;

/// Default arena size.
pub const ARENA_SIZE_DEFAULT: u32 = 10;

/// Minimum tick bound a caller may request.
pub const MAX_TICKS_MIN: u32 = 20;

/// Maximum tick bound a caller may request.
pub const MAX_TICKS_MAX: u32 = 5000;

/// Default tick bound.
pub const MAX_TICKS_DEFAULT: u32 = 500;

// --- Script limits ---

/// Maximum number of lines a DSL script may contain.
pub const MAX_SCRIPT_LINES: usize = 200;

/// Inclusive bound on a `SET` command's numeric value.
pub const SET_VALUE_MIN: f64 = -1.0;
pub const SET_VALUE_MAX: f64 = 1.0;

// --- Vision ---

/// Vision cone radius (tiles).
pub const VISION_RADIUS: f64 = 8.0;

/// Vision cone half-angle (radians), centered on heading.
pub const VISION_HALF_ANGLE: f64 = std::f64::consts::PI / 3.0;

/// Small epsilon used to avoid division by zero when a target sits exactly
/// on the actor's lateral axis.
pub const VISION_FORWARD_EPSILON: f64 = 1e-9;

/// Lateral offset (in tile-equivalent units after forward/lateral split)
/// at or below which an enemy is reported as bearing FRONT rather than
/// FRONT_LEFT/FRONT_RIGHT.
pub const BEARING_FRONT_LATERAL_THRESHOLD: f64 = 0.75;

/// Upper bound (inclusive) of the "near" distance band.
pub const DISTANCE_BAND_NEAR_MAX: f64 = 2.0;

/// Upper bound (inclusive) of the "mid" distance band.
pub const DISTANCE_BAND_MID_MAX: f64 = 4.0;

/// Sentinel value for `ticks_since_enemy_seen` once the counter saturates.
pub const ENEMY_SEEN_SENTINEL: u32 = 1_000_000;

// --- Collision ---

/// Robot collision radius (tiles). Two alive robots must stay further
/// apart than twice this radius.
pub const ROBOT_COLLISION_RADIUS: f64 = 0.34;

// --- Movement ---

/// Ticks to cross one tile moving forward at full throttle.
pub const FORWARD_TICKS_PER_TILE: f64 = 8.0;

/// Ticks to cross one tile moving backward at full throttle.
pub const BACKWARD_TICKS_PER_TILE: f64 = 16.0;

/// Ticks to cross one tile strafing at full strafe input.
pub const STRAFE_TICKS_PER_TILE: f64 = 12.0;

/// Rotation rate at full turn input (degrees per second).
pub const TURN_DEGREES_PER_SEC: f64 = 360.0;

/// Multiplier applied to rotation and linear speed while firing.
pub const FIRE_MOVEMENT_PENALTY: f64 = 0.5;

// --- Side-boost ---

/// Energy debited on side-boost ignition.
pub const SIDE_BOOST_ENERGY_COST: f64 = 35.0;

/// Cooldown imposed after a side-boost ignition (ticks).
pub const SIDE_BOOST_COOLDOWN_TICKS: u32 = 10;

/// Number of ticks a side-boost burst lasts.
pub const SIDE_BOOST_BURST_TICKS: u32 = 5;

/// Lateral force level consumed on each burst tick, indexed by
/// `SIDE_BOOST_BURST_TICKS - remaining`.
pub const SIDE_BOOST_FORCE_LEVELS: [f64; 5] = [5.0, 4.0, 3.0, 2.0, 1.0];

// --- Energy ---

/// Maximum shared energy value.
pub const ENERGY_MAX: f64 = 100.0;

/// Starting energy for both robots.
pub const ENERGY_START: f64 = 100.0;

/// Energy regeneration rate per second.
pub const ENERGY_REGEN_PER_SEC: f64 = 15.0;

// --- Firing & projectiles ---

/// Energy debited per authorized FIRE.
pub const FIRE_ENERGY_COST: f64 = 6.0;

/// Cooldown imposed after a successful FIRE (ticks).
pub const FIRE_COOLDOWN_TICKS: u32 = 1;

/// Maximum projectile travel distance (tiles).
pub const SHOT_RANGE: f64 = 5.0;

/// Point-to-segment hit radius for projectile-vs-target checks (tiles).
pub const SHOT_HIT_RADIUS: f64 = 0.36;

/// Ticks to cross one tile at projectile speed.
pub const PROJECTILE_TICKS_PER_TILE: f64 = 2.0;

// --- Reporting ---

/// Decimal places for position/energy/delta numerics in reported output.
pub const REPORT_DECIMALS_FINE: u32 = 4;

/// Decimal places for heading/distance numerics in reported output.
pub const REPORT_DECIMALS_COARSE: u32 = 2;
