//! Canonical sensor identifier registry (spec.md §4.1, §4.2).
//!
//! The rule parser validates every bare identifier against this table at
//! parse time ("unknown identifiers fail parsing"); the sensor evaluator
//! later fills each of these keys with a value or leaves it unavailable.

pub const SENSOR_NAMES: &[&str] = &[
    "SELF_X",
    "SELF_Y",
    "SELF_HEADING",
    "SELF_ENERGY",
    "BOOST_COOLDOWN",
    "TICKS_SINCE_ENEMY_SEEN",
    "ARENA_SIZE",
    "ENEMY_X",
    "ENEMY_Y",
    "ENEMY_DX",
    "ENEMY_DY",
    "ENEMY_DISTANCE",
    "ENEMY_HEADING",
    "PREV_ENEMY_X",
    "PREV_ENEMY_Y",
    "PREV_ENEMY_HEADING",
    "PREV_ENEMY_DX",
    "PREV_ENEMY_DY",
    "PREV_ENEMY_DISTANCE",
    "ENEMY_X_DELTA",
    "ENEMY_Y_DELTA",
    "ENEMY_HEADING_DELTA",
    "ENEMY_DX_DELTA",
    "ENEMY_DY_DELTA",
    "ENEMY_DISTANCE_DELTA",
    "WALL_AHEAD_DISTANCE",
    "WALL_LEFT_DISTANCE",
    "WALL_RIGHT_DISTANCE",
    "WALL_BACK_DISTANCE",
    "WALL_NEAREST_DISTANCE",
];

pub fn is_valid_sensor(name: &str) -> bool {
    SENSOR_NAMES.contains(&name)
}
