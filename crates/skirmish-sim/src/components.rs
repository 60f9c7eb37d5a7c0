//! hecs components attached to the two robot entities and to in-flight
//! projectile entities.

use std::rc::Rc;

use skirmish_core::enums::{BoostDirection, RobotId};
use skirmish_core::types::Vec2;
use skirmish_lang::Program;

/// Which combatant this entity is. Present on both robot entities, absent
/// from projectile entities.
pub struct RobotIdTag(pub RobotId);

pub struct Position(pub Vec2);

/// Heading in radians, not yet normalized into a reporting range.
pub struct Heading(pub f64);

pub struct Alive(pub bool);

pub struct EnergyState {
    pub energy: f64,
}

pub struct FireState {
    pub cooldown_ticks: u32,
}

#[derive(Clone, Copy)]
pub struct BoostState {
    pub cooldown_ticks: u32,
    pub burst_remaining: u32,
    pub locked_direction: Option<BoostDirection>,
}

impl Default for BoostState {
    fn default() -> Self {
        BoostState {
            cooldown_ticks: 0,
            burst_remaining: 0,
            locked_direction: None,
        }
    }
}

/// Last recorded sighting of the opponent, used to derive `PREV_ENEMY_*`
/// and `*_DELTA` sensors (spec.md §4.2).
#[derive(Clone, Copy, Default)]
pub struct PrevEnemy {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
}

#[derive(Clone, Copy)]
pub struct EnemyMemory {
    pub prev_enemy: Option<PrevEnemy>,
    pub ticks_since_enemy_seen: u32,
}

impl Default for EnemyMemory {
    fn default() -> Self {
        EnemyMemory {
            prev_enemy: None,
            ticks_since_enemy_seen: skirmish_core::constants::ENEMY_SEEN_SENTINEL,
        }
    }
}

/// The robot's compiled rule script. Shared by reference so the same
/// `Program` can be reused across battles without recompiling.
pub struct RobotProgram(pub Rc<Program>);

/// An in-flight shot. Kept in the engine's `Vec<Projectile>` scratch buffer
/// rather than as its own hecs entity (see DESIGN.md) — spawned by the
/// firing system and dropped from the buffer on hit, range exhaustion, or
/// wall exit.
pub struct Projectile {
    pub shooter: RobotId,
    pub target: RobotId,
    pub pos: Vec2,
    pub direction: Vec2,
    pub spawn_cardinal: skirmish_core::enums::Direction,
    pub traveled: f64,
    pub max_range: f64,
}
