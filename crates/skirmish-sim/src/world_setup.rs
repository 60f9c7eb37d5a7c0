//! Battle-start entity spawning (spec.md §3 Lifecycle: "A at (0,0) heading
//! East, B at (N-1,N-1) heading West").

use std::rc::Rc;

use hecs::{Entity, World};
use skirmish_core::constants::ENERGY_START;
use skirmish_core::enums::RobotId;
use skirmish_core::types::Vec2;
use skirmish_lang::Program;

use crate::components::{
    Alive, BoostState, EnemyMemory, EnergyState, FireState, Heading, Position, RobotIdTag,
    RobotProgram,
};

pub fn spawn_robot(
    world: &mut World,
    id: RobotId,
    pos: Vec2,
    heading: f64,
    program: Rc<Program>,
) -> Entity {
    world.spawn((
        RobotIdTag(id),
        Position(pos),
        Heading(heading),
        Alive(true),
        EnergyState {
            energy: ENERGY_START,
        },
        FireState { cooldown_ticks: 0 },
        BoostState::default(),
        EnemyMemory::default(),
        RobotProgram(program),
    ))
}

/// Spawn both combatants at their fixed start positions: A at the
/// origin corner heading East, B at the opposite corner heading West.
pub fn spawn_combatants(
    world: &mut World,
    arena_size: u32,
    program_a: Rc<Program>,
    program_b: Rc<Program>,
) -> (Entity, Entity) {
    let far = (arena_size - 1) as f64;
    let a = spawn_robot(world, RobotId::A, Vec2::new(0.0, 0.0), 0.0, program_a);
    let b = spawn_robot(
        world,
        RobotId::B,
        Vec2::new(far, far),
        std::f64::consts::PI,
        program_b,
    );
    (a, b)
}
