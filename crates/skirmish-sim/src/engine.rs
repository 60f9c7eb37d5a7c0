//! The tick-based battle engine (spec.md §2, §5), grounded on
//! `deterrence-sim::engine::SimulationEngine`: owns the `hecs::World` and a
//! scratch buffer for in-flight projectiles, runs systems in a fixed order
//! each tick, and drives the battle to a termination state.

use std::rc::Rc;

use hecs::{Entity, World};

use skirmish_core::constants::TICK_RATE;
use skirmish_core::enums::{BattleStatus, RobotId};
use skirmish_core::types::{SimTime, Vec2};
use skirmish_lang::Program;

use crate::components::{
    Alive, BoostState, EnemyMemory, EnergyState, FireState, Heading, Position, Projectile,
    RobotProgram,
};
use crate::replay::{self, TickEvents};
use crate::result::{
    ActionRecord, BattleConfig, BattleResult, PerceptionView, RobotPair, RobotSnapshotView,
    ReplayFrame, TickLog,
};
use crate::systems::firing::{self, FireActorInput};
use crate::systems::movement::{self, MovementInput};
use crate::systems::perception::{build_sensor_table, compute_perception};
use crate::systems::rules::{self, ControlState};
use crate::systems::memory;
use crate::world_setup;

/// Everything read from the world at the start of a tick for one robot.
struct RobotState {
    pos: Vec2,
    heading: f64,
    alive: bool,
    energy: f64,
    fire_cooldown: u32,
    boost: BoostState,
    program: Rc<Program>,
}

fn read_state(world: &World, entity: Entity) -> RobotState {
    RobotState {
        pos: world.get::<&Position>(entity).unwrap().0,
        heading: world.get::<&Heading>(entity).unwrap().0,
        alive: world.get::<&Alive>(entity).unwrap().0,
        energy: world.get::<&EnergyState>(entity).unwrap().energy,
        fire_cooldown: world.get::<&FireState>(entity).unwrap().cooldown_ticks,
        boost: *world.get::<&BoostState>(entity).unwrap(),
        program: world.get::<&RobotProgram>(entity).unwrap().0.clone(),
    }
}

#[allow(clippy::too_many_arguments)]
fn write_state(
    world: &mut World,
    entity: Entity,
    pos: Vec2,
    heading: f64,
    alive: bool,
    energy: f64,
    fire_cooldown: u32,
    boost: BoostState,
) {
    world.get::<&mut Position>(entity).unwrap().0 = pos;
    world.get::<&mut Heading>(entity).unwrap().0 = heading;
    world.get::<&mut Alive>(entity).unwrap().0 = alive;
    world.get::<&mut EnergyState>(entity).unwrap().energy = energy;
    world.get::<&mut FireState>(entity).unwrap().cooldown_ticks = fire_cooldown;
    *world.get::<&mut BoostState>(entity).unwrap() = boost;
}

fn capture_snapshot(world: &World, id: RobotId, entity: Entity) -> RobotSnapshotView {
    let pos = world.get::<&Position>(entity).unwrap();
    let heading = world.get::<&Heading>(entity).unwrap();
    let alive = world.get::<&Alive>(entity).unwrap();
    let energy = world.get::<&EnergyState>(entity).unwrap();
    let fire = world.get::<&FireState>(entity).unwrap();
    let boost = world.get::<&BoostState>(entity).unwrap();
    RobotSnapshotView::capture(id, &pos, &heading, &alive, &energy, &fire, &boost)
}

/// Owns the world, the simulation clock, and the projectile scratch buffer.
/// The tick loop does not allocate anywhere outside building this tick's
/// log/replay frame (spec.md §5).
pub struct BattleEngine {
    world: World,
    entity_a: Entity,
    entity_b: Entity,
    arena_size: u32,
    time: SimTime,
    projectiles: Vec<Projectile>,
}

impl BattleEngine {
    pub fn new(program_a: Rc<Program>, program_b: Rc<Program>, arena_size: u32) -> Self {
        let mut world = World::new();
        let (entity_a, entity_b) =
            world_setup::spawn_combatants(&mut world, arena_size, program_a, program_b);
        BattleEngine {
            world,
            entity_a,
            entity_b,
            arena_size,
            time: SimTime::default(),
            projectiles: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> RobotPair<RobotSnapshotView> {
        RobotPair::new(
            capture_snapshot(&self.world, RobotId::A, self.entity_a),
            capture_snapshot(&self.world, RobotId::B, self.entity_b),
        )
    }

    pub fn perception(&self) -> RobotPair<PerceptionView> {
        let a = read_state(&self.world, self.entity_a);
        let b = read_state(&self.world, self.entity_b);
        let perception_a =
            compute_perception(a.pos, a.heading, b.pos, b.heading, b.alive, self.arena_size);
        let perception_b =
            compute_perception(b.pos, b.heading, a.pos, a.heading, a.alive, self.arena_size);
        RobotPair::new(
            PerceptionView::capture(&perception_a),
            PerceptionView::capture(&perception_b),
        )
    }

    /// Run one tick's fixed phase order: perception, rules, movement,
    /// firing, memory (spec.md §2, §5). Returns this tick's log plus the
    /// matching replay frame.
    fn tick(&mut self) -> (TickLog, ReplayFrame) {
        // Tick indices are 1-based; `self.time.tick` is the count of ticks
        // already completed, so this tick's index is one past that.
        let tick_index = self.time.tick + 1;
        let a_state = read_state(&self.world, self.entity_a);
        let b_state = read_state(&self.world, self.entity_b);

        let start_snapshot = self.snapshot();

        let perception_a = compute_perception(
            a_state.pos,
            a_state.heading,
            b_state.pos,
            b_state.heading,
            b_state.alive,
            self.arena_size,
        );
        let perception_b = compute_perception(
            b_state.pos,
            b_state.heading,
            a_state.pos,
            a_state.heading,
            a_state.alive,
            self.arena_size,
        );
        let start_perception = RobotPair::new(
            PerceptionView::capture(&perception_a),
            PerceptionView::capture(&perception_b),
        );

        let memory_a = *self.world.get::<&EnemyMemory>(self.entity_a).unwrap();
        let memory_b = *self.world.get::<&EnemyMemory>(self.entity_b).unwrap();

        let sensors_a = build_sensor_table(
            a_state.pos,
            a_state.heading,
            a_state.energy,
            a_state.boost.cooldown_ticks,
            self.arena_size,
            &perception_a,
            &memory_a,
        );
        let sensors_b = build_sensor_table(
            b_state.pos,
            b_state.heading,
            b_state.energy,
            b_state.boost.cooldown_ticks,
            self.arena_size,
            &perception_b,
            &memory_b,
        );

        // A dead robot's controls are neutralized; it takes no further
        // actions (spec.md §3).
        let (control_a, matched_a) = if a_state.alive {
            rules::evaluate_program(&a_state.program, &sensors_a)
        } else {
            (ControlState::default(), Vec::new())
        };
        let (control_b, matched_b) = if b_state.alive {
            rules::evaluate_program(&b_state.program, &sensors_b)
        } else {
            (ControlState::default(), Vec::new())
        };

        let (movement_a, movement_b) = movement::resolve_tick(
            self.arena_size,
            MovementInput {
                pos: a_state.pos,
                heading: a_state.heading,
                alive: a_state.alive,
                energy: a_state.energy,
                boost: a_state.boost,
                control: control_a,
            },
            MovementInput {
                pos: b_state.pos,
                heading: b_state.heading,
                alive: b_state.alive,
                energy: b_state.energy,
                boost: b_state.boost,
                control: control_b,
            },
        );

        let fire_outcome = firing::run_tick(
            self.arena_size,
            FireActorInput {
                id: RobotId::A,
                pos: movement_a.pos,
                heading: movement_a.heading,
                alive: a_state.alive,
                energy: movement_a.energy,
                fire_cooldown: a_state.fire_cooldown,
                fire_requested: control_a.fire,
            },
            FireActorInput {
                id: RobotId::B,
                pos: movement_b.pos,
                heading: movement_b.heading,
                alive: b_state.alive,
                energy: movement_b.energy,
                fire_cooldown: b_state.fire_cooldown,
                fire_requested: control_b.fire,
            },
            &mut self.projectiles,
        );

        let a_alive_final = a_state.alive && !fire_outcome.kill_a;
        let b_alive_final = b_state.alive && !fire_outcome.kill_b;

        write_state(
            &mut self.world,
            self.entity_a,
            movement_a.pos,
            movement_a.heading,
            a_alive_final,
            fire_outcome.a.energy,
            fire_outcome.a.fire_cooldown,
            movement_a.boost,
        );
        write_state(
            &mut self.world,
            self.entity_b,
            movement_b.pos,
            movement_b.heading,
            b_alive_final,
            fire_outcome.b.energy,
            fire_outcome.b.fire_cooldown,
            movement_b.boost,
        );

        let perception_a_post = compute_perception(
            movement_a.pos,
            movement_a.heading,
            movement_b.pos,
            movement_b.heading,
            b_alive_final,
            self.arena_size,
        );
        let perception_b_post = compute_perception(
            movement_b.pos,
            movement_b.heading,
            movement_a.pos,
            movement_a.heading,
            a_alive_final,
            self.arena_size,
        );

        {
            let mut mem = self.world.get::<&mut EnemyMemory>(self.entity_a).unwrap();
            memory::update(&mut mem, &perception_a_post, movement_a.pos);
        }
        {
            let mut mem = self.world.get::<&mut EnemyMemory>(self.entity_b).unwrap();
            memory::update(&mut mem, &perception_b_post, movement_b.pos);
        }

        let end_snapshot = self.snapshot();
        let end_perception = RobotPair::new(
            PerceptionView::capture(&perception_a_post),
            PerceptionView::capture(&perception_b_post),
        );

        self.time.advance();

        let actions = RobotPair::new(
            ActionRecord {
                throttle: control_a.throttle,
                strafe: control_a.strafe,
                turn: control_a.turn,
                fire: control_a.fire,
                boost_requested: control_a.boost,
                boost_used: movement_a.boost_used,
                matched_rule_lines: matched_a,
                hit_boundary: movement_a.hit_boundary,
                blocked_by_robot: movement_a.blocked_by_robot,
                fire_outcome: ActionRecord::fire_outcome_str(fire_outcome.a.outcome),
                details: String::new(),
            },
            ActionRecord {
                throttle: control_b.throttle,
                strafe: control_b.strafe,
                turn: control_b.turn,
                fire: control_b.fire,
                boost_requested: control_b.boost,
                boost_used: movement_b.boost_used,
                matched_rule_lines: matched_b,
                hit_boundary: movement_b.hit_boundary,
                blocked_by_robot: movement_b.blocked_by_robot,
                fire_outcome: ActionRecord::fire_outcome_str(fire_outcome.b.outcome),
                details: String::new(),
            },
        );

        let projectile_traces: Vec<_> = fire_outcome
            .traces
            .iter()
            .map(crate::result::ProjectileTraceView::from)
            .collect();

        let frame = replay::build_frame(TickEvents {
            tick: tick_index,
            snapshot: end_snapshot.clone(),
            traces: &fire_outcome.traces,
            pre_pos: RobotPair::new(a_state.pos, b_state.pos),
            movement: RobotPair::new(&movement_a, &movement_b),
            fire_outcome: RobotPair::new(fire_outcome.a.outcome, fire_outcome.b.outcome),
            kill: RobotPair::new(fire_outcome.kill_a, fire_outcome.kill_b),
        });

        let log = TickLog {
            tick: tick_index,
            start_snapshot,
            start_perception,
            actions,
            projectile_traces,
            end_snapshot,
            end_perception,
        };

        (log, frame)
    }

    /// Run one tick, discarding the replay frame (tests only care about
    /// the resulting state).
    #[cfg(test)]
    pub fn tick_for_test(&mut self) -> TickLog {
        self.tick().0
    }

    /// Drive the battle to termination: one side dead (Finished), both
    /// dead on the same tick (Draw), or the tick budget exhausted (Draw).
    pub fn run(mut self, max_ticks: u32) -> BattleResult {
        let initial_snapshot = self.snapshot();
        let initial_perception = self.perception();

        let mut ticks = Vec::with_capacity(max_ticks as usize);
        let mut replay = Vec::with_capacity(max_ticks as usize + 1);
        replay.push(ReplayFrame {
            tick: 0,
            snapshot: initial_snapshot.clone(),
            projectile_traces: Vec::new(),
            boost_segments: Vec::new(),
            action_hints: Vec::new(),
        });
        let mut final_snapshot = initial_snapshot.clone();
        let mut final_perception = initial_perception.clone();
        let mut status = BattleStatus::Draw;
        let mut winner = None;

        for _ in 0..max_ticks {
            let (log, frame) = self.tick();
            final_snapshot = log.end_snapshot.clone();
            final_perception = log.end_perception.clone();
            let a_alive = final_snapshot.a.alive;
            let b_alive = final_snapshot.b.alive;
            ticks.push(log);
            replay.push(frame);

            if !a_alive && !b_alive {
                status = BattleStatus::Draw;
                winner = None;
                break;
            }
            if a_alive != b_alive {
                status = BattleStatus::Finished;
                winner = Some(if a_alive { RobotId::A } else { RobotId::B });
                break;
            }
        }

        BattleResult {
            config: BattleConfig {
                arena_size: self.arena_size,
                max_ticks,
            },
            initial_snapshot,
            final_snapshot,
            initial_perception,
            final_perception,
            ticks,
            replay,
            status,
            winner,
            replay_frame_rate: TICK_RATE,
        }
    }
}
