//! Tests for the sensor/perception model, the movement and firing systems,
//! and the battle engine's end-to-end scenarios (spec.md §8).

use std::rc::Rc;

use skirmish_core::constants::*;
use skirmish_core::enums::{BattleStatus, Bearing, DistanceBand, RobotId, WallSide};
use skirmish_core::types::Vec2;
use skirmish_lang::parse_program;

use crate::components::{BoostState, EnemyMemory};
use crate::engine::BattleEngine;
use crate::systems::firing::{self, FireActorInput, FireOutcome};
use crate::systems::memory;
use crate::systems::movement::{self, MovementInput};
use crate::systems::perception::{cast_ray, compute_perception};
use crate::systems::rules::{evaluate_program, ControlState};
use crate::{simulate, BattleConfig};

fn idle_program() -> Rc<skirmish_lang::Program> {
    Rc::new(parse_program("FIRE OFF").unwrap())
}

// ---- Geometry: wall rays (spec.md §8 scenario 1) ----

#[test]
fn wall_ray_scenario_matches_spec_example() {
    // Position (2, 3), heading East, arena size 10 (max index 9).
    let pos = Vec2::new(2.0, 3.0);
    let ahead = cast_ray(pos, Vec2::from_heading(0.0), 10);
    let right = cast_ray(pos, Vec2::from_heading(0.0).rotated_right(), 10);
    let left = cast_ray(pos, Vec2::from_heading(0.0).rotated_right().scale(-1.0), 10);
    let back = cast_ray(pos, Vec2::from_heading(0.0).scale(-1.0), 10);

    assert!((ahead.distance - 7.0).abs() < 1e-9);
    assert_eq!(ahead.side, WallSide::East);
    assert!((right.distance - 6.0).abs() < 1e-9);
    assert_eq!(right.side, WallSide::South);
    assert!((left.distance - 3.0).abs() < 1e-9);
    assert_eq!(left.side, WallSide::North);
    assert!((back.distance - 2.0).abs() < 1e-9);
    assert_eq!(back.side, WallSide::West);
}

#[test]
fn perception_vision_cone_excludes_enemy_behind() {
    let perception = compute_perception(
        Vec2::new(5.0, 5.0),
        0.0,
        Vec2::new(3.0, 5.0),
        std::f64::consts::PI,
        true,
        10,
    );
    assert!(!perception.enemy_visible);
    assert!(perception.enemy.is_none());
}

#[test]
fn perception_classifies_distance_band_and_bearing() {
    let perception = compute_perception(
        Vec2::new(0.0, 0.0),
        0.0,
        Vec2::new(2.0, 0.0),
        std::f64::consts::PI,
        true,
        10,
    );
    assert!(perception.enemy_visible);
    let enemy = perception.enemy.unwrap();
    assert_eq!(enemy.band, DistanceBand::Near);
    assert_eq!(enemy.bearing, Bearing::Front);
}

#[test]
fn perception_ignores_dead_enemy() {
    let perception = compute_perception(
        Vec2::new(0.0, 0.0),
        0.0,
        Vec2::new(2.0, 0.0),
        0.0,
        false,
        10,
    );
    assert!(!perception.enemy_visible);
}

// ---- Movement / boost state machine (spec.md §8 scenarios 3, 4) ----

#[test]
fn side_boost_burst_sums_to_one_quarter_tile() {
    let mut boost = BoostState::default();
    let mut energy = ENERGY_START;
    let mut total = Vec2::ZERO;
    // Tick 1: BOOST RIGHT, heading East. Ticks 2-5: no further request, but
    // the burst already in progress keeps consuming force levels.
    for tick in 0..5 {
        let requested = if tick == 0 {
            Some(skirmish_core::enums::BoostDirection::Right)
        } else {
            None
        };
        let (delta, _) = movement::step_boost_for_test(&mut boost, &mut energy, requested, 0.0);
        total = total.add(&delta);
    }
    // 5 + 4 + 3 + 2 + 1 = 15, divided by STRAFE_TICKS_PER_TILE (12).
    assert!((total.length() - 15.0 / STRAFE_TICKS_PER_TILE).abs() < 1e-9);
    assert_eq!(boost.burst_remaining, 0);
    // Tick 0's regen is absorbed by the energy cap (ENERGY_START ==
    // ENERGY_MAX); ticks 1-4 each add a further `ENERGY_REGEN_PER_SEC * DT`.
    let expected = ENERGY_START - SIDE_BOOST_ENERGY_COST + 4.0 * ENERGY_REGEN_PER_SEC * DT;
    assert!((energy - expected).abs() < 1e-9);
}

#[test]
fn side_boost_ignored_mid_burst_and_during_cooldown() {
    let mut boost = BoostState::default();
    let mut energy = ENERGY_START;
    movement::step_boost_for_test(
        &mut boost,
        &mut energy,
        Some(skirmish_core::enums::BoostDirection::Left),
        0.0,
    );
    let locked = boost.locked_direction;
    // Requesting RIGHT mid-burst has no effect; the burst stays LEFT.
    movement::step_boost_for_test(
        &mut boost,
        &mut energy,
        Some(skirmish_core::enums::BoostDirection::Right),
        0.0,
    );
    assert_eq!(boost.locked_direction, locked);

    for _ in 0..SIDE_BOOST_BURST_TICKS - 1 {
        movement::step_boost_for_test(&mut boost, &mut energy, None, 0.0);
    }
    assert_eq!(boost.burst_remaining, 0);
    assert!(boost.cooldown_ticks > 0);
    let energy_before = energy;
    movement::step_boost_for_test(
        &mut boost,
        &mut energy,
        Some(skirmish_core::enums::BoostDirection::Right),
        0.0,
    );
    assert_eq!(energy, energy_before + ENERGY_REGEN_PER_SEC * DT);
}

#[test]
fn movement_clamps_at_boundary_and_reports_hit() {
    let a = MovementInput {
        pos: Vec2::new(0.0, 0.0),
        heading: std::f64::consts::PI,
        alive: true,
        energy: ENERGY_START,
        boost: BoostState::default(),
        control: ControlState {
            throttle: 1.0,
            ..Default::default()
        },
    };
    let b = MovementInput {
        pos: Vec2::new(5.0, 5.0),
        heading: 0.0,
        alive: true,
        energy: ENERGY_START,
        boost: BoostState::default(),
        control: ControlState::default(),
    };
    let (outcome_a, _) = movement::resolve_tick(10, a, b);
    assert!(outcome_a.hit_boundary);
    assert_eq!(outcome_a.pos, Vec2::new(0.0, 0.0));
}

#[test]
fn movement_reverts_on_mutual_collision() {
    let a = MovementInput {
        pos: Vec2::new(4.8, 5.0),
        heading: 0.0,
        alive: true,
        energy: ENERGY_START,
        boost: BoostState::default(),
        control: ControlState {
            throttle: 1.0,
            ..Default::default()
        },
    };
    let b = MovementInput {
        pos: Vec2::new(5.2, 5.0),
        heading: std::f64::consts::PI,
        alive: true,
        energy: ENERGY_START,
        boost: BoostState::default(),
        control: ControlState {
            throttle: 1.0,
            ..Default::default()
        },
    };
    let (outcome_a, outcome_b) = movement::resolve_tick(10, a, b);
    assert!(outcome_a.blocked_by_robot);
    assert!(outcome_b.blocked_by_robot);
    assert_eq!(outcome_a.pos, Vec2::new(4.8, 5.0));
    assert_eq!(outcome_b.pos, Vec2::new(5.2, 5.0));
}

#[test]
fn dead_robot_movement_is_frozen() {
    let a = MovementInput {
        pos: Vec2::new(3.0, 3.0),
        heading: 1.0,
        alive: false,
        energy: 10.0,
        boost: BoostState::default(),
        control: ControlState {
            throttle: 1.0,
            turn: 1.0,
            ..Default::default()
        },
    };
    let b = MovementInput {
        pos: Vec2::new(7.0, 7.0),
        heading: 0.0,
        alive: true,
        energy: ENERGY_START,
        boost: BoostState::default(),
        control: ControlState::default(),
    };
    let (outcome_a, _) = movement::resolve_tick(10, a, b);
    assert_eq!(outcome_a.pos, Vec2::new(3.0, 3.0));
    assert_eq!(outcome_a.heading, 1.0);
    assert_eq!(outcome_a.energy, 10.0);
}

#[test]
fn energy_regenerates_while_idle_and_clamps_at_max() {
    let mut boost = BoostState::default();
    let mut energy = 50.0;
    for _ in 0..(60 * 4) {
        movement::step_boost_for_test(&mut boost, &mut energy, None, 0.0);
    }
    assert_eq!(energy, ENERGY_MAX);
}

// ---- Firing pipeline (spec.md §8 scenario 2) ----

#[test]
fn fire_without_energy_spawns_no_projectile() {
    let mut projectiles = Vec::new();
    let a = FireActorInput {
        id: RobotId::A,
        pos: Vec2::new(0.0, 0.0),
        heading: 0.0,
        alive: true,
        energy: FIRE_ENERGY_COST - 1.0,
        fire_cooldown: 0,
        fire_requested: true,
    };
    let b = FireActorInput {
        id: RobotId::B,
        pos: Vec2::new(9.0, 9.0),
        heading: std::f64::consts::PI,
        alive: true,
        energy: ENERGY_START,
        fire_cooldown: 0,
        fire_requested: false,
    };
    let outcome = firing::run_tick(10, a, b, &mut projectiles);
    assert_eq!(outcome.a.outcome, FireOutcome::NoEnergy);
    assert!(projectiles.is_empty());
}

#[test]
fn projectile_expires_exactly_at_max_range() {
    let mut projectiles = Vec::new();
    // Target far out of hit range so no hit occurs; run enough ticks to
    // exhaust SHOT_RANGE tiles of travel and confirm the shot retires.
    let ticks_to_exhaust = (SHOT_RANGE * PROJECTILE_TICKS_PER_TILE).ceil() as u32 + 1;
    for i in 0..ticks_to_exhaust {
        let a = FireActorInput {
            id: RobotId::A,
            pos: Vec2::new(0.0, 20.0),
            heading: 0.0,
            alive: true,
            energy: ENERGY_START,
            fire_cooldown: 0,
            fire_requested: i == 0,
        };
        let b = FireActorInput {
            id: RobotId::B,
            pos: Vec2::new(39.0, 39.0),
            heading: std::f64::consts::PI,
            alive: true,
            energy: ENERGY_START,
            fire_cooldown: 0,
            fire_requested: false,
        };
        firing::run_tick(40, a, b, &mut projectiles);
    }
    assert!(projectiles.is_empty());
}

#[test]
fn aligned_head_on_shot_kills_target() {
    // Robots at (3,5)/(7,5), both idle (no throttle/turn), A firing.
    let mut projectiles = Vec::new();
    let mut killed = false;
    for _tick in 0..10 {
        let a = FireActorInput {
            id: RobotId::A,
            pos: Vec2::new(3.0, 5.0),
            heading: 0.0,
            alive: true,
            energy: ENERGY_START,
            fire_cooldown: 0,
            fire_requested: true,
        };
        let b = FireActorInput {
            id: RobotId::B,
            pos: Vec2::new(7.0, 5.0),
            heading: std::f64::consts::PI,
            alive: !killed,
            energy: ENERGY_START,
            fire_cooldown: 0,
            fire_requested: false,
        };
        let outcome = firing::run_tick(10, a, b, &mut projectiles);
        if outcome.kill_b {
            killed = true;
        }
    }
    assert!(killed, "aligned shot should eventually land");
}

// ---- Memory ----

#[test]
fn memory_tracks_sighting_recency() {
    let mut mem = EnemyMemory::default();
    assert_eq!(mem.ticks_since_enemy_seen, ENEMY_SEEN_SENTINEL);

    let perception = compute_perception(
        Vec2::new(0.0, 0.0),
        0.0,
        Vec2::new(2.0, 0.0),
        std::f64::consts::PI,
        true,
        10,
    );
    memory::update(&mut mem, &perception, Vec2::new(0.0, 0.0));
    assert_eq!(mem.ticks_since_enemy_seen, 0);
    assert!(mem.prev_enemy.is_some());

    let miss = compute_perception(
        Vec2::new(0.0, 0.0),
        0.0,
        Vec2::new(2.0, 0.0),
        std::f64::consts::PI,
        false,
        10,
    );
    memory::update(&mut mem, &miss, Vec2::new(0.0, 0.0));
    assert_eq!(mem.ticks_since_enemy_seen, 1);
    // Memory of the last sighting is retained even after losing track.
    assert!(mem.prev_enemy.is_some());
}

// ---- Rule evaluation: last-match-wins, dead-robot neutralization ----

#[test]
fn rule_evaluation_last_match_wins() {
    let program = parse_program("SET THROTTLE 0.5\nSET THROTTLE 1").unwrap();
    let sensors = crate::systems::perception::build_sensor_table(
        Vec2::ZERO,
        0.0,
        ENERGY_START,
        0,
        10,
        &compute_perception(Vec2::ZERO, 0.0, Vec2::new(9.0, 9.0), 0.0, false, 10),
        &EnemyMemory::default(),
    );
    let (state, matched) = evaluate_program(&program, &sensors);
    assert_eq!(state.throttle, 1.0);
    assert_eq!(matched, vec![1, 2]);
}

// ---- Engine-level scenarios ----

#[test]
fn rotation_only_returns_heading_to_start() {
    let program_a = Rc::new(parse_program("SET TURN 1").unwrap());
    let program_b = idle_program();
    let mut engine = BattleEngine::new(program_a, program_b, 10);
    for _ in 0..TICK_RATE {
        let _ = engine.tick_for_test();
    }
    let snapshot = engine.snapshot();
    assert!(snapshot.a.heading_degrees.abs() < 0.5 || (snapshot.a.heading_degrees - 360.0).abs() < 0.5);
}

#[test]
fn determinism_same_programs_same_output() {
    let text = "IF ENEMY_VISIBLE THEN FIRE ON\nSET THROTTLE 0.3";
    let program_a = parse_program(text).unwrap();
    let program_b = parse_program(text).unwrap();
    let cfg = BattleConfig {
        arena_size: 10,
        max_ticks: MAX_TICKS_MIN,
    };
    let result_1 = simulate(&program_a, &program_b, cfg.clone()).unwrap();
    let result_2 = simulate(&program_a, &program_b, cfg).unwrap();
    let json_1 = serde_json::to_string(&result_1).unwrap();
    let json_2 = serde_json::to_string(&result_2).unwrap();
    assert_eq!(json_1, json_2);
}

#[test]
fn simulate_rejects_out_of_bounds_config() {
    let program = parse_program("FIRE OFF").unwrap();
    let cfg = BattleConfig {
        arena_size: 2,
        max_ticks: MAX_TICKS_DEFAULT,
    };
    assert!(simulate(&program, &program, cfg).is_err());
}

#[test]
fn battle_terminates_with_a_winner_or_draw() {
    let aggressive = Rc::new(
        parse_program("IF ENEMY_VISIBLE THEN FIRE ON\nIF NOT ENEMY_VISIBLE THEN SET TURN 0.5")
            .unwrap(),
    );
    let passive = idle_program();
    let engine = BattleEngine::new(aggressive, passive, 10);
    let result = engine.run(MAX_TICKS_DEFAULT);
    match result.status {
        BattleStatus::Finished => assert!(result.winner.is_some()),
        BattleStatus::Draw => assert!(result.winner.is_none()),
    }
}
