//! Wire DTOs for `BattleResult` (spec.md §3, §6). These are the only
//! `camelCase` types in the crate; everything else stays `snake_case`.

use serde::Serialize;

use skirmish_core::enums::{
    Bearing, BoostDirection, DistanceBand, Direction, RobotId, WallSide,
};
use skirmish_core::types::{round2, round4, Vec2};

use crate::components::{Alive, BoostState, EnergyState, FireState, Heading, Position};
use crate::systems::firing::{FireOutcome, ProjectileTrace};
use crate::systems::perception::Perception;

/// A value keyed by robot id, always present for both combatants.
#[derive(Debug, Clone, Serialize)]
pub struct RobotPair<T> {
    pub a: T,
    pub b: T,
}

impl<T> RobotPair<T> {
    pub fn new(a: T, b: T) -> Self {
        RobotPair { a, b }
    }
}

fn cardinal_letter(direction: Direction) -> &'static str {
    match direction {
        Direction::East => "E",
        Direction::South => "S",
        Direction::West => "W",
        Direction::North => "N",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotSnapshotView {
    pub id: RobotId,
    pub x: f64,
    pub y: f64,
    pub heading_degrees: f64,
    pub direction: &'static str,
    pub alive: bool,
    pub energy: f64,
    pub fire_cooldown: u32,
    pub boost_cooldown: u32,
    pub boost_burst_remaining: u32,
}

impl RobotSnapshotView {
    pub fn capture(
        id: RobotId,
        pos: &Position,
        heading: &Heading,
        alive: &Alive,
        energy: &EnergyState,
        fire: &FireState,
        boost: &BoostState,
    ) -> Self {
        let heading_degrees = heading.0.to_degrees().rem_euclid(360.0);
        RobotSnapshotView {
            id,
            x: round4(pos.0.x),
            y: round4(pos.0.y),
            heading_degrees: round2(heading_degrees),
            direction: cardinal_letter(Direction::from_heading_degrees(heading_degrees)),
            alive: alive.0,
            energy: round4(energy.energy),
            fire_cooldown: fire.cooldown_ticks,
            boost_cooldown: boost.cooldown_ticks,
            boost_burst_remaining: boost.burst_remaining,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyPerceptionView {
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
    pub band: DistanceBand,
    pub bearing: Bearing,
    pub heading_degrees: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallPerceptionView {
    pub ahead_distance: f64,
    pub left_distance: f64,
    pub right_distance: f64,
    pub back_distance: f64,
    pub nearest_distance: f64,
    pub nearest_side: WallSide,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionView {
    pub enemy_visible: bool,
    pub enemy: Option<EnemyPerceptionView>,
    pub wall: WallPerceptionView,
}

impl PerceptionView {
    pub fn capture(perception: &Perception) -> Self {
        PerceptionView {
            enemy_visible: perception.enemy_visible,
            enemy: perception.enemy.as_ref().map(|e| EnemyPerceptionView {
                dx: round4(e.dx),
                dy: round4(e.dy),
                distance: round2(e.distance),
                band: e.band,
                bearing: e.bearing,
                heading_degrees: round2(e.heading.to_degrees().rem_euclid(360.0)),
            }),
            wall: WallPerceptionView {
                ahead_distance: round2(perception.wall.ahead.distance),
                left_distance: round2(perception.wall.left.distance),
                right_distance: round2(perception.wall.right.distance),
                back_distance: round2(perception.wall.back.distance),
                nearest_distance: round2(perception.wall.nearest_distance),
                nearest_side: perception.wall.nearest_side,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectileTraceView {
    pub shooter: RobotId,
    pub target: RobotId,
    pub from: Vec2,
    pub to: Vec2,
    pub direction: &'static str,
    pub range: f64,
    pub hit: bool,
}

impl From<&ProjectileTrace> for ProjectileTraceView {
    fn from(t: &ProjectileTrace) -> Self {
        ProjectileTraceView {
            shooter: t.shooter,
            target: t.target,
            from: Vec2::new(round4(t.from.x), round4(t.from.y)),
            to: Vec2::new(round4(t.to.x), round4(t.to.y)),
            direction: cardinal_letter(t.cardinal),
            range: round2(t.range),
            hit: t.hit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub throttle: f64,
    pub strafe: f64,
    pub turn: f64,
    pub fire: bool,
    pub boost_requested: Option<BoostDirection>,
    pub boost_used: Option<BoostDirection>,
    pub matched_rule_lines: Vec<u32>,
    pub hit_boundary: bool,
    pub blocked_by_robot: bool,
    pub fire_outcome: &'static str,
    pub details: String,
}

impl ActionRecord {
    pub fn fire_outcome_str(outcome: FireOutcome) -> &'static str {
        match outcome {
            FireOutcome::NotRequested => "not_requested",
            FireOutcome::CooldownBlocked => "cooldown_blocked",
            FireOutcome::NoEnergy => "no_energy",
            FireOutcome::Fired => "fired",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickLog {
    pub tick: u64,
    pub start_snapshot: RobotPair<RobotSnapshotView>,
    pub start_perception: RobotPair<PerceptionView>,
    pub actions: RobotPair<ActionRecord>,
    pub projectile_traces: Vec<ProjectileTraceView>,
    pub end_snapshot: RobotPair<RobotSnapshotView>,
    pub end_perception: RobotPair<PerceptionView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostSegmentView {
    pub robot_id: RobotId,
    pub direction: BoostDirection,
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionHintView {
    pub robot_id: RobotId,
    pub action: &'static str,
    pub event: String,
    pub boost_used: Option<BoostDirection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayFrame {
    pub tick: u64,
    pub snapshot: RobotPair<RobotSnapshotView>,
    pub projectile_traces: Vec<ProjectileTraceView>,
    pub boost_segments: Vec<BoostSegmentView>,
    pub action_hints: Vec<ActionHintView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleConfig {
    pub arena_size: u32,
    pub max_ticks: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub config: BattleConfig,
    pub initial_snapshot: RobotPair<RobotSnapshotView>,
    pub final_snapshot: RobotPair<RobotSnapshotView>,
    pub initial_perception: RobotPair<PerceptionView>,
    pub final_perception: RobotPair<PerceptionView>,
    pub ticks: Vec<TickLog>,
    pub replay: Vec<ReplayFrame>,
    pub status: skirmish_core::enums::BattleStatus,
    pub winner: Option<RobotId>,
    pub replay_frame_rate: u32,
}
