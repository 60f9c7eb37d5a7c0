//! Geometry and perception (spec.md §4.4) plus the per-robot sensor table
//! the rule evaluator reads (spec.md §4.2).

use std::collections::HashMap;

use skirmish_core::constants::{VISION_FORWARD_EPSILON, VISION_HALF_ANGLE, VISION_RADIUS};
use skirmish_core::enums::{Bearing, DistanceBand, WallSide};
use skirmish_core::types::Vec2;

use crate::components::EnemyMemory;

/// Nearest positive intersection of a ray with the arena's four walls.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub distance: f64,
    pub point: Vec2,
    pub side: WallSide,
}

#[derive(Debug, Clone, Copy)]
pub struct WallPerception {
    pub ahead: RayHit,
    pub left: RayHit,
    pub right: RayHit,
    pub back: RayHit,
    pub nearest_distance: f64,
    pub nearest_side: WallSide,
    pub sight_arc_left: RayHit,
    pub sight_arc_right: RayHit,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyPerception {
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
    pub band: DistanceBand,
    pub bearing: Bearing,
    pub heading: f64,
}

#[derive(Debug, Clone)]
pub struct Perception {
    pub enemy_visible: bool,
    pub enemy: Option<EnemyPerception>,
    pub wall: WallPerception,
}

/// Cast a ray from `origin` along unit `dir` until it crosses `x=0`,
/// `x=N-1`, `y=0`, or `y=N-1`; return the nearest positive intersection.
pub fn cast_ray(origin: Vec2, dir: Vec2, arena_size: u32) -> RayHit {
    let max = (arena_size - 1) as f64;
    let mut candidates: Vec<(f64, WallSide)> = Vec::with_capacity(2);
    if dir.x > VISION_FORWARD_EPSILON {
        candidates.push(((max - origin.x) / dir.x, WallSide::East));
    } else if dir.x < -VISION_FORWARD_EPSILON {
        candidates.push(((0.0 - origin.x) / dir.x, WallSide::West));
    }
    if dir.y > VISION_FORWARD_EPSILON {
        candidates.push(((max - origin.y) / dir.y, WallSide::South));
    } else if dir.y < -VISION_FORWARD_EPSILON {
        candidates.push(((0.0 - origin.y) / dir.y, WallSide::North));
    }
    let (distance, side) = candidates
        .into_iter()
        .filter(|(t, _)| *t >= 0.0)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, WallSide::East));
    let point = origin.add(&dir.scale(distance));
    RayHit { distance, point, side }
}

fn wall_perception(pos: Vec2, heading: f64, arena_size: u32) -> WallPerception {
    let forward = Vec2::from_heading(heading);
    let right = forward.rotated_right();
    let back = forward.scale(-1.0);
    let left = right.scale(-1.0);

    let ahead = cast_ray(pos, forward, arena_size);
    let right_hit = cast_ray(pos, right, arena_size);
    let back_hit = cast_ray(pos, back, arena_size);
    let left_hit = cast_ray(pos, left, arena_size);
    let sight_arc_left = cast_ray(pos, Vec2::from_heading(heading - VISION_HALF_ANGLE), arena_size);
    let sight_arc_right = cast_ray(pos, Vec2::from_heading(heading + VISION_HALF_ANGLE), arena_size);

    let (nearest_distance, nearest_side) = [&ahead, &left_hit, &right_hit, &back_hit]
        .iter()
        .map(|h| (h.distance, h.side))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap();

    WallPerception {
        ahead,
        left: left_hit,
        right: right_hit,
        back: back_hit,
        nearest_distance,
        nearest_side,
        sight_arc_left,
        sight_arc_right,
    }
}

/// Build the full perception record for one actor, given the opponent's
/// pre-tick position, heading, and liveness.
pub fn compute_perception(
    self_pos: Vec2,
    self_heading: f64,
    other_pos: Vec2,
    other_heading: f64,
    other_alive: bool,
    arena_size: u32,
) -> Perception {
    let wall = wall_perception(self_pos, self_heading, arena_size);

    let offset = Vec2::new(other_pos.x - self_pos.x, other_pos.y - self_pos.y);
    let distance = self_pos.distance_to(&other_pos);
    let heading_unit = Vec2::from_heading(self_heading);
    let right_unit = heading_unit.rotated_right();
    let forward = heading_unit.dot(&offset);
    let lateral = right_unit.dot(&offset);

    let visible = other_alive
        && distance <= VISION_RADIUS
        && forward > 0.0
        && lateral.abs().atan2(forward.max(VISION_FORWARD_EPSILON)).abs() <= VISION_HALF_ANGLE;

    let enemy = if visible {
        Some(EnemyPerception {
            dx: offset.x,
            dy: offset.y,
            distance,
            band: DistanceBand::classify(distance),
            bearing: Bearing::classify(lateral),
            heading: other_heading,
        })
    } else {
        None
    };

    Perception {
        enemy_visible: visible,
        enemy,
        wall,
    }
}

/// Mapping from sensor identifier to a finite value or "unavailable".
/// Unknown/unset keys (not in the registry, or not currently computable)
/// are unavailable the same as a computed `NaN`.
pub struct SensorTable {
    enemy_visible: bool,
    values: HashMap<&'static str, Option<f64>>,
}

impl SensorTable {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }

    pub fn enemy_visible(&self) -> bool {
        self.enemy_visible
    }
}

fn finite(v: f64) -> Option<f64> {
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
pub fn build_sensor_table(
    self_pos: Vec2,
    self_heading: f64,
    self_energy: f64,
    boost_cooldown: u32,
    arena_size: u32,
    perception: &Perception,
    memory: &EnemyMemory,
) -> SensorTable {
    let mut values: HashMap<&'static str, Option<f64>> = HashMap::new();

    values.insert("SELF_X", finite(self_pos.x));
    values.insert("SELF_Y", finite(self_pos.y));
    values.insert("SELF_HEADING", finite(self_heading.to_degrees().rem_euclid(360.0)));
    values.insert("SELF_ENERGY", finite(self_energy));
    values.insert("BOOST_COOLDOWN", finite(boost_cooldown as f64));
    values.insert(
        "TICKS_SINCE_ENEMY_SEEN",
        finite(memory.ticks_since_enemy_seen as f64),
    );
    values.insert("ARENA_SIZE", finite(arena_size as f64));

    values.insert("WALL_AHEAD_DISTANCE", finite(perception.wall.ahead.distance));
    values.insert("WALL_LEFT_DISTANCE", finite(perception.wall.left.distance));
    values.insert("WALL_RIGHT_DISTANCE", finite(perception.wall.right.distance));
    values.insert("WALL_BACK_DISTANCE", finite(perception.wall.back.distance));
    values.insert(
        "WALL_NEAREST_DISTANCE",
        finite(perception.wall.nearest_distance),
    );

    let mut enemy_heading_deg = None;
    if let Some(enemy) = &perception.enemy {
        let heading_deg = enemy.heading.to_degrees().rem_euclid(360.0);
        enemy_heading_deg = Some(heading_deg);
        values.insert("ENEMY_X", finite(self_pos.x + enemy.dx));
        values.insert("ENEMY_Y", finite(self_pos.y + enemy.dy));
        values.insert("ENEMY_DX", finite(enemy.dx));
        values.insert("ENEMY_DY", finite(enemy.dy));
        values.insert("ENEMY_DISTANCE", finite(enemy.distance));
        values.insert("ENEMY_HEADING", finite(heading_deg));
    }

    if let Some(prev) = memory.prev_enemy {
        values.insert("PREV_ENEMY_X", finite(prev.x));
        values.insert("PREV_ENEMY_Y", finite(prev.y));
        values.insert("PREV_ENEMY_HEADING", finite(prev.heading));
        values.insert("PREV_ENEMY_DX", finite(prev.dx));
        values.insert("PREV_ENEMY_DY", finite(prev.dy));
        values.insert("PREV_ENEMY_DISTANCE", finite(prev.distance));

        if let (Some(enemy), Some(heading_deg)) = (&perception.enemy, enemy_heading_deg) {
            values.insert("ENEMY_X_DELTA", finite((self_pos.x + enemy.dx) - prev.x));
            values.insert("ENEMY_Y_DELTA", finite((self_pos.y + enemy.dy) - prev.y));
            values.insert("ENEMY_HEADING_DELTA", finite(heading_deg - prev.heading));
            values.insert("ENEMY_DX_DELTA", finite(enemy.dx - prev.dx));
            values.insert("ENEMY_DY_DELTA", finite(enemy.dy - prev.dy));
            values.insert("ENEMY_DISTANCE_DELTA", finite(enemy.distance - prev.distance));
        }
    }

    SensorTable {
        enemy_visible: perception.enemy_visible,
        values,
    }
}
