//! Rotation, linear movement, the side-boost state machine, and collision
//! resolution (spec.md §4.5). Runs for both robots from a shared pre-tick
//! snapshot so the two actors move "simultaneously".

use skirmish_core::constants::{
    BACKWARD_TICKS_PER_TILE, DT, ENERGY_MAX, ENERGY_REGEN_PER_SEC, FIRE_MOVEMENT_PENALTY,
    FORWARD_TICKS_PER_TILE, ROBOT_COLLISION_RADIUS, SIDE_BOOST_BURST_TICKS,
    SIDE_BOOST_COOLDOWN_TICKS, SIDE_BOOST_ENERGY_COST, SIDE_BOOST_FORCE_LEVELS,
    STRAFE_TICKS_PER_TILE, TURN_DEGREES_PER_SEC,
};
use skirmish_core::enums::BoostDirection;
use skirmish_core::types::Vec2;

use crate::components::BoostState;
use crate::systems::rules::ControlState;

pub struct MovementInput {
    pub pos: Vec2,
    pub heading: f64,
    pub alive: bool,
    pub energy: f64,
    pub boost: BoostState,
    pub control: ControlState,
}

pub struct MovementOutcome {
    pub pos: Vec2,
    pub heading: f64,
    pub energy: f64,
    pub boost: BoostState,
    pub attempted: bool,
    pub hit_boundary: bool,
    pub blocked_by_robot: bool,
    pub boost_used: Option<BoostDirection>,
    /// Lateral displacement contributed by the boost burst this tick alone
    /// (before collision clamping), used for replay boost segments.
    pub boost_delta: Vec2,
}

fn rotate(heading: f64, turn: f64, fire: bool) -> f64 {
    let penalty = if fire { FIRE_MOVEMENT_PENALTY } else { 1.0 };
    let delta = turn * TURN_DEGREES_PER_SEC.to_radians() * penalty * DT;
    (heading + delta).rem_euclid(std::f64::consts::TAU)
}

fn linear_delta(heading: f64, throttle: f64, strafe: f64, fire: bool) -> Vec2 {
    let penalty = if fire { FIRE_MOVEMENT_PENALTY } else { 1.0 };
    let forward_speed = 1.0 / (FORWARD_TICKS_PER_TILE * DT);
    let backward_speed = 1.0 / (BACKWARD_TICKS_PER_TILE * DT);
    let strafe_speed = 1.0 / (STRAFE_TICKS_PER_TILE * DT);
    let throttle_speed = if throttle < 0.0 {
        backward_speed
    } else {
        forward_speed
    };
    let heading_unit = Vec2::from_heading(heading);
    let right_unit = heading_unit.rotated_right();
    let raw = heading_unit
        .scale(throttle * throttle_speed)
        .add(&right_unit.scale(strafe * strafe_speed));
    raw.scale(penalty * DT)
}

/// Advance the boost state machine by one tick. Returns the lateral delta
/// this tick contributes and the direction in use, if any.
fn step_boost(
    boost: &mut BoostState,
    energy: &mut f64,
    requested: Option<BoostDirection>,
    heading: f64,
) -> (Vec2, Option<BoostDirection>) {
    boost.cooldown_ticks = boost.cooldown_ticks.saturating_sub(1);
    *energy = (*energy + ENERGY_REGEN_PER_SEC * DT).min(ENERGY_MAX);

    if boost.burst_remaining == 0 {
        if let Some(dir) = requested {
            if boost.cooldown_ticks == 0 && *energy >= SIDE_BOOST_ENERGY_COST {
                *energy -= SIDE_BOOST_ENERGY_COST;
                boost.cooldown_ticks = SIDE_BOOST_COOLDOWN_TICKS;
                boost.burst_remaining = SIDE_BOOST_BURST_TICKS;
                boost.locked_direction = Some(dir);
            }
        }
    }

    if boost.burst_remaining == 0 {
        return (Vec2::ZERO, None);
    }

    let idx = (SIDE_BOOST_BURST_TICKS - boost.burst_remaining) as usize;
    let level = SIDE_BOOST_FORCE_LEVELS[idx];
    let direction = boost
        .locked_direction
        .expect("burst_remaining > 0 implies a locked direction");
    let heading_unit = Vec2::from_heading(heading);
    let right_unit = heading_unit.rotated_right();
    let dir_unit = match direction {
        BoostDirection::Right => right_unit,
        BoostDirection::Left => right_unit.scale(-1.0),
    };
    let delta = dir_unit.scale(level / STRAFE_TICKS_PER_TILE);

    boost.burst_remaining -= 1;
    if boost.burst_remaining == 0 {
        boost.locked_direction = None;
    }
    (delta, Some(direction))
}

#[cfg(test)]
pub fn step_boost_for_test(
    boost: &mut BoostState,
    energy: &mut f64,
    requested: Option<BoostDirection>,
    heading: f64,
) -> (Vec2, Option<BoostDirection>) {
    step_boost(boost, energy, requested, heading)
}

/// Resolve one tick of movement for both robots from their pre-tick
/// snapshots. Dead robots are frozen: no rotation, housekeeping, or
/// movement delta, per spec.md's "no further actions" rule.
pub fn resolve_tick(
    arena_size: u32,
    a: MovementInput,
    b: MovementInput,
) -> (MovementOutcome, MovementOutcome) {
    let max = (arena_size - 1) as f64;

    #[allow(clippy::type_complexity)]
    let step = |input: MovementInput| -> (Vec2, f64, f64, BoostState, Option<BoostDirection>, bool, Vec2) {
        if !input.alive {
            return (
                input.pos,
                input.heading,
                input.energy,
                input.boost,
                None,
                false,
                Vec2::ZERO,
            );
        }
        let mut boost = input.boost;
        let mut energy = input.energy;
        let new_heading = rotate(input.heading, input.control.turn, input.control.fire);
        let linear = linear_delta(
            input.heading,
            input.control.throttle,
            input.control.strafe,
            input.control.fire,
        );
        let (boost_delta, boost_used) =
            step_boost(&mut boost, &mut energy, input.control.boost, input.heading);
        let total_delta = linear.add(&boost_delta);
        let attempted = total_delta.x != 0.0 || total_delta.y != 0.0;
        let raw = input.pos.add(&total_delta);
        (raw, new_heading, energy, boost, boost_used, attempted, boost_delta)
    };

    let a_alive = a.alive;
    let b_alive = b.alive;
    let a_start = a.pos;
    let b_start = b.pos;

    let (a_raw, a_heading, a_energy, a_boost, a_boost_used, a_attempted, a_boost_delta) = step(a);
    let (b_raw, b_heading, b_energy, b_boost, b_boost_used, b_attempted, b_boost_delta) = step(b);

    let clamp = |p: Vec2| Vec2::new(p.x.clamp(0.0, max), p.y.clamp(0.0, max));
    let a_clamped = clamp(a_raw);
    let b_clamped = clamp(b_raw);
    let a_hit_boundary = a_clamped.x != a_raw.x || a_clamped.y != a_raw.y;
    let b_hit_boundary = b_clamped.x != b_raw.x || b_clamped.y != b_raw.y;

    let mut a_pos = a_clamped;
    let mut b_pos = b_clamped;
    let mut a_blocked = false;
    let mut b_blocked = false;
    if a_alive && b_alive && a_clamped.distance_to(&b_clamped) < 2.0 * ROBOT_COLLISION_RADIUS {
        if a_attempted {
            a_pos = a_start;
            a_blocked = true;
        }
        if b_attempted {
            b_pos = b_start;
            b_blocked = true;
        }
    }

    (
        MovementOutcome {
            pos: a_pos,
            heading: a_heading,
            energy: a_energy,
            boost: a_boost,
            attempted: a_attempted,
            hit_boundary: a_hit_boundary,
            blocked_by_robot: a_blocked,
            boost_used: a_boost_used,
            boost_delta: a_boost_delta,
        },
        MovementOutcome {
            pos: b_pos,
            heading: b_heading,
            energy: b_energy,
            boost: b_boost,
            attempted: b_attempted,
            hit_boundary: b_hit_boundary,
            blocked_by_robot: b_blocked,
            boost_delta: b_boost_delta,
            boost_used: b_boost_used,
        },
    )
}
