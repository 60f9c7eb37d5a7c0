//! Spawn intents, cooldown gate, projectile advance, hit detection, and
//! pending-kill application (spec.md §4.6).

use skirmish_core::constants::{
    DT, FIRE_COOLDOWN_TICKS, FIRE_ENERGY_COST, PROJECTILE_TICKS_PER_TILE, SHOT_HIT_RADIUS,
    SHOT_RANGE,
};
use skirmish_core::enums::{Direction, RobotId};
use skirmish_core::types::Vec2;

use crate::components::Projectile;
use crate::systems::perception::cast_ray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    NotRequested,
    CooldownBlocked,
    NoEnergy,
    Fired,
}

pub struct FireActorInput {
    pub id: RobotId,
    pub pos: Vec2,
    pub heading: f64,
    pub alive: bool,
    pub energy: f64,
    pub fire_cooldown: u32,
    pub fire_requested: bool,
}

pub struct FireActorResult {
    pub energy: f64,
    pub fire_cooldown: u32,
    pub outcome: FireOutcome,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTrace {
    pub shooter: RobotId,
    pub target: RobotId,
    pub from: Vec2,
    pub to: Vec2,
    pub cardinal: Direction,
    pub range: f64,
    pub hit: bool,
}

pub struct FireTickOutcome {
    pub a: FireActorResult,
    pub b: FireActorResult,
    pub traces: Vec<ProjectileTrace>,
    pub kill_a: bool,
    pub kill_b: bool,
}

fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b.sub(&a);
    let len2 = ab.dot(&ab);
    if len2 < 1e-12 {
        return point.distance_to(&a);
    }
    let t = (point.sub(&a).dot(&ab) / len2).clamp(0.0, 1.0);
    let proj = a.add(&ab.scale(t));
    point.distance_to(&proj)
}

/// Cooldown tick-down plus the spawn gate for one actor. Only decrements
/// the cooldown, and only considers firing, if the actor is alive.
fn spawn_intent(input: &FireActorInput) -> (u32, f64, FireOutcome, Option<Projectile>) {
    if !input.alive {
        return (input.fire_cooldown, input.energy, FireOutcome::NotRequested, None);
    }
    let cooldown = input.fire_cooldown.saturating_sub(1);
    if !input.fire_requested {
        return (cooldown, input.energy, FireOutcome::NotRequested, None);
    }
    if cooldown > 0 {
        return (cooldown, input.energy, FireOutcome::CooldownBlocked, None);
    }
    if input.energy < FIRE_ENERGY_COST {
        return (cooldown, input.energy, FireOutcome::NoEnergy, None);
    }
    let energy = input.energy - FIRE_ENERGY_COST;
    let target = input.id.other();
    let projectile = Projectile {
        shooter: input.id,
        target,
        pos: input.pos,
        direction: Vec2::from_heading(input.heading),
        spawn_cardinal: Direction::from_heading_degrees(input.heading.to_degrees()),
        traveled: 0.0,
        max_range: SHOT_RANGE,
    };
    (FIRE_COOLDOWN_TICKS, energy, FireOutcome::Fired, Some(projectile))
}

/// Run the full firing phase for one tick: spawn this tick's shots,
/// advance every in-flight projectile (including ones from earlier
/// ticks), and report hits. `projectiles` is the engine's scratch buffer,
/// updated in place to contain only the survivors.
pub fn run_tick(
    arena_size: u32,
    a: FireActorInput,
    b: FireActorInput,
    projectiles: &mut Vec<Projectile>,
) -> FireTickOutcome {
    let (a_cooldown, a_energy, a_outcome, a_spawn) = spawn_intent(&a);
    let (b_cooldown, b_energy, b_outcome, b_spawn) = spawn_intent(&b);
    if let Some(p) = a_spawn {
        projectiles.push(p);
    }
    if let Some(p) = b_spawn {
        projectiles.push(p);
    }

    let projectile_speed = 1.0 / (PROJECTILE_TICKS_PER_TILE * DT);
    let mut traces = Vec::new();
    let mut kill_a = false;
    let mut kill_b = false;
    let mut survivors = Vec::with_capacity(projectiles.len());

    for mut p in projectiles.drain(..) {
        let (target_pos, target_alive, already_pending) = match p.target {
            RobotId::A => (a.pos, a.alive, kill_a),
            RobotId::B => (b.pos, b.alive, kill_b),
        };
        let from = p.pos;
        let remaining_range = p.max_range - p.traveled;
        let wall_hit = cast_ray(p.pos, p.direction, arena_size);
        let step = (projectile_speed * DT).min(remaining_range).min(wall_hit.distance);
        let endpoint = p.pos.add(&p.direction.scale(step));
        let hit = target_alive
            && !already_pending
            && point_segment_distance(target_pos, from, endpoint) <= SHOT_HIT_RADIUS;

        if hit {
            traces.push(ProjectileTrace {
                shooter: p.shooter,
                target: p.target,
                from,
                to: target_pos,
                cardinal: p.spawn_cardinal,
                range: p.max_range,
                hit: true,
            });
            match p.target {
                RobotId::A => kill_a = true,
                RobotId::B => kill_b = true,
            }
            continue;
        }

        traces.push(ProjectileTrace {
            shooter: p.shooter,
            target: p.target,
            from,
            to: endpoint,
            cardinal: p.spawn_cardinal,
            range: p.max_range,
            hit: false,
        });

        let retiring = step >= remaining_range - 1e-9 || step >= wall_hit.distance - 1e-9;
        if !retiring {
            p.pos = endpoint;
            p.traveled += step;
            survivors.push(p);
        }
    }
    *projectiles = survivors;

    FireTickOutcome {
        a: FireActorResult {
            energy: a_energy,
            fire_cooldown: a_cooldown,
            outcome: a_outcome,
        },
        b: FireActorResult {
            energy: b_energy,
            fire_cooldown: b_cooldown,
            outcome: b_outcome,
        },
        traces,
        kill_a,
        kill_b,
    }
}
