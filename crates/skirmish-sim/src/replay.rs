//! Replay frame assembly (spec.md §4.7, §6). Read-only: takes the outputs
//! the engine already computed this tick and never touches the `hecs::World`
//! itself, the same separation `deterrence-sim::systems::snapshot` keeps
//! between "run systems" and "describe the result".

use skirmish_core::enums::RobotId;
use skirmish_core::types::{round4, Vec2};

use crate::result::{
    ActionHintView, BoostSegmentView, ProjectileTraceView, ReplayFrame, RobotPair,
    RobotSnapshotView,
};
use crate::systems::firing::{FireOutcome, ProjectileTrace};
use crate::systems::movement::MovementOutcome;

/// Everything this tick's replay frame is built from, gathered by the
/// engine after `resolve_tick`/`run_tick` but before the next tick starts.
pub struct TickEvents<'a> {
    pub tick: u64,
    pub snapshot: RobotPair<RobotSnapshotView>,
    pub traces: &'a [ProjectileTrace],
    pub pre_pos: RobotPair<Vec2>,
    pub movement: RobotPair<&'a MovementOutcome>,
    pub fire_outcome: RobotPair<FireOutcome>,
    pub kill: RobotPair<bool>,
}

pub fn build_frame(events: TickEvents) -> ReplayFrame {
    let projectile_traces = events.traces.iter().map(ProjectileTraceView::from).collect();
    let boost_segments = build_boost_segments(&events);
    let action_hints = build_action_hints(&events);
    ReplayFrame {
        tick: events.tick,
        snapshot: events.snapshot,
        projectile_traces,
        boost_segments,
        action_hints,
    }
}

fn build_boost_segments(events: &TickEvents) -> Vec<BoostSegmentView> {
    let mut segments = Vec::new();
    push_boost_segment(&mut segments, RobotId::A, events.pre_pos.a, events.movement.a);
    push_boost_segment(&mut segments, RobotId::B, events.pre_pos.b, events.movement.b);
    segments
}

/// `from`/`to` describe the boost burst's own contribution this tick, not
/// the robot's clamped post-collision position — a visual-only segment.
fn push_boost_segment(
    segments: &mut Vec<BoostSegmentView>,
    id: RobotId,
    from: Vec2,
    outcome: &MovementOutcome,
) {
    if let Some(direction) = outcome.boost_used {
        segments.push(BoostSegmentView {
            robot_id: id,
            direction,
            from: Vec2::new(round4(from.x), round4(from.y)),
            to: Vec2::new(
                round4(from.x + outcome.boost_delta.x),
                round4(from.y + outcome.boost_delta.y),
            ),
        });
    }
}

fn build_action_hints(events: &TickEvents) -> Vec<ActionHintView> {
    let mut hints = Vec::new();
    push_hints(&mut hints, RobotId::A, events.movement.a, events.fire_outcome.a, events.kill.b);
    push_hints(&mut hints, RobotId::B, events.movement.b, events.fire_outcome.b, events.kill.a);
    hints
}

fn push_hints(
    hints: &mut Vec<ActionHintView>,
    id: RobotId,
    outcome: &MovementOutcome,
    fire: FireOutcome,
    caused_kill: bool,
) {
    if outcome.hit_boundary {
        hints.push(ActionHintView {
            robot_id: id,
            action: "movement",
            event: "hit_wall".to_string(),
            boost_used: outcome.boost_used,
        });
    }
    if outcome.blocked_by_robot {
        hints.push(ActionHintView {
            robot_id: id,
            action: "movement",
            event: "blocked_by_robot".to_string(),
            boost_used: outcome.boost_used,
        });
    }
    if outcome.boost_used.is_some() {
        hints.push(ActionHintView {
            robot_id: id,
            action: "boost",
            event: "burst".to_string(),
            boost_used: outcome.boost_used,
        });
    }
    if fire == FireOutcome::Fired {
        hints.push(ActionHintView {
            robot_id: id,
            action: "fire",
            event: if caused_kill { "hit".to_string() } else { "fired".to_string() },
            boost_used: None,
        });
    }
}
