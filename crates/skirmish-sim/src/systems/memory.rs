//! Post-tick enemy-sighting memory update (spec.md §4.2 `PREV_ENEMY_*` /
//! `TICKS_SINCE_ENEMY_SEEN`).

use skirmish_core::constants::ENEMY_SEEN_SENTINEL;
use skirmish_core::types::Vec2;

use crate::components::{EnemyMemory, PrevEnemy};
use crate::systems::perception::Perception;

/// Update one robot's memory from its post-tick perception and its own
/// post-tick position. Testable property: `ticks_since_enemy_seen` is 0
/// iff `enemy_visible` just now, else the prior value plus one
/// (saturating at the sentinel).
pub fn update(memory: &mut EnemyMemory, perception: &Perception, self_pos: Vec2) {
    match &perception.enemy {
        Some(enemy) if perception.enemy_visible => {
            memory.ticks_since_enemy_seen = 0;
            memory.prev_enemy = Some(PrevEnemy {
                x: self_pos.x + enemy.dx,
                y: self_pos.y + enemy.dy,
                heading: enemy.heading.to_degrees().rem_euclid(360.0),
                dx: enemy.dx,
                dy: enemy.dy,
                distance: enemy.distance,
            });
        }
        _ => {
            memory.ticks_since_enemy_seen =
                (memory.ticks_since_enemy_seen + 1).min(ENEMY_SEEN_SENTINEL);
        }
    }
}
