//! The sensor/perception model and tick-based physics/combat engine
//! (spec.md §4.2–§4.7, §5, §6), built on `hecs` the way
//! `deterrence-sim` builds its own simulation loop.

pub mod components;
pub mod engine;
pub mod replay;
pub mod result;
pub mod systems;
pub mod world_setup;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use skirmish_core::constants::{ARENA_SIZE_MAX, ARENA_SIZE_MIN, MAX_TICKS_MAX, MAX_TICKS_MIN};
use skirmish_core::error::SimError;
pub use skirmish_lang::{parse_program, Diagnostic, Program};

use crate::engine::BattleEngine;
pub use crate::result::{BattleConfig, BattleResult};

/// Run one battle between two compiled programs to termination
/// (spec.md §6's public entry point).
pub fn simulate(a: &Program, b: &Program, cfg: BattleConfig) -> Result<BattleResult, SimError> {
    if !(ARENA_SIZE_MIN..=ARENA_SIZE_MAX).contains(&cfg.arena_size) {
        return Err(SimError::ArenaSizeOutOfBounds(
            cfg.arena_size,
            ARENA_SIZE_MIN,
            ARENA_SIZE_MAX,
        ));
    }
    if !(MAX_TICKS_MIN..=MAX_TICKS_MAX).contains(&cfg.max_ticks) {
        return Err(SimError::MaxTicksOutOfBounds(
            cfg.max_ticks,
            MAX_TICKS_MIN,
            MAX_TICKS_MAX,
        ));
    }

    let engine = BattleEngine::new(Rc::new(a.clone()), Rc::new(b.clone()), cfg.arena_size);
    Ok(engine.run(cfg.max_ticks))
}
