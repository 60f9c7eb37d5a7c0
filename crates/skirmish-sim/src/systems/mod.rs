//! Per-tick systems, run in the fixed order required by spec.md §5:
//! perception, rules, movement, firing, memory.

pub mod firing;
pub mod memory;
pub mod movement;
pub mod perception;
pub mod rules;
