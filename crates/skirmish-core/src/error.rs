//! Error types reported across crate boundaries.

use thiserror::Error;

/// A script parse failure, carrying the 1-based source line where it was
/// detected. No partial program is ever returned alongside a `Diagnostic`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Simulation preconditions rejected at the driver boundary (spec.md §7).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("arena_size {0} out of bounds [{1}, {2}]")]
    ArenaSizeOutOfBounds(u32, u32, u32),
    #[error("max_ticks {0} out of bounds [{1}, {2}]")]
    MaxTicksOutOfBounds(u32, u32, u32),
}
