//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position/vector in arena space (tiles). x grows East, y grows South.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Vec2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn scale(&self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }

    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: &Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    /// Unit vector for a heading in radians (0 = East, rotates clockwise
    /// in screen coordinates since y grows South).
    pub fn from_heading(heading: f64) -> Vec2 {
        Vec2::new(heading.cos(), heading.sin())
    }

    /// This vector rotated by +90 degrees (heading's "right" basis vector).
    pub fn rotated_right(&self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Round a value to 4 decimal places, per spec.md's numeric hygiene rule for
/// positions, energy, and deltas. NaN/Inf pass through unchanged; callers
/// that need the "unavailable" treatment should check `is_finite()` first.
pub fn round4(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 10_000.0).round() / 10_000.0
}

/// Round a value to 2 decimal places, used for headings and distances.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0).round() / 100.0
}
