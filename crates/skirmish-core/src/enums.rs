//! Enumeration types used throughout the arena.

use serde::{Deserialize, Serialize};

/// Identifies one of the two combatants. There are never more than two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotId {
    A,
    B,
}

impl RobotId {
    pub fn other(self) -> RobotId {
        match self {
            RobotId::A => RobotId::B,
            RobotId::B => RobotId::A,
        }
    }
}

/// Cardinal direction derived from heading by quadrant (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Derive the cardinal quadrant from a heading in degrees, normalized
    /// to `[0, 360)` with E=0, S=90, W=180, N=270 (y grows South).
    pub fn from_heading_degrees(degrees: f64) -> Direction {
        let d = degrees.rem_euclid(360.0);
        if !(45.0..315.0).contains(&d) {
            Direction::East
        } else if d < 135.0 {
            Direction::South
        } else if d < 225.0 {
            Direction::West
        } else {
            Direction::North
        }
    }
}

/// A field a `SET` command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlField {
    Throttle,
    Strafe,
    Turn,
}

/// Side-boost direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostDirection {
    Left,
    Right,
}

/// Comparison operator for a numeric condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

/// Boolean combinator for conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

/// Coarse distance classification to the enemy (spec.md §3 Perception).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceBand {
    Near,
    Mid,
    Far,
}

impl DistanceBand {
    pub fn classify(distance: f64) -> DistanceBand {
        if distance <= crate::constants::DISTANCE_BAND_NEAR_MAX {
            DistanceBand::Near
        } else if distance <= crate::constants::DISTANCE_BAND_MID_MAX {
            DistanceBand::Mid
        } else {
            DistanceBand::Far
        }
    }
}

/// Coarse bearing to the enemy relative to the actor's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bearing {
    Front,
    FrontLeft,
    FrontRight,
}

impl Bearing {
    /// Classify from the signed lateral component (positive = right, since
    /// `Vec2::rotated_right` is the +90 degree basis vector) of the
    /// enemy offset in the actor's local frame.
    pub fn classify(lateral: f64) -> Bearing {
        if lateral.abs() <= crate::constants::BEARING_FRONT_LATERAL_THRESHOLD {
            Bearing::Front
        } else if lateral > 0.0 {
            Bearing::FrontRight
        } else {
            Bearing::FrontLeft
        }
    }
}

/// Which of the four boundary walls a ray crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    North,
    East,
    South,
    West,
}

/// Outcome of a completed battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStatus {
    Finished,
    Draw,
}
