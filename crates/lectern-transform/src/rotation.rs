use std::fmt;

use crate::error::TransformError;

/// Quarter turns about each axis, each in `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisRotation {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl AxisRotation {
    pub const NONE: AxisRotation = AxisRotation { x: 0, y: 0, z: 0 };

    /// Builds a rotation from quarter-turn counts, which may be negative or exceed a full turn.
    pub fn from_quarter_turns(x: i32, y: i32, z: i32) -> Self {
        AxisRotation {
            x: x.rem_euclid(4) as u8,
            y: y.rem_euclid(4) as u8,
            z: z.rem_euclid(4) as u8,
        }
    }

    pub fn from_degrees(x: i32, y: i32, z: i32) -> Result<Self, TransformError> {
        let turns = |degrees: i32| {
            if degrees % 90 == 0 {
                Ok(degrees / 90)
            } else {
                Err(TransformError::NotRightAngle(degrees))
            }
        };
        Ok(AxisRotation::from_quarter_turns(turns(x)?, turns(y)?, turns(z)?))
    }

    pub fn around_y(quarter_turns: i32) -> Self {
        AxisRotation::from_quarter_turns(0, quarter_turns, 0)
    }

    pub fn is_identity(&self) -> bool {
        *self == AxisRotation::NONE
    }

    pub fn degrees(&self) -> (i32, i32, i32) {
        (
            i32::from(self.x) * 90,
            i32::from(self.y) * 90,
            i32::from(self.z) * 90,
        )
    }
}

impl fmt::Display for AxisRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, z) = self.degrees();
        write!(f, "x={} y={} z={}", x, y, z)
    }
}
