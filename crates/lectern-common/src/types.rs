use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// An integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockVector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector {
    pub const ZERO: BlockVector = BlockVector { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        BlockVector { x, y, z }
    }
}

impl Add for BlockVector {
    type Output = BlockVector;

    fn add(self, other: BlockVector) -> BlockVector {
        BlockVector::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}

impl Sub for BlockVector {
    type Output = BlockVector;

    fn sub(self, other: BlockVector) -> BlockVector {
        BlockVector::new(
            self.x.wrapping_sub(other.x),
            self.y.wrapping_sub(other.y),
            self.z.wrapping_sub(other.z),
        )
    }
}

impl fmt::Display for BlockVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Rotation {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Rotation { yaw, pitch }
    }
}

/// An axis-aligned box of blocks: a minimum corner plus a size along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub min: BlockVector,
    pub width: u32,
    pub height: u32,
    pub length: u32,
}

impl Region {
    pub const fn new(min: BlockVector, width: u32, height: u32, length: u32) -> Self {
        Region {
            min,
            width,
            height,
            length,
        }
    }

    /// The inclusive maximum corner. Meaningless for an empty region.
    pub fn max(&self) -> BlockVector {
        self.min
            + BlockVector::new(
                self.width as i32 - 1,
                self.height as i32 - 1,
                self.length as i32 - 1,
            )
    }

    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.volume() == 0
    }

    pub fn contains(&self, position: BlockVector) -> bool {
        self.index_of(position).is_some()
    }

    /// Flat index of an absolute position, laid out as `y * width * length + z * width + x`.
    pub fn index_of(&self, position: BlockVector) -> Option<usize> {
        let relative = position - self.min;
        let x = u32::try_from(relative.x).ok().filter(|&x| x < self.width)?;
        let y = u32::try_from(relative.y).ok().filter(|&y| y < self.height)?;
        let z = u32::try_from(relative.z).ok().filter(|&z| z < self.length)?;
        let (width, length) = (self.width as usize, self.length as usize);
        Some(y as usize * width * length + z as usize * width + x as usize)
    }

    /// Position relative to the minimum corner of the cell at `index`.
    pub fn relative_position(&self, index: usize) -> BlockVector {
        let width = self.width.max(1) as usize;
        let layer = width * self.length.max(1) as usize;
        BlockVector::new(
            (index % width) as i32,
            (index / layer) as i32,
            (index % layer / width) as i32,
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{} at {}",
            self.width, self.height, self.length, self.min
        )
    }
}
