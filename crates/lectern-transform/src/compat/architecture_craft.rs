use lectern_logger::Reporter;
use lectern_nbt::{Compound, Tag};

use crate::error::TransformError;
use crate::hook::BlockTransformHook;
use crate::rotation::AxisRotation;

const TILE_ENTITY_ID: &str = "gcewing.shape";
const SIDE: &str = "side";
const TURN: &str = "turn";

const DOWN: i8 = 0;
const UP: i8 = 1;
const NORTH: i8 = 2;
const SOUTH: i8 = 3;
const WEST: i8 = 4;
const EAST: i8 = 5;

const Y_CYCLE: [i8; 4] = [NORTH, EAST, SOUTH, WEST];
const X_CYCLE: [i8; 4] = [DOWN, SOUTH, UP, NORTH];
const Z_CYCLE: [i8; 4] = [DOWN, EAST, UP, WEST];

/// Rotates ArchitectureCraft shapes, which record the face they are attached
/// to (`side`) and a quarter-turn about that face (`turn`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchitectureCraftHook;

fn cycle_index(cycle: &[i8; 4], side: i8) -> Result<usize, TransformError> {
    cycle
        .iter()
        .position(|&member| member == side)
        .ok_or(TransformError::UnknownSide(side))
}

fn turned(turn: i8, ticks: i8) -> i8 {
    (i32::from(turn) + i32::from(ticks)).rem_euclid(4) as i8
}

fn read_byte(nbt: &Compound, field: &'static str) -> Result<i8, TransformError> {
    match nbt.get(field) {
        Some(Tag::Byte(value)) => Ok(*value),
        Some(other) => Err(TransformError::FieldType {
            field,
            expected: "TAG_Byte",
            found: other.tag_type(),
        }),
        None => Ok(0),
    }
}

/// Applies `rotation` to a `(side, turn)` pair. X and Z turn the opposite way
/// to this mod's own convention, so they are mirrored first.
fn rotate(side: i8, turn: i8, rotation: AxisRotation) -> Result<(i8, i8), TransformError> {
    if !(DOWN..=EAST).contains(&side) {
        return Err(TransformError::UnknownSide(side));
    }
    let (mut side, mut turn) = (side, turn);
    let x = ((4 - rotation.x) % 4) as i8;
    let y = rotation.y as i8;
    let z = ((4 - rotation.z) % 4) as i8;

    if y > 0 {
        match side {
            DOWN => turn = turned(turn, y),
            UP => turn = turned(turn, -y),
            _ => {
                let index = cycle_index(&Y_CYCLE, side)?;
                side = Y_CYCLE[(index + 4 - y as usize) % 4];
            }
        }
    }
    if x > 0 {
        match side {
            WEST => turn = turned(turn, x),
            EAST => turn = turned(turn, -x),
            _ => {
                let index = cycle_index(&X_CYCLE, side)?;
                side = X_CYCLE[(index + x as usize) % 4];
                if side == SOUTH {
                    turn = turned(turn, 2);
                }
            }
        }
    }
    if z > 0 {
        match side {
            SOUTH => turn = turned(turn, z),
            NORTH => turn = turned(turn, -z),
            _ => {
                let index = cycle_index(&Z_CYCLE, side)?;
                side = Z_CYCLE[(index + 4 - z as usize) % 4];
                turn = turned(turn, -z);
            }
        }
    }
    Ok((side, turn))
}

impl BlockTransformHook for ArchitectureCraftHook {
    fn tile_entity_id(&self) -> &str {
        TILE_ENTITY_ID
    }

    fn transform(
        &self,
        nbt: &Compound,
        rotation: AxisRotation,
        _reporter: &dyn Reporter,
    ) -> Result<Option<Compound>, TransformError> {
        if rotation.is_identity() {
            return Ok(None);
        }
        let (side, turn) = rotate(read_byte(nbt, SIDE)?, read_byte(nbt, TURN)?, rotation)?;

        let mut nbt = nbt.clone();
        nbt.insert(SIDE, Tag::Byte(side));
        nbt.insert(TURN, Tag::Byte(turn));
        Ok(Some(nbt))
    }
}
