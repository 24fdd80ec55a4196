use lectern_logger::Reporter;
use lectern_nbt::{Compound, Tag};

use crate::error::TransformError;
use crate::hook::BlockTransformHook;
use crate::rotation::AxisRotation;

const TILE_ENTITY_ID: &str = "TileEntityCarpentersBlock";
const METADATA: &str = "cbMetadata";

/// Slope shape IDs stored in `cbMetadata`.
pub mod slope {
    pub const WEDGE_SE: i32 = 0;
    pub const WEDGE_NE: i32 = 1;
    pub const WEDGE_NW: i32 = 2;
    pub const WEDGE_SW: i32 = 3;
    pub const WEDGE_NEG_N: i32 = 4;
    pub const WEDGE_NEG_S: i32 = 5;
    pub const WEDGE_NEG_W: i32 = 6;
    pub const WEDGE_NEG_E: i32 = 7;
    pub const WEDGE_POS_N: i32 = 8;
    pub const WEDGE_POS_S: i32 = 9;
    pub const WEDGE_POS_W: i32 = 10;
    pub const WEDGE_POS_E: i32 = 11;
    pub const WEDGE_INT_NEG_SE: i32 = 12;
    pub const WEDGE_INT_NEG_NE: i32 = 13;
    pub const WEDGE_INT_NEG_NW: i32 = 14;
    pub const WEDGE_INT_NEG_SW: i32 = 15;
    pub const WEDGE_INT_POS_SE: i32 = 16;
    pub const WEDGE_INT_POS_NE: i32 = 17;
    pub const WEDGE_INT_POS_NW: i32 = 18;
    pub const WEDGE_INT_POS_SW: i32 = 19;
    pub const WEDGE_EXT_NEG_SE: i32 = 20;
    pub const WEDGE_EXT_NEG_NE: i32 = 21;
    pub const WEDGE_EXT_NEG_NW: i32 = 22;
    pub const WEDGE_EXT_NEG_SW: i32 = 23;
    pub const WEDGE_EXT_POS_SE: i32 = 24;
    pub const WEDGE_EXT_POS_NE: i32 = 25;
    pub const WEDGE_EXT_POS_NW: i32 = 26;
    pub const WEDGE_EXT_POS_SW: i32 = 27;
    pub const OBL_INT_NEG_SE: i32 = 28;
    pub const OBL_INT_NEG_NE: i32 = 29;
    pub const OBL_INT_NEG_NW: i32 = 30;
    pub const OBL_INT_NEG_SW: i32 = 31;
    pub const OBL_INT_POS_SE: i32 = 32;
    pub const OBL_INT_POS_NE: i32 = 33;
    pub const OBL_INT_POS_NW: i32 = 34;
    pub const OBL_INT_POS_SW: i32 = 35;
    pub const OBL_EXT_NEG_SE: i32 = 36;
    pub const OBL_EXT_NEG_NE: i32 = 37;
    pub const OBL_EXT_NEG_NW: i32 = 38;
    pub const OBL_EXT_NEG_SW: i32 = 39;
    pub const OBL_EXT_POS_SE: i32 = 40;
    pub const OBL_EXT_POS_NE: i32 = 41;
    pub const OBL_EXT_POS_NW: i32 = 42;
    pub const OBL_EXT_POS_SW: i32 = 43;
    pub const PRISM_NEG: i32 = 44;
    pub const PRISM_POS: i32 = 45;
    pub const PRISM_1P_POS_N: i32 = 46;
    pub const PRISM_1P_POS_S: i32 = 47;
    pub const PRISM_1P_POS_W: i32 = 48;
    pub const PRISM_1P_POS_E: i32 = 49;
    pub const PRISM_2P_POS_NS: i32 = 50;
    pub const PRISM_2P_POS_WE: i32 = 51;
    pub const PRISM_2P_POS_SE: i32 = 52;
    pub const PRISM_2P_POS_NE: i32 = 53;
    pub const PRISM_2P_POS_NW: i32 = 54;
    pub const PRISM_2P_POS_SW: i32 = 55;
    pub const PRISM_3P_POS_NWE: i32 = 56;
    pub const PRISM_3P_POS_SWE: i32 = 57;
    pub const PRISM_3P_POS_NSW: i32 = 58;
    pub const PRISM_3P_POS_NSE: i32 = 59;
    pub const PRISM_POS_4P: i32 = 60;
    pub const PRISM_WEDGE_POS_N: i32 = 61;
    pub const PRISM_WEDGE_POS_S: i32 = 62;
    pub const PRISM_WEDGE_POS_W: i32 = 63;
    pub const PRISM_WEDGE_POS_E: i32 = 64;
}

use slope::*;

/// Each group lists the shapes one quarter turn about Y apart, in turning order.
const ROTATION_GROUPS: [&[i32]; 17] = [
    &[WEDGE_SE, WEDGE_NE, WEDGE_NW, WEDGE_SW],
    &[WEDGE_NEG_N, WEDGE_NEG_W, WEDGE_NEG_S, WEDGE_NEG_E],
    &[WEDGE_POS_N, WEDGE_POS_W, WEDGE_POS_S, WEDGE_POS_E],
    &[WEDGE_INT_NEG_SE, WEDGE_INT_NEG_NE, WEDGE_INT_NEG_NW, WEDGE_INT_NEG_SW],
    &[WEDGE_INT_POS_SE, WEDGE_INT_POS_NE, WEDGE_INT_POS_NW, WEDGE_INT_POS_SW],
    &[WEDGE_EXT_NEG_SE, WEDGE_EXT_NEG_NE, WEDGE_EXT_NEG_NW, WEDGE_EXT_NEG_SW],
    &[WEDGE_EXT_POS_SE, WEDGE_EXT_POS_NE, WEDGE_EXT_POS_NW, WEDGE_EXT_POS_SW],
    &[OBL_INT_NEG_SE, OBL_INT_NEG_NE, OBL_INT_NEG_NW, OBL_INT_NEG_SW],
    &[OBL_INT_POS_SE, OBL_INT_POS_NE, OBL_INT_POS_NW, OBL_INT_POS_SW],
    &[OBL_EXT_NEG_SE, OBL_EXT_NEG_NE, OBL_EXT_NEG_NW, OBL_EXT_NEG_SW],
    &[OBL_EXT_POS_SE, OBL_EXT_POS_NE, OBL_EXT_POS_NW, OBL_EXT_POS_SW],
    &[PRISM_NEG, PRISM_POS],
    &[PRISM_1P_POS_N, PRISM_1P_POS_W, PRISM_1P_POS_S, PRISM_1P_POS_E],
    &[PRISM_2P_POS_SE, PRISM_2P_POS_NE, PRISM_2P_POS_NW, PRISM_2P_POS_SW],
    &[PRISM_3P_POS_NWE, PRISM_3P_POS_NSW, PRISM_3P_POS_SWE, PRISM_3P_POS_NSE],
    &[PRISM_POS_4P],
    &[PRISM_WEDGE_POS_N, PRISM_WEDGE_POS_W, PRISM_WEDGE_POS_S, PRISM_WEDGE_POS_E],
];

/// Advances `shape` by `ticks` positions within its rotation group.
fn rotate_shape(shape: i32, ticks: u8) -> Option<i32> {
    ROTATION_GROUPS.iter().find_map(|group| {
        let position = group.iter().position(|&member| member == shape)?;
        Some(group[(position + usize::from(ticks)) % group.len()])
    })
}

/// Rotates Carpenter's Blocks slopes about the vertical axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct CarpentersBlocksHook;

impl BlockTransformHook for CarpentersBlocksHook {
    fn tile_entity_id(&self) -> &str {
        TILE_ENTITY_ID
    }

    fn transform(
        &self,
        nbt: &Compound,
        rotation: AxisRotation,
        reporter: &dyn Reporter,
    ) -> Result<Option<Compound>, TransformError> {
        if rotation.x != 0 {
            reporter.warn("X rotation of Carpenter's Blocks is unsupported, ignoring it");
        }
        if rotation.z != 0 {
            reporter.warn("Z rotation of Carpenter's Blocks is unsupported, ignoring it");
        }
        if rotation.y == 0 {
            return Ok(None);
        }

        let (shape, short) = match nbt.get(METADATA) {
            Some(Tag::Short(value)) => (i32::from(*value), true),
            Some(Tag::Int(value)) => (*value, false),
            Some(other) => {
                return Err(TransformError::FieldType {
                    field: METADATA,
                    expected: "TAG_Short or TAG_Int",
                    found: other.tag_type(),
                })
            }
            // Absent metadata is the default wedge
            None => (slope::WEDGE_SE, true),
        };

        let Some(rotated) = rotate_shape(shape, rotation.y) else {
            reporter.warn(&format!("Unknown Carpenter's Blocks slope {}, leaving it unrotated", shape));
            return Ok(None);
        };

        let mut nbt = nbt.clone();
        let value = if short {
            Tag::Short(rotated as i16)
        } else {
            Tag::Int(rotated)
        };
        nbt.insert(METADATA, value);
        Ok(Some(nbt))
    }
}
