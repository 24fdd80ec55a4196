//! Tag names and packing rules of the Alpha schematic layout.

pub const ROOT_NAME: &str = "Schematic";
pub const MATERIALS_ALPHA: &str = "Alpha";

/// Largest size along one axis; dimensions are stored as unsigned shorts.
pub const MAX_SIZE: u32 = 65535;

/// Highest block ID the Blocks and AddBlocks planes can hold together.
pub const MAX_BLOCK_ID: u16 = 0x0FFF;

pub const WIDTH: &str = "Width";
pub const HEIGHT: &str = "Height";
pub const LENGTH: &str = "Length";
pub const MATERIALS: &str = "Materials";
pub const BLOCKS: &str = "Blocks";
pub const DATA: &str = "Data";
pub const ADD_BLOCKS: &str = "AddBlocks";
pub const ADD_BLOCKS_2: &str = "AddBlocks2";
pub const EXTRA_DATA: &str = "ExtraData";
pub const ADD_DATA: &str = "AddData";
pub const ORIGIN: [&str; 3] = ["WEOriginX", "WEOriginY", "WEOriginZ"];
pub const OFFSET: [&str; 3] = ["WEOffsetX", "WEOffsetY", "WEOffsetZ"];
pub const TILE_ENTITIES: &str = "TileEntities";
pub const ENTITIES: &str = "Entities";
pub const BLOCK_MAPPING: &str = "BlockMapping";
pub const ITEM_MAPPING: &str = "ItemMapping";

/// Reads the 4-bit value for `index` from a nibble-packed plane.
/// Even indices use the low nibble, odd indices the high one.
pub fn nibble(plane: &[u8], index: usize) -> Option<u8> {
    plane.get(index >> 1).map(|&byte| {
        if index & 1 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    })
}

pub fn set_nibble(plane: &mut [u8], index: usize, value: u8) {
    if let Some(byte) = plane.get_mut(index >> 1) {
        *byte = if index & 1 == 0 {
            (*byte & 0xF0) | (value & 0x0F)
        } else {
            (*byte & 0x0F) | ((value & 0x0F) << 4)
        };
    }
}

/// Size of a nibble plane covering `volume` cells.
pub fn nibble_plane_len(volume: usize) -> usize {
    (volume + 1) / 2
}
