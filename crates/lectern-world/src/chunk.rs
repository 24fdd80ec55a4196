use std::collections::HashMap;

use once_cell::unsync::OnceCell;

use lectern_common::{BlockCell, BlockVector};
use lectern_nbt::{Compound, List, Tag, TagType};

use crate::error::ChunkError;

pub const CHUNK_WIDTH: i32 = 16;
pub const CHUNK_HEIGHT: i32 = 128;
pub const BLOCK_COUNT: usize = (CHUNK_WIDTH * CHUNK_WIDTH * CHUNK_HEIGHT) as usize;

/// A single chunk in the oldest on-disk layout: flat id and nibble data
/// arrays indexed `y + z * 128 + x * 128 * 16`.
#[derive(Debug)]
pub struct LegacyChunk {
    root: Compound,
    blocks: Vec<u8>,
    data: Vec<u8>,
    origin_x: i32,
    origin_z: i32,
    tile_entities: OnceCell<HashMap<BlockVector, Compound>>,
}

impl LegacyChunk {
    pub fn new(root: &Compound) -> Result<Self, ChunkError> {
        let blocks = required(root, "Blocks", TagType::ByteArray, Tag::as_byte_array)?;
        let data = required(root, "Data", TagType::ByteArray, Tag::as_byte_array)?;
        let origin_x = required(root, "xPos", TagType::Int, Tag::as_i32)?;
        let origin_z = required(root, "zPos", TagType::Int, Tag::as_i32)?;

        if blocks.len() != BLOCK_COUNT {
            return Err(ChunkError::Format(format!(
                "Blocks array expected to be {} bytes; found {}",
                BLOCK_COUNT,
                blocks.len()
            )));
        }
        if data.len() != BLOCK_COUNT / 2 {
            return Err(ChunkError::Format(format!(
                "Data array expected to be {} bytes; found {}",
                BLOCK_COUNT / 2,
                data.len()
            )));
        }

        Ok(LegacyChunk {
            root: root.clone(),
            blocks: blocks.to_vec(),
            data: data.to_vec(),
            origin_x,
            origin_z,
            tile_entities: OnceCell::new(),
        })
    }

    /// Chunk coordinates as stored in `xPos`/`zPos`.
    pub fn coordinates(&self) -> (i32, i32) {
        (self.origin_x, self.origin_z)
    }

    pub fn block_id(&self, position: BlockVector) -> Result<u16, ChunkError> {
        match self.index_of(position)? {
            Some(index) => Ok(u16::from(self.blocks[index])),
            None => Ok(0),
        }
    }

    pub fn block_data(&self, position: BlockVector) -> Result<u16, ChunkError> {
        let Some(index) = self.index_of(position)? else {
            return Ok(0);
        };
        let packed = self.data[index / 2];
        let nibble = if index % 2 == 0 { packed & 0x0F } else { packed >> 4 };
        Ok(u16::from(nibble))
    }

    /// The cell at a world position, with its tile-entity record attached.
    pub fn block(&self, position: BlockVector) -> Result<BlockCell, ChunkError> {
        let id = self.block_id(position)?;
        let data = self.block_data(position)?;
        let mut cell = BlockCell::new(id, data);
        if let Some(nbt) = self.tile_entities()?.get(&position) {
            cell = cell.with_nbt(nbt.clone());
        }
        Ok(cell)
    }

    /// Tile-entity records keyed by their absolute `x,y,z`, built on first use.
    pub fn tile_entities(&self) -> Result<&HashMap<BlockVector, Compound>, ChunkError> {
        self.tile_entities
            .get_or_try_init(|| index_tile_entities(&self.root))
    }

    /// `None` marks the space above the build limit, which reads as air.
    fn index_of(&self, position: BlockVector) -> Result<Option<usize>, ChunkError> {
        if position.y >= CHUNK_HEIGHT {
            return Ok(None);
        }
        let x = i64::from(position.x) - i64::from(self.origin_x) * i64::from(CHUNK_WIDTH);
        let z = i64::from(position.z) - i64::from(self.origin_z) * i64::from(CHUNK_WIDTH);
        let y = i64::from(position.y);
        let width = i64::from(CHUNK_WIDTH);
        if !(0..width).contains(&x) || !(0..width).contains(&z) || y < 0 {
            return Err(ChunkError::OutOfChunk(position));
        }
        let height = i64::from(CHUNK_HEIGHT);
        Ok(Some((y + z * height + x * height * width) as usize))
    }
}

fn index_tile_entities(root: &Compound) -> Result<HashMap<BlockVector, Compound>, ChunkError> {
    let list: &List = required(root, "TileEntities", TagType::List, Tag::as_list)?;
    let mut tile_entities = HashMap::with_capacity(list.len());
    for tag in list {
        let Tag::Compound(record) = tag else {
            return Err(ChunkError::Format(format!(
                "compound expected in TileEntities, found {}",
                tag.tag_type()
            )));
        };
        let coordinate = |key| record.get_int(key).unwrap_or(0);
        let position = BlockVector::new(coordinate("x"), coordinate("y"), coordinate("z"));
        tile_entities.insert(position, record.clone());
    }
    log::debug!("indexed {} tile entities", tile_entities.len());
    Ok(tile_entities)
}

pub(crate) fn required<'t, T>(
    compound: &'t Compound,
    key: &str,
    expected: TagType,
    extract: impl Fn(&'t Tag) -> Option<T>,
) -> Result<T, ChunkError> {
    let tag = compound
        .get(key)
        .ok_or_else(|| ChunkError::MissingTag(key.to_string()))?;
    extract(tag).ok_or_else(|| ChunkError::WrongTagType {
        key: key.to_string(),
        expected,
        found: tag.tag_type(),
    })
}
