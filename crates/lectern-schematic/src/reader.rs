use std::collections::HashMap;
use std::io::Read;

use lectern_common::{
    BlockCell, BlockStore, BlockVector, PlacedEntity, Position, Region, Registry, Rotation,
};
use lectern_logger::{LogReporter, LogSeverity, Reporter};
use lectern_nbt::{Compound, List, NbtFile, Tag, TagType};

use crate::clipboard::Clipboard;
use crate::error::{FormatError, SchematicError};
use crate::format::{self, nibble};
use crate::items::convert_ids;
use crate::remap::{Conversion, RemapTable};

/// A decoded schematic together with the number of cells the store refused.
#[derive(Debug)]
pub struct ReadOutcome<S> {
    pub store: S,
    pub failed_placements: usize,
}

/// Decodes Alpha schematics against a registry.
pub struct SchematicReader<'a> {
    registry: &'a dyn Registry,
    reporter: &'a dyn Reporter,
}

impl<'a> SchematicReader<'a> {
    pub fn new(registry: &'a dyn Registry, reporter: &'a dyn Reporter) -> Self {
        SchematicReader { registry, reporter }
    }

    pub fn read(&self, file: &NbtFile) -> Result<Clipboard, SchematicError> {
        let outcome = self.read_into(file, Clipboard::with_origin)?;
        Ok(outcome.store)
    }

    /// Decodes `file` into a store allocated by `make_store` for the decoded
    /// region and origin.
    pub fn read_into<S, F>(&self, file: &NbtFile, make_store: F) -> Result<ReadOutcome<S>, SchematicError>
    where
        S: BlockStore,
        F: FnOnce(Region, BlockVector) -> S,
    {
        if file.name != format::ROOT_NAME {
            return Err(FormatError::WrongRootName(file.name.clone()).into());
        }
        let schematic = file.root.as_compound().ok_or_else(|| FormatError::WrongTagType {
            key: format::ROOT_NAME.to_string(),
            expected: TagType::Compound,
            found: file.root.tag_type(),
        })?;

        if !schematic.contains_key(format::BLOCKS) {
            return Err(FormatError::MissingTag(format::BLOCKS.to_string()).into());
        }
        let materials = required(schematic, format::MATERIALS, TagType::String, Tag::as_string)?;
        if materials != format::MATERIALS_ALPHA {
            return Err(FormatError::UnsupportedMaterials(materials.to_string()).into());
        }

        let width = required(schematic, format::WIDTH, TagType::Short, Tag::as_i16)? as u16;
        let height = required(schematic, format::HEIGHT, TagType::Short, Tag::as_i16)? as u16;
        let length = required(schematic, format::LENGTH, TagType::Short, Tag::as_i16)? as u16;
        let (min, origin) = read_origin(schematic);
        let region = Region::new(min, width.into(), height.into(), length.into());
        let volume = region.volume();

        let blocks = required_array(schematic, format::BLOCKS, volume)?;
        let data = required_array(schematic, format::DATA, volume)?;
        let extra_data = schematic
            .get_byte_array(format::EXTRA_DATA)
            .or_else(|| schematic.get_byte_array(format::ADD_DATA));
        let add_blocks = schematic.get_byte_array(format::ADD_BLOCKS);
        let add_blocks_2 = schematic.get_byte_array(format::ADD_BLOCKS_2);

        let table = RemapTable::from_mapping_tags(
            schematic.get_compound(format::BLOCK_MAPPING),
            schematic.get_compound(format::ITEM_MAPPING),
        )?;
        let conversion = table.conversion_into(self.registry, self.reporter);

        let mut tile_entities = read_tile_entities(schematic, &conversion)?;
        let entities = read_entities(schematic);

        let mut store = make_store(region, origin);
        let mut failures = PlacementFailures::new(self.reporter);

        for index in 0..volume {
            let mut id = u16::from(blocks[index]);
            for plane in [add_blocks, add_blocks_2].into_iter().flatten() {
                if let Some(bits) = nibble(plane, index) {
                    id = (id & 0x00FF) | (u16::from(bits) << 8);
                }
            }
            if conversion.has_blocks() {
                id = conversion.block(id);
            }

            let mut value = u16::from(data[index]);
            if let Some(&extra) = extra_data.and_then(|extra| extra.get(index)) {
                value |= u16::from(extra) << 8;
            }

            let relative = region.relative_position(index);
            let cell = BlockCell {
                id,
                data: value,
                nbt: tile_entities.remove(&relative),
            };
            let position = min + relative;
            if let Err(err) = store.set_block(position, cell) {
                failures.record(&format!("Failed to place block at {}: {}", position, err));
            }
        }

        if !tile_entities.is_empty() {
            log::debug!(
                "Dropped {} tile entities positioned outside the schematic",
                tile_entities.len()
            );
        }

        for entity in entities {
            let type_id = entity.type_id.clone();
            if let Err(err) = store.add_entity(entity) {
                failures.record(&format!("Failed to create entity {}: {}", type_id, err));
            }
        }

        if failures.count > 0 {
            log::debug!("{} placements failed while reading schematic", failures.count);
        }
        Ok(ReadOutcome {
            store,
            failed_placements: failures.count,
        })
    }
}

/// Counts placement failures, reporting only the first two.
struct PlacementFailures<'r> {
    reporter: &'r dyn Reporter,
    count: usize,
}

impl<'r> PlacementFailures<'r> {
    fn new(reporter: &'r dyn Reporter) -> Self {
        PlacementFailures { reporter, count: 0 }
    }

    fn record(&mut self, message: &str) {
        self.count += 1;
        match self.count {
            1 => self.reporter.report(LogSeverity::Warning, message),
            2 => self.reporter.report(
                LogSeverity::Warning,
                &format!("{} (no more placement failures will be reported)", message),
            ),
            _ => {}
        }
    }
}

fn required<'t, T>(
    schematic: &'t Compound,
    key: &str,
    expected: TagType,
    extract: impl Fn(&'t Tag) -> Option<T>,
) -> Result<T, FormatError> {
    let tag = schematic
        .get(key)
        .ok_or_else(|| FormatError::MissingTag(key.to_string()))?;
    extract(tag).ok_or_else(|| FormatError::WrongTagType {
        key: key.to_string(),
        expected,
        found: tag.tag_type(),
    })
}

fn required_array<'t>(schematic: &'t Compound, key: &str, volume: usize) -> Result<&'t [u8], FormatError> {
    let bytes = required(schematic, key, TagType::ByteArray, Tag::as_byte_array)?;
    if bytes.len() != volume {
        return Err(FormatError::ArrayLength {
            key: key.to_string(),
            expected: volume,
            found: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Region minimum and origin. Both are zero unless all six anchor fields are ints.
fn read_origin(schematic: &Compound) -> (BlockVector, BlockVector) {
    let vector = |keys: [&str; 3]| -> Option<BlockVector> {
        Some(BlockVector::new(
            schematic.get_int(keys[0])?,
            schematic.get_int(keys[1])?,
            schematic.get_int(keys[2])?,
        ))
    };
    match (vector(format::ORIGIN), vector(format::OFFSET)) {
        (Some(min), Some(offset)) => (min, min - offset),
        _ => (BlockVector::ZERO, BlockVector::ZERO),
    }
}

fn read_tile_entities(
    schematic: &Compound,
    conversion: &Conversion,
) -> Result<HashMap<BlockVector, Compound>, FormatError> {
    let list = required(schematic, format::TILE_ENTITIES, TagType::List, Tag::as_list)?;
    let mut tile_entities = HashMap::with_capacity(list.len());
    for record in list.compounds() {
        let mut nbt = record.clone();
        let mut coordinate = |key: &str| match nbt.remove(key) {
            Some(Tag::Int(value)) => value,
            _ => 0,
        };
        let position = BlockVector::new(coordinate("x"), coordinate("y"), coordinate("z"));
        // The writer fills in an empty id for trees that had none
        if nbt.get_str("id") == Some("") {
            nbt.remove("id");
        }
        if conversion.has_items() {
            nbt = convert_ids(&nbt, conversion);
        }
        tile_entities.insert(position, nbt);
    }
    Ok(tile_entities)
}

fn read_entities(schematic: &Compound) -> Vec<PlacedEntity> {
    let Some(list) = schematic.get_list(format::ENTITIES) else {
        return Vec::new();
    };
    list.compounds().filter_map(read_entity).collect()
}

fn read_entity(record: &Compound) -> Option<PlacedEntity> {
    let type_id = record.get_str("id").unwrap_or_default();
    if type_id.is_empty() {
        return None;
    }

    let position = record
        .get_list("Pos")
        .map(|pos| Position::new(pos.float_at(0), pos.float_at(1), pos.float_at(2)))
        .unwrap_or_default();
    let rotation = record
        .get_list("Rotation")
        .map(|rot: &List| Rotation::new(rot.float_at(0) as f32, rot.float_at(1) as f32))
        .unwrap_or_default();

    let mut nbt = record.clone();
    for key in ["id", "Pos", "Rotation"] {
        nbt.remove(key);
    }
    Some(PlacedEntity {
        type_id: type_id.to_string(),
        position,
        rotation,
        nbt: (!nbt.is_empty()).then_some(nbt),
    })
}

/// Decodes an uncompressed schematic stream, logging diagnostics.
pub fn read_schematic<R: Read>(reader: &mut R, registry: &dyn Registry) -> Result<Clipboard, SchematicError> {
    let file = NbtFile::read(reader)?;
    SchematicReader::new(registry, &LogReporter).read(&file)
}

/// Decodes a gzip-compressed schematic stream, logging diagnostics.
pub fn read_schematic_gzip<R: Read>(
    reader: &mut R,
    registry: &dyn Registry,
) -> Result<Clipboard, SchematicError> {
    let file = NbtFile::read_gzip(reader)?;
    SchematicReader::new(registry, &LogReporter).read(&file)
}
