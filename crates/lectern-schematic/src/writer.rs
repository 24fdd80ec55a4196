use std::io::Write;

use lectern_common::{PlacedEntity, Position, Registry};
use lectern_logger::{LogReporter, LogSeverity, Reporter};
use lectern_nbt::{Compound, List, NbtFile, Tag, TagType};

use crate::clipboard::Clipboard;
use crate::error::SchematicError;
use crate::format::{self, nibble_plane_len, set_nibble};
use crate::items::collect_mappings;
use crate::remap::RemapTable;

/// Encodes clipboards as Alpha schematics, naming IDs through a registry.
pub struct SchematicWriter<'a> {
    registry: &'a dyn Registry,
    reporter: &'a dyn Reporter,
}

impl<'a> SchematicWriter<'a> {
    pub fn new(registry: &'a dyn Registry, reporter: &'a dyn Reporter) -> Self {
        SchematicWriter { registry, reporter }
    }

    pub fn write(&self, clipboard: &Clipboard) -> Result<NbtFile, SchematicError> {
        let region = clipboard.region();
        for (axis, size) in [
            ("Width", region.width),
            ("Height", region.height),
            ("Length", region.length),
        ] {
            if size > format::MAX_SIZE {
                return Err(SchematicError::Argument(format!(
                    "{} of region too large for a .schematic: {}",
                    axis, size
                )));
            }
        }

        let volume = region.volume();
        let mut blocks = vec![0u8; volume];
        let mut data = vec![0u8; volume];
        let mut extra_data: Option<Vec<u8>> = None;
        let mut add_blocks: Option<Vec<u8>> = None;
        let mut tile_entities = List::new(TagType::Compound);
        let mut table = RemapTable::new();
        let mut truncated = false;

        for (index, cell) in clipboard.cells().iter().enumerate() {
            if cell.id > format::MAX_BLOCK_ID && !truncated {
                truncated = true;
                self.reporter.report(
                    LogSeverity::Warning,
                    &format!(
                        "Block ID {} does not fit a .schematic; IDs above {} are truncated",
                        cell.id,
                        format::MAX_BLOCK_ID
                    ),
                );
            }
            let id = cell.id & format::MAX_BLOCK_ID;

            blocks[index] = id as u8;
            if id > 0xFF {
                let plane = add_blocks.get_or_insert_with(|| vec![0; nibble_plane_len(volume)]);
                set_nibble(plane, index, (id >> 8) as u8);
            }
            data[index] = cell.data as u8;
            if cell.data > 0xFF {
                extra_data.get_or_insert_with(|| vec![0; volume])[index] = (cell.data >> 8) as u8;
            }
            table.record_block(id, self.registry);

            if let Some(nbt) = &cell.nbt {
                let relative = region.relative_position(index);
                let mut record = nbt.clone();
                let nbt_id = nbt.get_str("id").unwrap_or_default().to_string();
                record.insert("id", Tag::String(nbt_id));
                record.insert("x", Tag::Int(relative.x));
                record.insert("y", Tag::Int(relative.y));
                record.insert("z", Tag::Int(relative.z));
                collect_mappings(&record, &mut table, self.registry);
                tile_entities.push(Tag::Compound(record))?;
            }
        }

        let entities = List::of_compounds(clipboard.entities().iter().map(entity_record));
        let offset = region.min - clipboard.origin();
        let (block_mapping, item_mapping) = table.to_mapping_tags();

        let mut schematic = Compound::new();
        schematic.insert(format::WIDTH, Tag::Short(region.width as u16 as i16));
        schematic.insert(format::LENGTH, Tag::Short(region.length as u16 as i16));
        schematic.insert(format::HEIGHT, Tag::Short(region.height as u16 as i16));
        schematic.insert(format::MATERIALS, Tag::from(format::MATERIALS_ALPHA));
        let min = [region.min.x, region.min.y, region.min.z];
        for (key, value) in format::ORIGIN.into_iter().zip(min) {
            schematic.insert(key, Tag::Int(value));
        }
        for (key, value) in format::OFFSET.into_iter().zip([offset.x, offset.y, offset.z]) {
            schematic.insert(key, Tag::Int(value));
        }
        schematic.insert(format::BLOCKS, Tag::ByteArray(blocks));
        schematic.insert(format::DATA, Tag::ByteArray(data));
        if let Some(extra_data) = extra_data {
            schematic.insert(format::EXTRA_DATA, Tag::ByteArray(extra_data));
        }
        if let Some(add_blocks) = add_blocks {
            schematic.insert(format::ADD_BLOCKS, Tag::ByteArray(add_blocks));
        }
        schematic.insert(format::TILE_ENTITIES, Tag::List(tile_entities));
        schematic.insert(format::ENTITIES, Tag::List(entities));
        schematic.insert(format::BLOCK_MAPPING, Tag::Compound(block_mapping));
        schematic.insert(format::ITEM_MAPPING, Tag::Compound(item_mapping));

        Ok(NbtFile::new(format::ROOT_NAME, Tag::Compound(schematic)))
    }
}

/// The entity's own fields, then `id`, `Pos` and `Rotation` appended last.
fn entity_record(entity: &PlacedEntity) -> Compound {
    let mut record = entity.nbt.clone().unwrap_or_default();
    for key in ["id", "Pos", "Rotation"] {
        record.remove(key);
    }
    let Position { x, y, z } = entity.position;
    record.insert("id", Tag::from(entity.type_id.as_str()));
    record.insert("Pos", Tag::List(List::of_doubles(&[x, y, z])));
    record.insert(
        "Rotation",
        Tag::List(List::of_floats(&[entity.rotation.yaw, entity.rotation.pitch])),
    );
    record
}

/// Encodes `clipboard` as an uncompressed schematic stream, logging diagnostics.
pub fn write_schematic<W: Write>(
    clipboard: &Clipboard,
    registry: &dyn Registry,
    writer: &mut W,
) -> Result<(), SchematicError> {
    let file = SchematicWriter::new(registry, &LogReporter).write(clipboard)?;
    file.write(writer)?;
    Ok(())
}

/// Encodes `clipboard` as a gzip-compressed schematic stream, logging diagnostics.
pub fn write_schematic_gzip<W: Write>(
    clipboard: &Clipboard,
    registry: &dyn Registry,
    writer: &mut W,
) -> Result<(), SchematicError> {
    let file = SchematicWriter::new(registry, &LogReporter).write(clipboard)?;
    file.write_gzip(writer)?;
    Ok(())
}
