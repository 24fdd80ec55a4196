#![allow(dead_code)]

use std::io::Cursor;

use lectern_common::{
    BlockCell, BlockStore, BlockVector, PlacedEntity, Position, Region, RegistrySnapshot, Rotation,
    StoreError,
};
use lectern_logger::CollectingReporter;
use lectern_nbt::{Compound, List, NbtFile, Tag};
use lectern_schematic::{Clipboard, SchematicReader, SchematicWriter};

pub fn test_registry() -> RegistrySnapshot {
    RegistrySnapshot::from_json_str(
        r#"{
            "blocks": {"minecraft:stone": 1, "minecraft:chest": 54, "mod:pipe": 700, "mod:tank": 4095},
            "items": {"minecraft:stick": 280, "mod:wrench": 4000}
        }"#,
    )
    .unwrap()
}

pub fn compound(entries: Vec<(&str, Tag)>) -> Compound {
    entries.into_iter().collect()
}

pub fn item_stack(id: i16, count: i8) -> Compound {
    compound(vec![
        ("id", Tag::Short(id)),
        ("Count", Tag::Byte(count)),
        ("Damage", Tag::Short(0)),
    ])
}

pub fn chest(items: Vec<Compound>) -> Compound {
    compound(vec![
        ("id", Tag::from("Chest")),
        ("Items", Tag::List(List::of_compounds(items))),
    ])
}

/// A 3x2x4 clipboard away from the world origin holding a chest, an entity and varied blocks.
pub fn sample_clipboard() -> Clipboard {
    let region = Region::new(BlockVector::new(-10, 60, 25), 3, 2, 4);
    let mut clipboard = Clipboard::with_origin(region, BlockVector::new(-8, 58, 20));
    for (index, cell) in clipboard.cells_mut().iter_mut().enumerate() {
        *cell = BlockCell::new((index % 5) as u16, (index % 16) as u16);
    }
    clipboard
        .set(
            BlockVector::new(-9, 61, 27),
            BlockCell::new(54, 3).with_nbt(chest(vec![item_stack(280, 12)])),
        )
        .unwrap();
    clipboard.push_entity(
        PlacedEntity::new("Sheep", Position::new(-9.5, 61.0, 26.25))
            .with_rotation(Rotation::new(45.0, -10.0))
            .with_nbt(compound(vec![("Color", Tag::Byte(14))])),
    );
    clipboard.push_entity(PlacedEntity::new("Boat", Position::new(-8.0, 60.0, 25.0)));
    clipboard
}

pub fn write_bytes(clipboard: &Clipboard, registry: &RegistrySnapshot) -> Vec<u8> {
    let reporter = CollectingReporter::new();
    let file = SchematicWriter::new(registry, &reporter).write(clipboard).unwrap();
    let mut bytes = Vec::new();
    file.write(&mut bytes).unwrap();
    bytes
}

pub fn read_bytes(bytes: &[u8], registry: &RegistrySnapshot) -> Clipboard {
    let reporter = CollectingReporter::new();
    let file = NbtFile::read(&mut Cursor::new(bytes)).unwrap();
    SchematicReader::new(registry, &reporter).read(&file).unwrap()
}

pub fn round_trip(clipboard: &Clipboard) -> Clipboard {
    let registry = test_registry();
    read_bytes(&write_bytes(clipboard, &registry), &registry)
}

/// A store that refuses every block and entity.
pub struct RejectingStore {
    pub region: Region,
}

impl BlockStore for RejectingStore {
    fn region(&self) -> Region {
        self.region
    }

    fn set_block(&mut self, position: BlockVector, _cell: BlockCell) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            position,
            reason: "read only".to_string(),
        })
    }

    fn block(&self, _position: BlockVector) -> Option<BlockCell> {
        None
    }

    fn add_entity(&mut self, _entity: PlacedEntity) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            position: self.region.min,
            reason: "read only".to_string(),
        })
    }
}
