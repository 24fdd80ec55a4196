mod common;

use std::fs::File;
use std::io::{BufReader, Cursor};

use assert_matches::assert_matches;
use common::*;
use lectern::common::{BlockStore, BlockVector, Region};
use lectern::logger::{CollectingReporter, LogSeverity};
use lectern::nbt::NbtFile;
use lectern::schematic::{
    read_schematic_gzip, write_schematic_gzip, Clipboard, SchematicReader, SchematicWriter,
};
use lectern::transform::{AxisRotation, HookChain};
use lectern::world::{ChunkError, LegacyChunkStore};
use lectern::{Command, CommandError};

#[test]
fn test_legacy_chunk_import_survives_schematic_round_trip() {
    let dir = scratch_dir("import");
    let store = LegacyChunkStore::new(&dir);
    store_legacy_chunk(&store, -2, 3);

    // World x -32..-29, z 48..49 lies in chunk (-2, 3)
    let region = Region::new(BlockVector::new(-32, 0, 48), 4, 3, 2);
    let chunk = store.chunk_at(region.min).unwrap();
    let mut clipboard = Clipboard::new(region);
    for index in 0..region.volume() {
        let position = region.min + region.relative_position(index);
        let mut cell = chunk.block(position).unwrap();
        // Schematic tile entities are positioned by their cell
        if let Some(nbt) = cell.nbt.as_mut() {
            for key in ["x", "y", "z"] {
                nbt.remove(key);
            }
        }
        clipboard.set_block(position, cell).unwrap();
    }

    let sign = clipboard.get(BlockVector::new(-32, 2, 48)).unwrap();
    assert_eq!(sign.id, 63);
    assert_eq!(sign.nbt_id(), Some("Sign"));
    assert_eq!(clipboard.get(BlockVector::new(-29, 1, 49)).unwrap().data, 3);

    let registry = registry(OLD_REGISTRY);
    let mut bytes = Vec::new();
    write_schematic_gzip(&clipboard, &registry, &mut bytes).unwrap();
    let read = read_schematic_gzip(&mut Cursor::new(bytes), &registry).unwrap();
    assert_eq!(read, clipboard);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_legacy_chunk() {
    let dir = scratch_dir("no-chunk");
    let store = LegacyChunkStore::new(&dir);
    assert_matches!(
        store.chunk_at(BlockVector::new(100, 0, 100)),
        Err(ChunkError::MissingChunk(6, 6))
    );
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_rotated_tile_entities_are_written() {
    let mut clipboard = small_clipboard();
    let chain = HookChain::with_bundled_hooks();
    let reporter = CollectingReporter::new();
    for cell in clipboard.cells_mut() {
        chain.apply_in_place(cell, AxisRotation::around_y(1), &reporter);
    }
    assert!(reporter.is_empty());

    let registry = registry(OLD_REGISTRY);
    let file = SchematicWriter::new(&registry, &reporter).write(&clipboard).unwrap();
    let read = SchematicReader::new(&registry, &reporter).read(&file).unwrap();
    let shape = read
        .get(BlockVector::new(5, 11, -2))
        .and_then(|cell| cell.nbt.as_ref())
        .unwrap();
    // North-facing shape turned a quarter about Y now faces west
    assert_eq!(shape.get_byte("side"), Some(4));
    assert_eq!(shape.get_byte("turn"), Some(1));
    assert_eq!(shape.get_int("Shape"), Some(12));
}

#[test]
fn test_unsupported_rotation_is_reported_and_ignored() {
    let cell = small_clipboard().get(BlockVector::new(5, 11, -2)).unwrap().clone();
    let mut broken = cell.clone();
    if let Some(nbt) = broken.nbt.as_mut() {
        nbt.insert("side", lectern::nbt::Tag::Byte(9));
    }
    let reporter = CollectingReporter::new();
    let rotated = HookChain::with_bundled_hooks().apply(&broken, AxisRotation::around_y(1), &reporter);
    assert_eq!(rotated, broken);
    assert_eq!(reporter.count(LogSeverity::Warning), 1);
}

#[test]
fn test_parse_commands() {
    assert_eq!(
        Command::parse(&["inspect", "house.schematic"]).unwrap(),
        Command::Inspect {
            schematic: "house.schematic".into(),
            registry: None,
        }
    );
    assert_eq!(
        Command::parse(&["chunk", "world", "-17", "64", "3"]).unwrap(),
        Command::Chunk {
            world: "world".into(),
            position: BlockVector::new(-17, 64, 3),
        }
    );
    assert_matches!(
        Command::parse(&["remap", "in.schematic", "out.schematic"]),
        Err(CommandError::Usage(_))
    );
    assert_matches!(Command::parse::<&str>(&[]), Err(CommandError::Usage(_)));
    assert_matches!(
        Command::parse(&["chunk", "world", "1", "up", "3"]),
        Err(CommandError::Usage(message)) if message.contains("up")
    );
}

#[test]
fn test_remap_command_moves_ids_to_the_new_registry() {
    let dir = scratch_dir("remap");
    let old_registry = registry(OLD_REGISTRY);
    let input = dir.join("in.schematic");
    write_schematic_gzip(&small_clipboard(), &old_registry, &mut File::create(&input).unwrap()).unwrap();
    let output = dir.join("out.schematic");

    let command = Command::Remap {
        input: input.clone(),
        output: output.clone(),
        registry: write_registry(&dir, "new.json", NEW_REGISTRY),
    };
    command.run(&mut Vec::new()).unwrap();

    let new_registry = registry(NEW_REGISTRY);
    let remapped =
        read_schematic_gzip(&mut BufReader::new(File::open(&output).unwrap()), &new_registry).unwrap();
    let ids: Vec<u16> = remapped.cells().iter().map(|cell| cell.id).collect();
    assert_eq!(ids, vec![2, 5, 2, 5, 2, 5, 2, 1200]);
    assert_eq!(remapped.tile_entity_count(), 1);

    let file = NbtFile::read_gzip(&mut BufReader::new(File::open(&output).unwrap())).unwrap();
    let mapping = file.root_compound().unwrap().get_compound("BlockMapping").unwrap();
    assert_eq!(mapping.get_short("minecraft:stone"), Some(2));
    assert_eq!(mapping.get_short("mod:shape"), Some(1200));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_inspect_command_output() {
    let dir = scratch_dir("inspect");
    let input = dir.join("small.schematic");
    write_schematic_gzip(&small_clipboard(), &registry(OLD_REGISTRY), &mut File::create(&input).unwrap()).unwrap();

    let mut out = Vec::new();
    Command::parse(&["inspect", input.to_str().unwrap()])
        .unwrap()
        .run(&mut out)
        .unwrap();
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("size: 2x2x2"));
    assert!(printed.contains("minimum: (4, 10, -3)"));
    assert!(printed.contains("blocks: 8 of 8"));
    assert!(printed.contains("tile entities: 1"));
    assert!(printed.contains("BlockMapping:"));
    assert!(printed.contains("900 mod:shape"));
    assert!(!printed.contains("ItemMapping:"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_chunk_command_output() {
    let dir = scratch_dir("chunk-cmd");
    let store = LegacyChunkStore::new(&dir);
    store_legacy_chunk(&store, 0, -1);

    let mut out = Vec::new();
    let command = Command::Chunk {
        world: dir.clone(),
        position: BlockVector::new(0, 2, -16),
    };
    command.run(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "(0, 2, -16) 63:0\ntile entity: Sign\n"
    );

    let mut out = Vec::new();
    let above = Command::Chunk {
        world: dir.clone(),
        position: BlockVector::new(7, 200, -9),
    };
    above.run(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "(7, 200, -9) 0:0\n");

    std::fs::remove_dir_all(&dir).unwrap();
}
