#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use lectern::common::{BlockCell, BlockVector, Region, RegistrySnapshot};
use lectern::nbt::{Compound, List, NbtFile, Tag};
use lectern::schematic::Clipboard;
use lectern::world::{LegacyChunkStore, BLOCK_COUNT};

pub const OLD_REGISTRY: &str = r#"{"blocks": {"minecraft:stone": 1, "minecraft:planks": 5, "mod:shape": 900}}"#;
pub const NEW_REGISTRY: &str = r#"{"blocks": {"minecraft:stone": 2, "minecraft:planks": 5, "mod:shape": 1200}}"#;

pub fn registry(json: &str) -> RegistrySnapshot {
    RegistrySnapshot::from_json_str(json).unwrap()
}

/// A fresh directory under the system temp dir, unique to this test process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lectern-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn shape_tile_entity(side: i8, turn: i8) -> Compound {
    [
        ("id", Tag::from("gcewing.shape")),
        ("side", Tag::Byte(side)),
        ("turn", Tag::Byte(turn)),
        ("Shape", Tag::Int(12)),
    ]
    .into_iter()
    .collect()
}

/// A 2x2x2 clipboard of stone and planks with one ArchitectureCraft shape.
pub fn small_clipboard() -> Clipboard {
    let region = Region::new(BlockVector::new(4, 10, -3), 2, 2, 2);
    let mut clipboard = Clipboard::new(region);
    for (index, cell) in clipboard.cells_mut().iter_mut().enumerate() {
        *cell = if index % 2 == 0 {
            BlockCell::new(1, 0)
        } else {
            BlockCell::new(5, 2)
        };
    }
    clipboard
        .set(
            BlockVector::new(5, 11, -2),
            BlockCell::new(900, 0).with_nbt(shape_tile_entity(2, 1)),
        )
        .unwrap();
    clipboard
}

/// A legacy chunk `Level` compound whose every column holds stone at y 0
/// and wool with colour `x` at y 1, plus one sign at local (0, 2, 0).
pub fn legacy_level(cx: i32, cz: i32) -> Compound {
    let mut blocks = vec![0u8; BLOCK_COUNT];
    let mut data = vec![0u8; BLOCK_COUNT / 2];
    for x in 0..16usize {
        for z in 0..16usize {
            let column = z * 128 + x * 128 * 16;
            blocks[column] = 1;
            blocks[column + 1] = 35;
            data[(column + 1) / 2] |= (x as u8) << 4;
        }
    }
    blocks[2] = 63;
    let sign: Compound = [
        ("id", Tag::from("Sign")),
        ("x", Tag::Int(cx * 16)),
        ("y", Tag::Int(2)),
        ("z", Tag::Int(cz * 16)),
        ("Text1", Tag::from("welcome")),
    ]
    .into_iter()
    .collect();
    [
        ("Blocks", Tag::ByteArray(blocks)),
        ("Data", Tag::ByteArray(data)),
        ("xPos", Tag::Int(cx)),
        ("zPos", Tag::Int(cz)),
        ("TileEntities", Tag::List(List::of_compounds(vec![sign]))),
    ]
    .into_iter()
    .collect()
}

pub fn store_legacy_chunk(store: &LegacyChunkStore, cx: i32, cz: i32) {
    let path = store.chunk_path(cx, cz);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let root: Compound = [("Level", Tag::Compound(legacy_level(cx, cz)))]
        .into_iter()
        .collect();
    let mut file = File::create(&path).unwrap();
    NbtFile::new("", Tag::Compound(root)).write_gzip(&mut file).unwrap();
}

pub fn write_registry(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path
}
