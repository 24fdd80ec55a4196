use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use lectern_common::BlockVector;
use lectern_nbt::{Compound, NbtFile, Tag, TagType};

use crate::chunk::{required, LegacyChunk, CHUNK_WIDTH};
use crate::error::ChunkError;

/// Read-only access to a world directory of per-chunk gzip files nested in
/// two levels of base-36 bucket directories.
#[derive(Debug, Clone)]
pub struct LegacyChunkStore {
    root: PathBuf,
}

impl LegacyChunkStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LegacyChunkStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chunk_path(&self, cx: i32, cz: i32) -> PathBuf {
        self.root
            .join(base36(cx.rem_euclid(64)))
            .join(base36(cz.rem_euclid(64)))
            .join(format!("c.{}.{}.dat", base36(cx), base36(cz)))
    }

    /// The `Level` compound of the chunk at chunk coordinates `(cx, cz)`.
    pub fn chunk_tag(&self, cx: i32, cz: i32) -> Result<Compound, ChunkError> {
        let path = self.chunk_path(cx, cz);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ChunkError::MissingChunk(cx, cz));
            }
            Err(err) => return Err(err.into()),
        };
        log::debug!("loading chunk ({}, {}) from {}", cx, cz, path.display());

        let file = NbtFile::read_gzip(&mut BufReader::new(file))?;
        let root = match file.root {
            Tag::Compound(root) => root,
            other => {
                return Err(ChunkError::WrongTagType {
                    key: file.name,
                    expected: TagType::Compound,
                    found: other.tag_type(),
                })
            }
        };
        required(&root, "Level", TagType::Compound, Tag::as_compound).cloned()
    }

    pub fn chunk(&self, cx: i32, cz: i32) -> Result<LegacyChunk, ChunkError> {
        LegacyChunk::new(&self.chunk_tag(cx, cz)?)
    }

    /// The chunk holding a world position.
    pub fn chunk_at(&self, position: BlockVector) -> Result<LegacyChunk, ChunkError> {
        let (cx, cz) = chunk_coordinates(position);
        self.chunk(cx, cz)
    }
}

pub fn chunk_coordinates(position: BlockVector) -> (i32, i32) {
    (
        position.x.div_euclid(CHUNK_WIDTH),
        position.z.div_euclid(CHUNK_WIDTH),
    )
}

/// Lower-case base-36 with a leading `-` for negatives.
pub fn base36(value: i32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut magnitude = i64::from(value).unsigned_abs();
    if magnitude == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while magnitude > 0 {
        digits.push(DIGITS[(magnitude % 36) as usize]);
        magnitude /= 36;
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.iter().rev().map(|&digit| char::from(digit)).collect()
}
