use std::io;

use lectern_common::BlockVector;
use lectern_nbt::{NbtError, TagType};

#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("invalid chunk: {0}")]
    Format(String),

    #[error("chunk is missing a {0:?} tag")]
    MissingTag(String),

    #[error("{key:?} tag is not of the expected type: expected {expected}, found {found}")]
    WrongTagType {
        key: String,
        expected: TagType,
        found: TagType,
    },

    #[error("chunk does not contain position {0}")]
    OutOfChunk(BlockVector),

    #[error("no chunk stored at ({0}, {1})")]
    MissingChunk(i32, i32),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed tag stream: {0}")]
    Nbt(NbtError),
}

impl From<NbtError> for ChunkError {
    fn from(err: NbtError) -> Self {
        match err {
            NbtError::Io(err) => ChunkError::Io(err),
            other => ChunkError::Nbt(other),
        }
    }
}
