use std::io;

use lectern_nbt::{NbtError, TagType};

/// Malformed or missing mandatory schematic structure.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("root tag is named {0:?}, expected \"Schematic\"")]
    WrongRootName(String),

    #[error("schematic file is missing a {0:?} tag")]
    MissingTag(String),

    #[error("{key:?} tag is not of the expected type: expected {expected}, found {found}")]
    WrongTagType {
        key: String,
        expected: TagType,
        found: TagType,
    },

    #[error("schematic file is not an Alpha schematic (Materials = {0:?})")]
    UnsupportedMaterials(String),

    #[error("{key:?} holds {found} bytes, expected {expected}")]
    ArrayLength {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed tag stream: {0}")]
    Nbt(#[from] NbtError),
}

#[derive(Debug, thiserror::Error)]
pub enum SchematicError {
    #[error("invalid schematic: {0}")]
    Format(#[from] FormatError),

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<NbtError> for SchematicError {
    fn from(err: NbtError) -> Self {
        match err {
            NbtError::Io(err) => SchematicError::Io(err),
            other => SchematicError::Format(FormatError::Nbt(other)),
        }
    }
}
