use std::io;

use crate::types::BlockVector;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("position {0} is outside the store")]
    OutOfBounds(BlockVector),

    #[error("store rejected block at {position}: {reason}")]
    Rejected {
        position: BlockVector,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid registry document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{table} id {id} is claimed by both {first} and {second}")]
    DuplicateId {
        table: &'static str,
        id: u16,
        first: String,
        second: String,
    },
}
