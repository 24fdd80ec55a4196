//! Decoding of the oldest raw-chunk world layout, used when importing
//! blocks from pre-region worlds.

pub mod chunk;
pub mod error;
pub mod store;

pub use chunk::{LegacyChunk, BLOCK_COUNT, CHUNK_HEIGHT, CHUNK_WIDTH};
pub use error::ChunkError;
pub use store::{base36, chunk_coordinates, LegacyChunkStore};
