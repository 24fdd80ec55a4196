//! Value types and collaborator traits shared by the lectern crates.

pub mod block;
pub mod entity;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;

pub use block::BlockCell;
pub use entity::PlacedEntity;
pub use error::{RegistryError, StoreError};
pub use registry::{Registry, RegistrySnapshot};
pub use store::BlockStore;
pub use types::{BlockVector, Position, Region, Rotation};
