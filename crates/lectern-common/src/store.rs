use crate::block::BlockCell;
use crate::entity::PlacedEntity;
use crate::error::StoreError;
use crate::types::{BlockVector, Region};

/// Grid storage the schematic reader places decoded blocks into.
pub trait BlockStore {
    /// The region this store accepts blocks for.
    fn region(&self) -> Region;

    fn set_block(&mut self, position: BlockVector, cell: BlockCell) -> Result<(), StoreError>;

    fn block(&self, position: BlockVector) -> Option<BlockCell>;

    fn add_entity(&mut self, entity: PlacedEntity) -> Result<(), StoreError>;
}
