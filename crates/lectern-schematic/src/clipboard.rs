use lectern_common::{BlockCell, BlockStore, BlockVector, PlacedEntity, Region, StoreError};

/// A decoded schematic: a dense block grid over a region, an origin and entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    region: Region,
    origin: BlockVector,
    blocks: Vec<BlockCell>,
    entities: Vec<PlacedEntity>,
}

impl Clipboard {
    /// An all-air clipboard whose origin is the region's minimum corner.
    pub fn new(region: Region) -> Self {
        Clipboard::with_origin(region, region.min)
    }

    pub fn with_origin(region: Region, origin: BlockVector) -> Self {
        Clipboard {
            region,
            origin,
            blocks: vec![BlockCell::default(); region.volume()],
            entities: Vec::new(),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn origin(&self) -> BlockVector {
        self.origin
    }

    pub fn set_origin(&mut self, origin: BlockVector) {
        self.origin = origin;
    }

    pub fn get(&self, position: BlockVector) -> Option<&BlockCell> {
        self.region.index_of(position).map(|index| &self.blocks[index])
    }

    pub fn get_mut(&mut self, position: BlockVector) -> Option<&mut BlockCell> {
        let index = self.region.index_of(position)?;
        self.blocks.get_mut(index)
    }

    pub fn set(&mut self, position: BlockVector, cell: BlockCell) -> Result<(), StoreError> {
        let slot = self
            .get_mut(position)
            .ok_or(StoreError::OutOfBounds(position))?;
        *slot = cell;
        Ok(())
    }

    /// Cells in index order (`y * width * length + z * width + x`).
    pub fn cells(&self) -> &[BlockCell] {
        &self.blocks
    }

    pub fn cells_mut(&mut self) -> &mut [BlockCell] {
        &mut self.blocks
    }

    /// Absolute position and cell for every cell, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockVector, &BlockCell)> {
        let region = self.region;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(index, cell)| (region.min + region.relative_position(index), cell))
    }

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn push_entity(&mut self, entity: PlacedEntity) {
        self.entities.push(entity);
    }

    pub fn tile_entity_count(&self) -> usize {
        self.blocks.iter().filter(|cell| cell.nbt.is_some()).count()
    }
}

impl BlockStore for Clipboard {
    fn region(&self) -> Region {
        self.region
    }

    fn set_block(&mut self, position: BlockVector, cell: BlockCell) -> Result<(), StoreError> {
        self.set(position, cell)
    }

    fn block(&self, position: BlockVector) -> Option<BlockCell> {
        self.get(position).cloned()
    }

    fn add_entity(&mut self, entity: PlacedEntity) -> Result<(), StoreError> {
        self.push_entity(entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_clipboard_is_air() {
        let region = Region::new(BlockVector::new(5, 0, -5), 2, 3, 4);
        let clipboard = Clipboard::new(region);
        assert_eq!(clipboard.cells().len(), 24);
        assert!(clipboard.cells().iter().all(BlockCell::is_air));
        assert_eq!(clipboard.origin(), region.min);
    }

    #[test]
    fn test_set_and_get() {
        let region = Region::new(BlockVector::new(5, 0, -5), 2, 3, 4);
        let mut clipboard = Clipboard::new(region);
        let position = BlockVector::new(6, 2, -2);
        clipboard.set(position, BlockCell::new(35, 14)).unwrap();

        assert_eq!(clipboard.get(position), Some(&BlockCell::new(35, 14)));
        assert_eq!(clipboard.block(position), Some(BlockCell::new(35, 14)));
        // y * w * l + z * w + x with relative (1, 2, 3)
        assert_eq!(clipboard.cells()[2 * 8 + 3 * 2 + 1].id, 35);

        let (found, _) = clipboard.iter().find(|(_, cell)| cell.id == 35).unwrap();
        assert_eq!(found, position);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut clipboard = Clipboard::new(Region::new(BlockVector::ZERO, 1, 1, 1));
        let outside = BlockVector::new(1, 0, 0);
        assert_matches!(
            clipboard.set_block(outside, BlockCell::new(1, 0)),
            Err(StoreError::OutOfBounds(p)) if p == outside
        );
        assert!(clipboard.get(outside).is_none());
    }
}
