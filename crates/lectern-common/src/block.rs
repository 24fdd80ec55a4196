use lectern_nbt::Compound;

/// One voxel: block ID, data value and an optional tile-entity tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockCell {
    pub id: u16,
    pub data: u16,
    pub nbt: Option<Compound>,
}

impl BlockCell {
    pub fn air() -> Self {
        BlockCell::default()
    }

    pub fn new(id: u16, data: u16) -> Self {
        BlockCell {
            id,
            data,
            nbt: None,
        }
    }

    pub fn with_nbt(mut self, nbt: Compound) -> Self {
        self.nbt = Some(nbt);
        self
    }

    /// The tile-entity type string stored under `id` in the tree, if any.
    pub fn nbt_id(&self) -> Option<&str> {
        self.nbt.as_ref().and_then(|nbt| nbt.get_str("id"))
    }

    pub fn is_air(&self) -> bool {
        self.id == 0 && self.nbt.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_nbt::Tag;

    #[test]
    fn test_nbt_id() {
        assert_eq!(BlockCell::air().nbt_id(), None);

        let chest: Compound = [("id", Tag::from("Chest"))].into_iter().collect();
        let cell = BlockCell::new(54, 2).with_nbt(chest);
        assert_eq!(cell.nbt_id(), Some("Chest"));
        assert!(!cell.is_air());

        let numeric: Compound = [("id", Tag::Int(3))].into_iter().collect();
        assert_eq!(BlockCell::new(1, 0).with_nbt(numeric).nbt_id(), None);
    }
}
