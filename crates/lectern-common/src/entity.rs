use lectern_nbt::Compound;

use crate::types::{Position, Rotation};

/// A free-floating entity inside a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedEntity {
    pub type_id: String,
    pub position: Position,
    pub rotation: Rotation,
    pub nbt: Option<Compound>,
}

impl PlacedEntity {
    pub fn new(type_id: impl Into<String>, position: Position) -> Self {
        PlacedEntity {
            type_id: type_id.into(),
            position,
            rotation: Rotation::default(),
            nbt: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Attaches extra entity data. An empty tree is stored as `None`.
    pub fn with_nbt(mut self, nbt: Compound) -> Self {
        self.nbt = (!nbt.is_empty()).then_some(nbt);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_nbt::Tag;

    #[test]
    fn test_empty_tree_is_no_tree() {
        let entity = PlacedEntity::new("Pig", Position::default()).with_nbt(Compound::new());
        assert_eq!(entity.nbt, None);

        let saddled: Compound = [("Saddle", Tag::Byte(1))].into_iter().collect();
        let entity = entity.with_nbt(saddled.clone());
        assert_eq!(entity.nbt, Some(saddled));
    }
}
