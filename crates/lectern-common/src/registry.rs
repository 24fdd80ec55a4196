use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Resolves numeric block and item IDs to symbolic names and back.
pub trait Registry {
    fn block_id(&self, name: &str) -> Option<u16>;
    fn block_name(&self, id: u16) -> Option<&str>;
    fn item_id(&self, name: &str) -> Option<u16>;
    fn item_name(&self, id: u16) -> Option<&str>;
}

/// One direction-indexed name table.
#[derive(Debug, Clone, Default, PartialEq)]
struct IdTable {
    by_name: HashMap<String, u16>,
    by_id: HashMap<u16, String>,
}

impl IdTable {
    fn from_names(table: &'static str, names: BTreeMap<String, u16>) -> Result<Self, RegistryError> {
        let mut built = IdTable::default();
        for (name, id) in names {
            built.insert(table, name, id)?;
        }
        Ok(built)
    }

    fn insert(&mut self, table: &'static str, name: String, id: u16) -> Result<(), RegistryError> {
        if let Some(first) = self.by_id.get(&id) {
            if *first != name {
                return Err(RegistryError::DuplicateId {
                    table,
                    id,
                    first: first.clone(),
                    second: name,
                });
            }
        }
        if let Some(previous) = self.by_name.insert(name.clone(), id) {
            self.by_id.remove(&previous);
        }
        self.by_id.insert(id, name);
        Ok(())
    }

    fn to_names(&self) -> BTreeMap<String, u16> {
        self.by_name
            .iter()
            .map(|(name, &id)| (name.clone(), id))
            .collect()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    blocks: BTreeMap<String, u16>,
    #[serde(default)]
    items: BTreeMap<String, u16>,
}

/// A frozen copy of a host's block and item registries.
///
/// Loaded from JSON of the form `{"blocks": {"name": id}, "items": {"name": id}}`;
/// either table may be omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrySnapshot {
    blocks: IdTable,
    items: IdTable,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        RegistrySnapshot::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        Self::from_document(serde_json::from_reader(reader)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_document(document: SnapshotDocument) -> Result<Self, RegistryError> {
        Ok(RegistrySnapshot {
            blocks: IdTable::from_names("block", document.blocks)?,
            items: IdTable::from_names("item", document.items)?,
        })
    }

    pub fn to_json_string(&self) -> Result<String, RegistryError> {
        let document = SnapshotDocument {
            blocks: self.blocks.to_names(),
            items: self.items.to_names(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Adds a block, replacing any previous ID for the same name.
    pub fn with_block(mut self, name: impl Into<String>, id: u16) -> Result<Self, RegistryError> {
        self.blocks.insert("block", name.into(), id)?;
        Ok(self)
    }

    pub fn with_item(mut self, name: impl Into<String>, id: u16) -> Result<Self, RegistryError> {
        self.items.insert("item", name.into(), id)?;
        Ok(self)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.by_id.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.by_id.len()
    }
}

impl Registry for RegistrySnapshot {
    fn block_id(&self, name: &str) -> Option<u16> {
        self.blocks.by_name.get(name).copied()
    }

    fn block_name(&self, id: u16) -> Option<&str> {
        self.blocks.by_id.get(&id).map(String::as_str)
    }

    fn item_id(&self, name: &str) -> Option<u16> {
        self.items.by_name.get(name).copied()
    }

    fn item_name(&self, id: u16) -> Option<&str> {
        self.items.by_id.get(&id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_from_json() {
        let registry = RegistrySnapshot::from_json_str(
            r#"{"blocks": {"minecraft:stone": 1, "mod:pipe": 700}, "items": {"mod:wrench": 4000}}"#,
        )
        .unwrap();

        assert_eq!(registry.block_id("mod:pipe"), Some(700));
        assert_eq!(registry.block_name(1), Some("minecraft:stone"));
        assert_eq!(registry.item_id("mod:wrench"), Some(4000));
        assert_eq!(registry.item_name(1), None);
        assert_eq!(registry.block_count(), 2);
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let registry = RegistrySnapshot::from_json_str(r#"{"blocks": {"a": 1}}"#).unwrap();
        assert_eq!(registry.item_count(), 0);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = RegistrySnapshot::from_json_str(r#"{"blocks": {"a": 5, "b": 5}}"#);
        assert_matches!(
            result,
            Err(RegistryError::DuplicateId { table: "block", id: 5, .. })
        );

        assert_matches!(
            RegistrySnapshot::from_json_str("{\"blocks\": [1]}"),
            Err(RegistryError::Json(_))
        );
    }

    #[test]
    fn test_builder_and_json_round_trip() {
        let registry = RegistrySnapshot::new()
            .with_block("stone", 1)
            .and_then(|r| r.with_block("stone", 2))
            .and_then(|r| r.with_item("stick", 280))
            .unwrap();
        assert_eq!(registry.block_id("stone"), Some(2));
        assert_eq!(registry.block_name(1), None);

        let json = registry.to_json_string().unwrap();
        assert_eq!(RegistrySnapshot::from_json_str(&json).unwrap(), registry);
    }
}
