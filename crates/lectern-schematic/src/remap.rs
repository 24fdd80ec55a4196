use std::collections::{BTreeMap, HashMap};

use lectern_common::Registry;
use lectern_logger::{LogSeverity, Reporter};
use lectern_nbt::{Compound, Tag, TagType};

use crate::error::FormatError;

/// A bidirectional table between numeric IDs and registry names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdMap {
    by_name: BTreeMap<String, u16>,
    by_id: BTreeMap<u16, String>,
}

impl IdMap {
    pub fn new() -> Self {
        IdMap::default()
    }

    /// Records `name ⇄ id`, dropping any older pairing of either side.
    /// Returns the name that previously held `id`, if it differs.
    pub fn insert(&mut self, name: impl Into<String>, id: u16) -> Option<String> {
        let name = name.into();
        if let Some(old_id) = self.by_name.insert(name.clone(), id) {
            self.by_id.remove(&old_id);
        }
        let old_name = self.by_id.insert(id, name.clone())?;
        if old_name == name {
            return None;
        }
        if self.by_name.get(&old_name) == Some(&id) {
            self.by_name.remove(&old_name);
        }
        log::warn!("{} and {} both map to id {}, keeping {}", old_name, name, id, name);
        Some(old_name)
    }

    pub fn id(&self, name: &str) -> Option<u16> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: u16) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.by_name.iter().map(|(name, &id)| (name.as_str(), id))
    }

    fn from_tag(key: &str, mapping: &Compound) -> Result<Self, FormatError> {
        let mut map = IdMap::new();
        for (name, tag) in mapping.iter() {
            match tag {
                Tag::Short(id) => {
                    map.insert(name, *id as u16);
                }
                other => {
                    return Err(FormatError::WrongTagType {
                        key: format!("{}.{}", key, name),
                        expected: TagType::Short,
                        found: other.tag_type(),
                    })
                }
            }
        }
        Ok(map)
    }

    fn to_tag(&self) -> Compound {
        self.iter()
            .map(|(name, id)| (name, Tag::Short(id as i16)))
            .collect()
    }
}

/// The block and item name tables embedded in a schematic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemapTable {
    pub blocks: IdMap,
    pub items: IdMap,
}

impl RemapTable {
    pub fn new() -> Self {
        RemapTable::default()
    }

    /// Builds the tables from the `BlockMapping` and `ItemMapping` compounds.
    /// Every value must be a short.
    pub fn from_mapping_tags(
        block_mapping: Option<&Compound>,
        item_mapping: Option<&Compound>,
    ) -> Result<Self, FormatError> {
        let blocks = match block_mapping {
            Some(mapping) => IdMap::from_tag(crate::format::BLOCK_MAPPING, mapping)?,
            None => IdMap::new(),
        };
        let items = match item_mapping {
            Some(mapping) => IdMap::from_tag(crate::format::ITEM_MAPPING, mapping)?,
            None => IdMap::new(),
        };
        Ok(RemapTable { blocks, items })
    }

    /// The `(BlockMapping, ItemMapping)` compounds for this table.
    pub fn to_mapping_tags(&self) -> (Compound, Compound) {
        (self.blocks.to_tag(), self.items.to_tag())
    }

    /// Records the registry's name for block `id`. Returns false when the registry has none.
    pub fn record_block(&mut self, id: u16, registry: &dyn Registry) -> bool {
        match registry.block_name(id) {
            Some(name) => {
                self.blocks.insert(name, id);
                true
            }
            None => false,
        }
    }

    pub fn record_item(&mut self, id: u16, registry: &dyn Registry) -> bool {
        match registry.item_name(id) {
            Some(name) => {
                self.items.insert(name, id);
                true
            }
            None => false,
        }
    }

    /// Resolves every recorded name against `registry`, giving the old-to-current
    /// ID translation for one read. Names the registry does not know are reported
    /// and keep their stored ID.
    pub fn conversion_into(&self, registry: &dyn Registry, reporter: &dyn Reporter) -> Conversion {
        let mut conversion = Conversion::default();
        for (name, old) in self.blocks.iter() {
            match registry.block_id(name) {
                Some(current) => {
                    conversion.blocks.insert(old, current);
                }
                None => reporter.report(
                    LogSeverity::Warning,
                    &format!("Unknown block {} in schematic mapping, keeping ID {}", name, old),
                ),
            }
        }
        for (name, old) in self.items.iter() {
            match registry.item_id(name) {
                Some(current) => {
                    conversion.items.insert(old, current);
                }
                None => reporter.report(
                    LogSeverity::Warning,
                    &format!("Unknown item {} in schematic mapping, keeping ID {}", name, old),
                ),
            }
        }
        conversion
    }
}

/// Old-to-current ID translation. IDs without an entry map to themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversion {
    blocks: HashMap<u16, u16>,
    items: HashMap<u16, u16>,
}

impl Conversion {
    pub fn block(&self, id: u16) -> u16 {
        self.blocks.get(&id).copied().unwrap_or(id)
    }

    pub fn item(&self, id: u16) -> u16 {
        self.items.get(&id).copied().unwrap_or(id)
    }

    pub fn has_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use lectern_common::RegistrySnapshot;
    use lectern_logger::CollectingReporter;

    #[test]
    fn test_id_map_is_bijective() {
        let mut map = IdMap::new();
        assert_eq!(map.insert("stone", 1), None);
        assert_eq!(map.insert("granite", 1), Some("stone".to_string()));
        assert_eq!(map.insert("granite", 1), None);
        assert_eq!(map.name(1), Some("granite"));
        assert_eq!(map.id("stone"), None);

        map.insert("granite", 2);
        assert_eq!(map.name(1), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_mapping_tags_require_shorts() {
        let good: Compound = [("mod:pipe", Tag::Short(700))].into_iter().collect();
        let table = RemapTable::from_mapping_tags(Some(&good), None).unwrap();
        assert_eq!(table.blocks.id("mod:pipe"), Some(700));
        assert!(table.items.is_empty());

        let bad: Compound = [("mod:wrench", Tag::Int(4000))].into_iter().collect();
        assert_matches!(
            RemapTable::from_mapping_tags(None, Some(&bad)),
            Err(FormatError::WrongTagType { expected: TagType::Short, found: TagType::Int, .. })
        );
    }

    #[test]
    fn test_duplicate_ids_keep_the_later_name() {
        let mapping: Compound = [("mod:old_pipe", Tag::Short(700)), ("mod:pipe", Tag::Short(700))]
            .into_iter()
            .collect();
        let table = RemapTable::from_mapping_tags(Some(&mapping), None).unwrap();
        assert_eq!(table.blocks.len(), 1);
        assert_eq!(table.blocks.name(700), Some("mod:pipe"));
        assert_eq!(table.blocks.id("mod:old_pipe"), None);
    }

    #[test]
    fn test_negative_short_is_unsigned() {
        let mapping: Compound = [("mod:big", Tag::Short(-1))].into_iter().collect();
        let table = RemapTable::from_mapping_tags(Some(&mapping), None).unwrap();
        assert_eq!(table.blocks.id("mod:big"), Some(65535));
        assert_eq!(table.to_mapping_tags().0, mapping);
    }

    #[test]
    fn test_conversion_reports_unknown_names_once() {
        let registry = RegistrySnapshot::new().with_block("X", 9).unwrap();
        let mut table = RemapTable::new();
        table.blocks.insert("X", 5);
        table.blocks.insert("gone", 6);
        table.items.insert("gone", 300);

        let reporter = CollectingReporter::new();
        let conversion = table.conversion_into(&registry, &reporter);
        assert_eq!(conversion.block(5), 9);
        assert_eq!(conversion.block(6), 6);
        assert_eq!(conversion.item(300), 300);
        assert!(conversion.has_blocks());
        assert!(!conversion.has_items());
        assert_eq!(reporter.count(LogSeverity::Warning), 2);
    }

    #[test]
    fn test_record_uses_registry_names() {
        let registry = RegistrySnapshot::new()
            .with_block("stone", 1)
            .and_then(|r| r.with_item("stick", 280))
            .unwrap();
        let mut table = RemapTable::new();
        assert!(table.record_block(1, &registry));
        assert!(!table.record_block(2, &registry));
        assert!(table.record_item(280, &registry));

        let (blocks, items) = table.to_mapping_tags();
        assert_eq!(blocks.get_short("stone"), Some(1));
        assert_eq!(items.get_short("stick"), Some(280));
    }
}
