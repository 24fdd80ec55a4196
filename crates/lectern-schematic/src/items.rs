//! Locating item and block IDs inside tile-entity trees.
//!
//! An item record is recognised, in this order, by a numeric `id` with `Count`
//! and `Damage`, by a numeric `Item` with `Count` and `Meta`, or by a bare int
//! `id`. Inside an item only the nested `tag` and `d` compounds are searched.
//! Carpenter-style door tile entities carry material IDs in fixed int fields.
//! Everything else is searched through compound values and compound list elements.

use lectern_common::Registry;
use lectern_nbt::{Compound, Tag};

use crate::remap::{Conversion, RemapTable};

pub const DOOR_TILE_ENTITY: &str = "customDoorTileEntity";
pub const DOOR_ITEM_FIELDS: [&str; 4] = ["bottomMaterial", "topMaterial", "frame", "item"];
pub const DOOR_BLOCK_FIELD: &str = "block";

const NESTED_ITEM_KEYS: [&str; 2] = ["tag", "d"];

/// Receives every ID found in a tree and returns its replacement.
pub trait IdVisitor {
    fn item(&mut self, id: u16) -> u16;
    fn block(&mut self, id: u16) -> u16;
}

impl IdVisitor for &Conversion {
    fn item(&mut self, id: u16) -> u16 {
        Conversion::item(*self, id)
    }

    fn block(&mut self, id: u16) -> u16 {
        Conversion::block(*self, id)
    }
}

/// Records every ID it sees into a [`RemapTable`], leaving them unchanged.
pub struct MappingCollector<'a> {
    pub table: &'a mut RemapTable,
    pub registry: &'a dyn Registry,
}

impl IdVisitor for MappingCollector<'_> {
    fn item(&mut self, id: u16) -> u16 {
        if !self.table.record_item(id, self.registry) {
            log::debug!("Item {} has no registry name, leaving it out of the mapping", id);
        }
        id
    }

    fn block(&mut self, id: u16) -> u16 {
        self.table.record_block(id, self.registry);
        id
    }
}

fn is_numeric_id(tag: Option<&Tag>) -> bool {
    matches!(tag, Some(Tag::Short(_)) | Some(Tag::Int(_)))
}

/// The key holding the item ID, if `nbt` is an item record.
pub fn item_id_key(nbt: &Compound) -> Option<&'static str> {
    let counted = nbt.contains_key("Count");
    if is_numeric_id(nbt.get("id")) && counted && nbt.contains_key("Damage") {
        Some("id")
    } else if is_numeric_id(nbt.get("Item")) && counted && nbt.contains_key("Meta") {
        Some("Item")
    } else if matches!(nbt.get("id"), Some(Tag::Int(_))) {
        Some("id")
    } else {
        None
    }
}

/// Rewrites a short or int ID field. Shorts are treated as unsigned; ints keep
/// their upper 16 bits and have only the lower 16 replaced.
fn remap_id(tag: &Tag, mut f: impl FnMut(u16) -> u16) -> Tag {
    match tag {
        Tag::Short(v) => Tag::Short(f(*v as u16) as i16),
        Tag::Int(v) => Tag::Int(i32::from(f((*v & 0xFFFF) as u16)) | (*v & !0xFFFF)),
        other => other.clone(),
    }
}

/// Returns a copy of `nbt` with every item and block ID passed through `visitor`.
pub fn rewrite_ids(nbt: &Compound, visitor: &mut impl IdVisitor) -> Compound {
    if let Some(key) = item_id_key(nbt) {
        let mut item = nbt.clone();
        if let Some(id) = nbt.get(key) {
            item.insert(key, remap_id(id, |id| visitor.item(id)));
        }
        for nested in NESTED_ITEM_KEYS {
            if let Some(inner) = nbt.get_compound(nested) {
                item.insert(nested, Tag::Compound(rewrite_ids(inner, visitor)));
            }
        }
        return item;
    }

    let is_door = nbt.get_str("id") == Some(DOOR_TILE_ENTITY);
    let mut rewritten = Compound::with_capacity(nbt.len());
    for (key, tag) in nbt.iter() {
        let tag = match tag {
            Tag::Int(_) if is_door && DOOR_ITEM_FIELDS.contains(&key) => {
                remap_id(tag, |id| visitor.item(id))
            }
            Tag::Int(_) if is_door && key == DOOR_BLOCK_FIELD => remap_id(tag, |id| visitor.block(id)),
            Tag::Compound(inner) => Tag::Compound(rewrite_ids(inner, visitor)),
            Tag::List(list) => Tag::List(list.map_compounds(|inner| rewrite_ids(inner, visitor))),
            other => other.clone(),
        };
        rewritten.insert(key, tag);
    }
    rewritten
}

/// Translates the IDs in a tile-entity tree through `conversion`.
pub fn convert_ids(nbt: &Compound, conversion: &Conversion) -> Compound {
    let mut visitor = conversion;
    rewrite_ids(nbt, &mut visitor)
}

/// Adds the names of every ID found in `nbt` to `table`.
pub fn collect_mappings(nbt: &Compound, table: &mut RemapTable, registry: &dyn Registry) {
    let mut collector = MappingCollector { table, registry };
    rewrite_ids(nbt, &mut collector);
}
