use std::collections::HashMap;

use crate::list::List;
use crate::tag::Tag;

/// A string-keyed map of child tags.
///
/// Entries keep the order in which their keys were first inserted so that
/// encoding is reproducible. Replacing an existing key keeps its slot.
/// Equality ignores order: two compounds are equal when they hold the same
/// key/value pairs.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
    index: HashMap<String, usize>,
}

impl Compound {
    pub fn new() -> Self {
        Compound::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Compound {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a tag, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, tag: Tag) -> Option<Tag> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, tag)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, tag));
                None
            }
        }
    }

    /// Removes `key`, shifting later entries down to keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        let slot = self.index.remove(key)?;
        let (_, tag) = self.entries.remove(slot);
        for (name, _) in &self.entries[slot..] {
            if let Some(position) = self.index.get_mut(name) {
                *position -= 1;
            }
        }
        Some(tag)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        match self.index.get(key) {
            Some(&slot) => Some(&mut self.entries[slot].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(key, tag)| (key.as_str(), tag))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter().map(|(_, tag)| tag)
    }

    pub fn get_byte(&self, key: &str) -> Option<i8> {
        self.get(key).and_then(Tag::as_i8)
    }

    pub fn get_short(&self, key: &str) -> Option<i16> {
        self.get(key).and_then(Tag::as_i16)
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Tag::as_i32)
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Tag::as_i64)
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(Tag::as_f32)
    }

    pub fn get_double(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Tag::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Tag::as_string)
    }

    pub fn get_byte_array(&self, key: &str) -> Option<&[u8]> {
        self.get(key).and_then(Tag::as_byte_array)
    }

    pub fn get_list(&self, key: &str) -> Option<&List> {
        self.get(key).and_then(Tag::as_list)
    }

    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        self.get(key).and_then(Tag::as_compound)
    }
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, tag)| other.get(key).is_some_and(|theirs| theirs == tag))
    }
}

impl<K: Into<String>> FromIterator<(K, Tag)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, Tag)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        compound.extend(iter);
        compound
    }
}

impl<K: Into<String>> Extend<(K, Tag)> for Compound {
    fn extend<I: IntoIterator<Item = (K, Tag)>>(&mut self, iter: I) {
        for (key, tag) in iter {
            self.insert(key, tag);
        }
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = std::vec::IntoIter<(String, Tag)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
