use crate::compound::Compound;
use crate::error::NbtError;
use crate::tag::{Tag, TagType};

/// A homogeneous list of tags with an explicit element type.
///
/// The element type is kept even when the list is empty, and every element
/// is checked against it on the way in.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: TagType,
    items: Vec<Tag>,
}

impl List {
    pub fn new(element: TagType) -> Self {
        List {
            element,
            items: Vec::new(),
        }
    }

    pub fn with_items(element: TagType, items: Vec<Tag>) -> Result<Self, NbtError> {
        if let Some(stray) = items.iter().find(|item| item.tag_type() != element) {
            return Err(NbtError::ListElementMismatch {
                declared: element,
                found: stray.tag_type(),
            });
        }
        Ok(List { element, items })
    }

    /// Builds a list typed after its first element, or an `End` list when empty.
    pub fn from_items(items: Vec<Tag>) -> Result<Self, NbtError> {
        let element = items.first().map_or(TagType::End, Tag::tag_type);
        List::with_items(element, items)
    }

    pub fn of_compounds(items: impl IntoIterator<Item = Compound>) -> Self {
        List {
            element: TagType::Compound,
            items: items.into_iter().map(Tag::Compound).collect(),
        }
    }

    pub fn of_doubles(values: &[f64]) -> Self {
        List {
            element: TagType::Double,
            items: values.iter().copied().map(Tag::Double).collect(),
        }
    }

    pub fn of_floats(values: &[f32]) -> Self {
        List {
            element: TagType::Float,
            items: values.iter().copied().map(Tag::Float).collect(),
        }
    }

    /// Appends a tag. An empty `End` list adopts the type of its first element.
    pub fn push(&mut self, tag: Tag) -> Result<(), NbtError> {
        if self.items.is_empty() && self.element == TagType::End {
            self.element = tag.tag_type();
        }
        if tag.tag_type() != self.element {
            return Err(NbtError::ListElementMismatch {
                declared: self.element,
                found: tag.tag_type(),
            });
        }
        self.items.push(tag);
        Ok(())
    }

    pub fn element_type(&self) -> TagType {
        self.element
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn compounds(&self) -> impl Iterator<Item = &Compound> {
        self.items.iter().filter_map(Tag::as_compound)
    }

    /// Rebuilds the list with every compound element passed through `f`.
    /// Elements of other types are cloned unchanged, so the element type holds.
    pub fn map_compounds(&self, mut f: impl FnMut(&Compound) -> Compound) -> List {
        let items = self
            .items
            .iter()
            .map(|item| match item {
                Tag::Compound(compound) => Tag::Compound(f(compound)),
                other => other.clone(),
            })
            .collect();
        List {
            element: self.element,
            items,
        }
    }

    /// Reads element `index` as a number, falling back to `0.0`.
    pub fn float_at(&self, index: usize) -> f64 {
        self.get(index).and_then(Tag::to_float).unwrap_or(0.0)
    }

    pub(crate) fn from_parts(element: TagType, items: Vec<Tag>) -> Self {
        List { element, items }
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_mixed_elements_rejected() {
        let result = List::with_items(TagType::Int, vec![Tag::Int(1), Tag::from("two")]);
        assert_matches!(
            result,
            Err(NbtError::ListElementMismatch {
                declared: TagType::Int,
                found: TagType::String
            })
        );

        let mut list = List::new(TagType::Int);
        assert!(list.push(Tag::Int(1)).is_ok());
        assert_matches!(list.push(Tag::Short(1)), Err(NbtError::ListElementMismatch { .. }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_empty_list_keeps_type() {
        let list = List::new(TagType::Compound);
        assert!(list.is_empty());
        assert_eq!(list.element_type(), TagType::Compound);
        assert_ne!(list, List::new(TagType::End));

        let inferred = List::from_items(vec![]).unwrap();
        assert_eq!(inferred.element_type(), TagType::End);
    }

    #[test]
    fn test_end_list_adopts_first_element() {
        let mut list = List::new(TagType::End);
        list.push(Tag::Double(1.0)).unwrap();
        assert_eq!(list.element_type(), TagType::Double);
    }

    #[test]
    fn test_map_compounds() {
        let slot: Compound = [("Slot", Tag::Byte(0))].into_iter().collect();
        let list = List::of_compounds(vec![slot]);
        let mapped = list.map_compounds(|c| {
            let mut c = c.clone();
            c.insert("Count", Tag::Byte(64));
            c
        });
        assert_eq!(mapped.compounds().next().unwrap().get_byte("Count"), Some(64));
        assert_eq!(mapped.element_type(), TagType::Compound);
    }

    #[test]
    fn test_float_at_is_lenient() {
        let list = List::of_doubles(&[1.5, 2.5]);
        assert_eq!(list.float_at(1), 2.5);
        assert_eq!(list.float_at(5), 0.0);

        let ints = List::from_items(vec![Tag::Int(3)]).unwrap();
        assert_eq!(ints.float_at(0), 3.0);
    }
}
