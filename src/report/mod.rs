pub mod codec;
pub mod error;

pub use self::error::Error;

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::mem;
use std::slice;

/// A child collection as the codec encodes it: a lone child element stays a
/// `Single` until a second sibling with the same name arrives, then the
/// collection upgrades to `Many`. Traversal code never matches on this
/// directly; it goes through the normalizing accessors below.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Collapses the one-or-many encoding into an ordered sequence. A single
    /// value is wrapped, a sequence passes through unchanged.
    pub fn into_sequence(self) -> Vec<T> {
        match self {
            OneOrMany::Single(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Single(value) => slice::from_ref(value),
            OneOrMany::Many(values) => values.as_slice(),
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            OneOrMany::Single(value) => slice::from_mut(value),
            OneOrMany::Many(values) => values.as_mut_slice(),
        }
    }

    pub fn iter(&self) -> slice::Iter<T> {
        self.as_slice().iter()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, value: T) {
        let mut values = mem::replace(self, OneOrMany::Many(Vec::new())).into_sequence();
        values.push(value);
        *self = OneOrMany::Many(values);
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::Single(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

/// One node of a parsed report document. Attribute and child order follow
/// the source document (first appearance per child name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub attributes: IndexMap<String, String>,
    pub text: Option<String>,
    pub cdata: Option<String>,
    pub children: IndexMap<String, OneOrMany<Element>>,
}

impl Element {
    pub fn new() -> Self {
        Element::default()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Text or CDATA content, CDATA preferred.
    pub fn content(&self) -> Option<&str> {
        self.cdata.as_deref().or_else(|| self.text.as_deref())
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// All children with the given name as an ordered slice, empty when the
    /// name is absent.
    pub fn children_named(&self, name: &str) -> &[Element] {
        self.children
            .get(name)
            .map(OneOrMany::as_slice)
            .unwrap_or(&[])
    }

    pub fn children_named_mut(&mut self, name: &str) -> &mut [Element] {
        self.children
            .get_mut(name)
            .map(OneOrMany::as_mut_slice)
            .unwrap_or(&mut [])
    }

    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).first()
    }

    pub fn first_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children_named_mut(name).first_mut()
    }

    /// Removes and returns all children with the given name.
    pub fn take_children(&mut self, name: &str) -> Vec<Element> {
        self.children
            .shift_remove(name)
            .map(OneOrMany::into_sequence)
            .unwrap_or_default()
    }

    pub fn append_child(&mut self, name: impl Into<String>, child: Element) {
        match self.children.entry(name.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(child),
            Entry::Vacant(entry) => {
                entry.insert(OneOrMany::Single(child));
            }
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, name: impl Into<String>, child: Element) -> Self {
        self.append_child(name, child);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_into_sequence_wraps_single_value() {
        let single = OneOrMany::Single(1);

        assert_eq!(single.into_sequence(), vec![1]);
    }

    #[test]
    fn test_into_sequence_passes_sequence_through() {
        let many = OneOrMany::Many(vec![1, 2, 3]);

        assert_eq!(many.into_sequence(), vec![1, 2, 3]);
    }

    #[test]
    fn test_into_sequence_is_idempotent() {
        let single = OneOrMany::Single(7);
        let normalized = single.into_sequence();
        let renormalized = OneOrMany::Many(normalized.clone()).into_sequence();

        assert_eq!(renormalized, normalized);
    }

    #[test]
    fn test_push_upgrades_single_to_many() {
        let mut children = OneOrMany::Single(1);
        children.push(2);

        assert_eq!(children, OneOrMany::Many(vec![1, 2]));
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_append_child_keeps_document_order() {
        let mut element = Element::new();
        element.append_child("testcase", Element::new().with_attr("name", "first"));
        element.append_child("testcase", Element::new().with_attr("name", "second"));

        let names: Vec<_> = element
            .children_named("testcase")
            .iter()
            .map(|child| child.attr("name").unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_children_named_missing_is_empty() {
        let element = Element::new();

        assert!(element.children_named("testsuite").is_empty());
        assert!(element.first_child("testsuite").is_none());
    }

    #[test]
    fn test_content_prefers_cdata_over_text() {
        let mut element = Element::new();
        element.text = Some("plain".to_string());
        element.cdata = Some("trace".to_string());

        assert_eq!(element.content(), Some("trace"));
    }

    #[test]
    fn test_take_children_removes_collection() {
        let mut element = Element::new().with_child("feature", Element::new());
        let taken = element.take_children("feature");

        assert_eq!(taken.len(), 1);
        assert!(!element.has_child("feature"));
    }
}
