//! Per-letter, per-kind index buckets.
//!
//! Every kind carries a bucket for each of the 26 letters whether or not any
//! entry starts with that letter, because the downstream index files must
//! exist for every letter. Buckets map names to linear offsets into the
//! catalog's flattened summary sequence; `BTreeMap` iteration gives the
//! lexicographic (code-point order) emission the lookup pages rely on.

use std::collections::BTreeMap;

use crate::entry::{bucket_letter, split_class_method, split_namespaced, IndexError, Kind};

/// Sorted name → linear offset mapping for one letter.
pub type NameBucket = BTreeMap<String, usize>;

/// Sorted namespace/class → leaf name → linear offset mapping for one letter.
pub type GroupBucket = BTreeMap<String, NameBucket>;

static EMPTY_NAMES: NameBucket = NameBucket::new();
static EMPTY_GROUPS: GroupBucket = GroupBucket::new();

/// The fixed letter space of the index, `a` through `z`.
pub fn letters() -> impl Iterator<Item = char> {
    'a'..='z'
}

/// Per-letter buckets for all three kinds.
#[derive(Clone, Debug, Default)]
pub struct LetterIndex {
    plain: BTreeMap<char, NameBucket>,
    namespaces: BTreeMap<char, GroupBucket>,
    classes: BTreeMap<char, GroupBucket>,
}

impl LetterIndex {
    /// Create an index with all 26 buckets present and empty for each kind.
    #[must_use]
    pub fn new() -> Self {
        let mut index = Self::default();
        for letter in letters() {
            index.plain.insert(letter, NameBucket::new());
            index.namespaces.insert(letter, GroupBucket::new());
            index.classes.insert(letter, GroupBucket::new());
        }
        index
    }

    /// Insert an implemented entry under its kind and letter.
    pub(crate) fn insert(
        &mut self,
        name: &str,
        kind: Kind,
        offset: usize,
    ) -> Result<(), IndexError> {
        let letter = bucket_letter(name, kind)?;
        match kind {
            Kind::Plain => {
                self.plain
                    .entry(letter)
                    .or_default()
                    .insert(name.to_owned(), offset);
            }
            Kind::Namespaced => {
                let (ns, function) = split_namespaced(name);
                self.namespaces
                    .entry(letter)
                    .or_default()
                    .entry(ns.to_owned())
                    .or_default()
                    .insert(function.to_owned(), offset);
            }
            Kind::ClassMethod => {
                let (class, method) = split_class_method(name);
                self.classes
                    .entry(letter)
                    .or_default()
                    .entry(class.to_owned())
                    .or_default()
                    .insert(method.to_owned(), offset);
            }
        }
        Ok(())
    }

    /// Plain-function bucket for a letter.
    #[must_use]
    pub fn plain(&self, letter: char) -> &NameBucket {
        self.plain.get(&letter).unwrap_or(&EMPTY_NAMES)
    }

    /// Namespaced-function bucket for a letter, grouped by namespace.
    #[must_use]
    pub fn namespaced(&self, letter: char) -> &GroupBucket {
        self.namespaces.get(&letter).unwrap_or(&EMPTY_GROUPS)
    }

    /// Class-method bucket for a letter, grouped by class.
    #[must_use]
    pub fn class_methods(&self, letter: char) -> &GroupBucket {
        self.classes.get(&letter).unwrap_or(&EMPTY_GROUPS)
    }

    /// Total number of indexed entries across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        let plain: usize = self.plain.values().map(BTreeMap::len).sum();
        let grouped = |buckets: &BTreeMap<char, GroupBucket>| -> usize {
            buckets
                .values()
                .flat_map(BTreeMap::values)
                .map(BTreeMap::len)
                .sum()
        };
        plain + grouped(&self.namespaces) + grouped(&self.classes)
    }

    /// Whether no entry is indexed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_letters_present_when_empty() {
        let index = LetterIndex::new();
        for letter in letters() {
            assert!(index.plain(letter).is_empty());
            assert!(index.namespaced(letter).is_empty());
            assert!(index.class_methods(letter).is_empty());
        }
        assert!(index.is_empty());
    }

    #[test]
    fn letters_cover_exactly_a_to_z() {
        let all: Vec<char> = letters().collect();
        assert_eq!(all.len(), 26);
        assert_eq!(all.first(), Some(&'a'));
        assert_eq!(all.last(), Some(&'z'));
    }

    #[test]
    fn insert_routes_by_kind_and_letter() {
        let mut index = LetterIndex::new();
        index.insert("foo", Kind::Plain, 0).unwrap();
        index.insert("ns.qux", Kind::Namespaced, 1).unwrap();
        index.insert("@Bar/baz", Kind::ClassMethod, 2).unwrap();

        assert_eq!(index.plain('f').get("foo"), Some(&0));
        assert_eq!(index.namespaced('n').get("ns").and_then(|b| b.get("qux")), Some(&1));
        assert_eq!(
            index.class_methods('b').get("Bar").and_then(|b| b.get("baz")),
            Some(&2)
        );
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn buckets_emit_in_code_point_order() {
        let mut index = LetterIndex::new();
        index.insert("beta", Kind::Plain, 0).unwrap();
        index.insert("Beta", Kind::Plain, 1).unwrap();
        index.insert("bar", Kind::Plain, 2).unwrap();

        let names: Vec<&str> = index.plain('b').keys().map(String::as_str).collect();
        // Case-sensitive code-point order puts uppercase first.
        assert_eq!(names, ["Beta", "bar", "beta"]);
    }

    #[test]
    fn uppercase_names_share_the_lowercase_bucket() {
        let mut index = LetterIndex::new();
        index.insert("Filter", Kind::Plain, 0).unwrap();
        assert_eq!(index.plain('f').len(), 1);
    }
}
