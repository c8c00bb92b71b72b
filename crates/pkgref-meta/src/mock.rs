//! Mock documentation provider for testing.
//!
//! Provides [`MockDocProvider`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::docs::{truncate_to, DocFetch, DocProvider};

/// In-memory documentation provider.
///
/// Functions not registered with a builder method report [`DocFetch::NotFound`].
///
/// # Example
///
/// ```
/// use pkgref_meta::{DocFetch, DocProvider, MockDocProvider};
///
/// let docs = MockDocProvider::new()
///     .with_documented("filter", "Apply a filter.")
///     .with_undocumented("stub");
///
/// assert_eq!(
///     docs.first_sentence("filter", 80),
///     DocFetch::Documented("Apply a filter.".to_owned())
/// );
/// assert_eq!(docs.first_sentence("stub", 80), DocFetch::NotDocumented);
/// assert_eq!(docs.first_sentence("ghost", 80), DocFetch::NotFound);
/// ```
#[derive(Debug, Default)]
pub struct MockDocProvider {
    entries: HashMap<String, Option<String>>,
}

impl MockDocProvider {
    /// Create an empty mock where every lookup reports `NotFound`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a documented function with the given first sentence.
    #[must_use]
    pub fn with_documented(mut self, function: &str, sentence: &str) -> Self {
        self.entries
            .insert(function.to_owned(), Some(sentence.to_owned()));
        self
    }

    /// Register a function that exists but has no documentation text.
    #[must_use]
    pub fn with_undocumented(mut self, function: &str) -> Self {
        self.entries.insert(function.to_owned(), None);
        self
    }
}

impl DocProvider for MockDocProvider {
    fn first_sentence(&self, function: &str, max_len: usize) -> DocFetch {
        match self.entries.get(function) {
            Some(Some(sentence)) => DocFetch::Documented(truncate_to(sentence, max_len)),
            Some(None) => DocFetch::NotDocumented,
            None => DocFetch::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_applies_length_cap() {
        let docs = MockDocProvider::new().with_documented("filter", "Apply a filter.");
        assert_eq!(
            docs.first_sentence("filter", 5),
            DocFetch::Documented("Apply".to_owned())
        );
    }
}
