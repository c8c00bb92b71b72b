//! Catalog construction.
//!
//! One pass over the package description classifies every function, fetches
//! its summary through the [`DocProvider`], and fills the letter buckets.
//! The pass accumulates; emission is left to the site writer.

use pkgref_meta::{DocFetch, DocProvider, PackageDescription};

use crate::bucket::LetterIndex;
use crate::entry::{classify, FunctionEntry, IndexError};

/// Summary text recorded for functions that exist but carry no
/// documentation.
pub const NOT_DOCUMENTED: &str = "Not documented";

/// A category annotated for the overview page.
#[derive(Clone, Debug)]
pub struct Category {
    /// Category display name.
    pub name: String,
    /// Anchor derived from the name by keeping only alphabetic characters.
    ///
    /// Two categories reducing to the same alphabetic-only string share an
    /// anchor; collisions are not deduplicated.
    pub anchor: String,
    /// Entries in declaration order.
    pub entries: Vec<FunctionEntry>,
}

/// Derive a category anchor by keeping only alphabetic characters.
#[must_use]
pub fn anchor_id(name: &str) -> String {
    name.chars().filter(|c| c.is_alphabetic()).collect()
}

/// The indexed catalog of one package.
#[derive(Clone, Debug)]
pub struct Catalog {
    categories: Vec<Category>,
    offsets: Vec<usize>,
    summaries: Vec<Option<String>>,
    index: LetterIndex,
}

impl Catalog {
    /// Build the catalog for a package.
    ///
    /// Summaries are obtained through `docs`, capped at `summary_len` bytes.
    /// A function whose documentation source is missing entirely is marked
    /// not implemented and excluded from every bucket; a function with an
    /// empty documentation source stays implemented with the
    /// [`NOT_DOCUMENTED`] marker as its summary. Both cases emit a warning.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed function name; nothing is recoverable
    /// at that point.
    pub fn build(
        description: &PackageDescription,
        docs: &dyn DocProvider,
        summary_len: usize,
    ) -> Result<Self, IndexError> {
        let mut categories = Vec::with_capacity(description.categories.len());
        let mut offsets = Vec::with_capacity(description.categories.len());
        let mut summaries = Vec::with_capacity(description.function_count());
        let mut index = LetterIndex::new();
        let mut running = 0;

        for (category_index, spec) in description.categories.iter().enumerate() {
            offsets.push(running);
            let mut entries = Vec::with_capacity(spec.functions.len());

            for (position, name) in spec.functions.iter().enumerate() {
                let kind = classify(name)?;
                let (implemented, summary) = match docs.first_sentence(name, summary_len) {
                    DocFetch::Documented(sentence) => (true, Some(sentence)),
                    DocFetch::NotDocumented => {
                        tracing::warn!(function = %name, "Function has no documentation text");
                        (true, Some(NOT_DOCUMENTED.to_owned()))
                    }
                    DocFetch::NotFound => {
                        tracing::warn!(function = %name, "No documentation found, marking as not implemented");
                        (false, None)
                    }
                };

                let offset = running + position;
                if implemented {
                    index.insert(name, kind, offset)?;
                }
                summaries.push(summary.clone());
                entries.push(FunctionEntry {
                    name: name.clone(),
                    category: spec.name.clone(),
                    category_index,
                    position_in_category: position,
                    implemented,
                    summary,
                });
            }

            running += spec.functions.len();
            categories.push(Category {
                name: spec.name.clone(),
                anchor: anchor_id(&spec.name),
                entries,
            });
        }

        Ok(Self {
            categories,
            offsets,
            summaries,
            index,
        })
    }

    /// Categories in declaration order, annotated for the overview page.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The per-letter buckets.
    #[must_use]
    pub fn index(&self) -> &LetterIndex {
        &self.index
    }

    /// Linear offset of an entry into the original category-ordered listing.
    #[must_use]
    pub fn linear_offset(&self, entry: &FunctionEntry) -> usize {
        self.offsets[entry.category_index] + entry.position_in_category
    }

    /// Summary at a linear offset, if the entry there is documented.
    #[must_use]
    pub fn summary_at(&self, offset: usize) -> Option<&str> {
        self.summaries.get(offset)?.as_deref()
    }

    /// Entry at a linear offset.
    ///
    /// Scanned from the back so empty categories, which share their start
    /// offset with the following category, are skipped over.
    #[must_use]
    pub fn entry_at(&self, offset: usize) -> Option<&FunctionEntry> {
        for (category, start) in self.categories.iter().zip(&self.offsets).rev() {
            if offset >= *start {
                return category.entries.get(offset - start);
            }
        }
        None
    }

    /// Number of implemented entries.
    #[must_use]
    pub fn implemented_count(&self) -> usize {
        self.index.len()
    }

    /// Whether at least one implemented entry exists and every implemented
    /// entry carries a real summary rather than the [`NOT_DOCUMENTED`]
    /// marker.
    #[must_use]
    pub fn fully_documented(&self) -> bool {
        let mut any = false;
        for category in &self.categories {
            for entry in &category.entries {
                if !entry.implemented {
                    continue;
                }
                any = true;
                if entry.summary.as_deref() == Some(NOT_DOCUMENTED) || entry.summary.is_none() {
                    return false;
                }
            }
        }
        any
    }
}
