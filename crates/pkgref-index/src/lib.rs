//! Function catalog indexing for pkgref.
//!
//! This crate classifies a package's function names, annotates each category
//! for the overview page, and partitions implemented functions into
//! per-letter buckets for the alphabetical lookup pages:
//!
//! - [`classify`]: plain / namespaced (`ns.fn`) / class method
//!   (`@Class/method`) syntax classification
//! - [`Catalog`]: the per-category listing plus the letter buckets, built in
//!   one pass over the package description
//! - [`LetterIndex`]: 26 always-present buckets per kind, sorted for emission
//!
//! Buckets reference entries by their linear offset into the original
//! category-ordered listing, so a bucket lookup never recomputes summaries.

mod bucket;
mod catalog;
mod entry;

pub use bucket::{letters, GroupBucket, LetterIndex, NameBucket};
pub use catalog::{anchor_id, Catalog, Category, NOT_DOCUMENTED};
pub use entry::{classify, FunctionEntry, IndexError, Kind};
