//! One-line function summaries.
//!
//! A [`DocProvider`] answers "what is the first sentence of this function's
//! documentation?" with an explicit three-way tag instead of an error type,
//! so callers match on the outcome rather than inspecting messages.

use std::path::PathBuf;

/// Outcome of a documentation lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocFetch {
    /// A first sentence was found; already capped at the requested length.
    Documented(String),
    /// The function is known but carries no documentation text.
    NotDocumented,
    /// No documentation source exists for the function at all.
    NotFound,
}

/// Source of one-line function summaries.
pub trait DocProvider {
    /// Return the first documentation sentence of `function`, hard-truncated
    /// to at most `max_len` bytes.
    fn first_sentence(&self, function: &str, max_len: usize) -> DocFetch;
}

/// Filesystem-backed documentation provider.
///
/// Looks up `<docs_dir>/<function>.txt`. The `/` in class-method names
/// (`@Class/method`) is flattened to `-` so a lookup never leaves the docs
/// directory.
pub struct FsDocProvider {
    docs_dir: PathBuf,
}

impl FsDocProvider {
    /// Create a provider reading from `docs_dir`.
    #[must_use]
    pub fn new(docs_dir: PathBuf) -> Self {
        Self { docs_dir }
    }

    fn doc_path(&self, function: &str) -> PathBuf {
        let filename = function.replace('/', "-");
        self.docs_dir.join(format!("{filename}.txt"))
    }
}

impl DocProvider for FsDocProvider {
    fn first_sentence(&self, function: &str, max_len: usize) -> DocFetch {
        let path = self.doc_path(function);
        let Ok(content) = std::fs::read_to_string(&path) else {
            tracing::debug!(path = %path.display(), "No documentation file");
            return DocFetch::NotFound;
        };
        if content.trim().is_empty() {
            return DocFetch::NotDocumented;
        }
        DocFetch::Documented(truncate_to(&first_sentence(&content), max_len))
    }
}

/// Extract the first sentence of a documentation text.
///
/// Whitespace is collapsed to single spaces; the sentence ends at the first
/// `.` followed by whitespace or end of text. Text without such a period is
/// returned whole.
pub(crate) fn first_sentence(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let bytes = collapsed.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'.' && bytes.get(i + 1).is_none_or(|next| *next == b' ') {
            return collapsed[..=i].to_owned();
        }
    }
    collapsed
}

/// Hard cut at `max_len` bytes, backing up to a character boundary.
/// No ellipsis is added.
pub(crate) fn truncate_to(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_owned();
    }
    let mut cut = max_len;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].to_owned()
}
