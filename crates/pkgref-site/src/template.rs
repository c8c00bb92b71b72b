//! Template fragments.
//!
//! A page is assembled from a header, a title and a footer fragment plus a
//! body. Fragments are plain strings with `%`-prefixed placeholders; unknown
//! placeholders are left verbatim so a fragment can carry literal `%` signs.

use pkgref_config::TemplateSet;

/// A parameterized template fragment.
#[derive(Clone, Debug)]
pub struct Fragment {
    text: String,
}

impl Fragment {
    /// Create a fragment from its template text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Substitute `%key` placeholders with the given values.
    ///
    /// Longer keys are substituted first, so `%name` never clobbers a key it
    /// prefixes.
    #[must_use]
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut vars: Vec<(&str, &str)> = vars.to_vec();
        vars.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        let mut out = self.text.clone();
        for (key, value) in vars {
            out = out.replace(&format!("%{key}"), value);
        }
        out
    }
}

/// The three fragments every page is assembled from.
#[derive(Clone, Debug)]
pub struct PageTemplates {
    /// Emitted before the body.
    pub header: Fragment,
    /// Produces the text substituted for the header's `%title`.
    pub title: Fragment,
    /// Emitted after the body.
    pub footer: Fragment,
}

impl PageTemplates {
    /// Build the fragments from resolved configuration.
    #[must_use]
    pub fn from_config(templates: &TemplateSet) -> Self {
        Self {
            header: Fragment::new(&templates.header),
            title: Fragment::new(&templates.title),
            footer: Fragment::new(&templates.footer),
        }
    }
}
