//! Function name classification.
//!
//! A function name's syntax determines its kind: `ns.fn` is namespaced,
//! `@Class/method` is a class method, anything else is a plain function.
//! Malformed names fail the run instead of being split on a guess.

/// Error type for catalog indexing.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A category lists an empty function name.
    #[error("Empty function name")]
    EmptyName,
    /// A name starts with `@` but is not a `@Class/method` reference.
    #[error("Malformed class method name '{0}': expected '@Class/method'")]
    MalformedClassMethod(String),
    /// A name contains `.` but lacks a namespace or function part.
    #[error("Malformed namespaced function name '{0}': expected 'namespace.function'")]
    MalformedNamespace(String),
    /// The character a name would be bucketed under is not `a`..`z`.
    #[error("Function name '{0}' does not start with a letter")]
    UnsupportedLeadingCharacter(String),
}

/// Classification of a function name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// An unqualified function name.
    Plain,
    /// A function inside a namespace (`ns.fn`).
    Namespaced,
    /// A method of a class (`@Class/method`).
    ClassMethod,
}

/// One function in the catalog, positioned within its category.
///
/// `category_index` and `position_in_category` give a stable linear offset
/// into the original category-ordered listing, used to fetch the matching
/// summary from the flattened summary sequence without recomputation.
#[derive(Clone, Debug)]
pub struct FunctionEntry {
    /// Function name as declared.
    pub name: String,
    /// Name of the category the entry belongs to.
    pub category: String,
    /// Index of the category in the package description.
    pub category_index: usize,
    /// Position of the entry within its category.
    pub position_in_category: usize,
    /// Whether documentation lookup succeeded for the entry.
    pub implemented: bool,
    /// One-line summary; `None` for not-implemented entries.
    pub summary: Option<String>,
}

/// Classify a function name by its syntax.
///
/// A name beginning with `@` must contain a `/` separating a non-empty class
/// from a non-empty method; anything else starting with `@` is malformed. A
/// name containing `.` must have non-empty text on both sides of the first
/// `.`.
pub fn classify(name: &str) -> Result<Kind, IndexError> {
    if name.is_empty() {
        return Err(IndexError::EmptyName);
    }
    if let Some(rest) = name.strip_prefix('@') {
        return match rest.split_once('/') {
            Some((class, method)) if !class.is_empty() && !method.is_empty() => {
                Ok(Kind::ClassMethod)
            }
            _ => Err(IndexError::MalformedClassMethod(name.to_owned())),
        };
    }
    if name.contains('.') {
        return match name.split_once('.') {
            Some((ns, function)) if !ns.is_empty() && !function.is_empty() => {
                Ok(Kind::Namespaced)
            }
            _ => Err(IndexError::MalformedNamespace(name.to_owned())),
        };
    }
    Ok(Kind::Plain)
}

/// Split a validated namespaced name into namespace and function.
pub(crate) fn split_namespaced(name: &str) -> (&str, &str) {
    name.split_once('.').unwrap_or((name, ""))
}

/// Split a validated class method name into class and method.
pub(crate) fn split_class_method(name: &str) -> (&str, &str) {
    let rest = name.strip_prefix('@').unwrap_or(name);
    rest.split_once('/').unwrap_or((rest, ""))
}

/// The character a name is bucketed under: position 1 for plain and
/// namespaced names, position 2 for class methods (skips the `@`),
/// lower-cased.
pub(crate) fn bucket_letter(name: &str, kind: Kind) -> Result<char, IndexError> {
    let significant = match kind {
        Kind::Plain | Kind::Namespaced => name.chars().next(),
        Kind::ClassMethod => name.chars().nth(1),
    };
    let Some(letter) = significant.map(|c| c.to_ascii_lowercase()) else {
        return Err(IndexError::EmptyName);
    };
    if letter.is_ascii_lowercase() {
        Ok(letter)
    } else {
        Err(IndexError::UnsupportedLeadingCharacter(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_plain() {
        assert_eq!(classify("filter").unwrap(), Kind::Plain);
    }

    #[test]
    fn classify_namespaced() {
        assert_eq!(classify("ns.qux").unwrap(), Kind::Namespaced);
        assert_eq!(classify("ns.sub.qux").unwrap(), Kind::Namespaced);
    }

    #[test]
    fn classify_class_method() {
        assert_eq!(classify("@Bar/baz").unwrap(), Kind::ClassMethod);
    }

    #[test]
    fn classify_rejects_empty_name() {
        assert!(matches!(classify(""), Err(IndexError::EmptyName)));
    }

    #[test]
    fn classify_rejects_at_without_slash() {
        assert!(matches!(
            classify("@Bar"),
            Err(IndexError::MalformedClassMethod(_))
        ));
    }

    #[test]
    fn classify_rejects_empty_class_or_method() {
        assert!(matches!(
            classify("@/baz"),
            Err(IndexError::MalformedClassMethod(_))
        ));
        assert!(matches!(
            classify("@Bar/"),
            Err(IndexError::MalformedClassMethod(_))
        ));
    }

    #[test]
    fn classify_rejects_dangling_dot() {
        assert!(matches!(
            classify(".qux"),
            Err(IndexError::MalformedNamespace(_))
        ));
        assert!(matches!(
            classify("ns."),
            Err(IndexError::MalformedNamespace(_))
        ));
    }

    #[test]
    fn bucket_letter_plain_uses_first_character() {
        assert_eq!(bucket_letter("Filter", Kind::Plain).unwrap(), 'f');
    }

    #[test]
    fn bucket_letter_namespaced_uses_namespace_character() {
        assert_eq!(bucket_letter("ns.qux", Kind::Namespaced).unwrap(), 'n');
    }

    #[test]
    fn bucket_letter_class_method_skips_at() {
        assert_eq!(bucket_letter("@Bar/baz", Kind::ClassMethod).unwrap(), 'b');
    }

    #[test]
    fn bucket_letter_rejects_non_letters() {
        assert!(matches!(
            bucket_letter("_private", Kind::Plain),
            Err(IndexError::UnsupportedLeadingCharacter(_))
        ));
        assert!(matches!(
            bucket_letter("@1st/go", Kind::ClassMethod),
            Err(IndexError::UnsupportedLeadingCharacter(_))
        ));
    }

    #[test]
    fn split_helpers() {
        assert_eq!(split_namespaced("ns.sub.qux"), ("ns", "sub.qux"));
        assert_eq!(split_class_method("@Bar/baz"), ("Bar", "baz"));
    }
}
