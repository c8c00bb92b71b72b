//! Package description loading.
//!
//! A package ships a TOML description file listing its metadata, dependencies
//! and categorized function names. The file is read once per generation run
//! and never written back.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Error type for package description loading.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// The description file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Path of the description file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The description file is not valid TOML or misses required fields.
    #[error("Invalid package description: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Package metadata as declared in the description file.
#[derive(Clone, Debug, Deserialize)]
pub struct PackageDescription {
    /// Package name, used for the output subdirectory.
    pub name: String,
    /// Package version string.
    pub version: String,
    /// Release date, if declared.
    #[serde(default)]
    pub date: Option<String>,
    /// Package author.
    pub author: String,
    /// Current maintainer.
    pub maintainer: String,
    /// License identifier (e.g. "GPL-3.0+").
    pub license: String,
    /// Homepage URL, if any.
    #[serde(default)]
    pub url: Option<String>,
    /// Packages this one depends on.
    #[serde(default)]
    pub depends: Vec<Dependency>,
    /// Ordered function categories.
    #[serde(default)]
    pub categories: Vec<CategorySpec>,
}

/// A single dependency with an optional version constraint.
#[derive(Clone, Debug, Deserialize)]
pub struct Dependency {
    /// Name of the required package.
    pub package: String,
    /// Comparison operator (e.g. ">="), if constrained.
    #[serde(default)]
    pub operator: Option<String>,
    /// Version the operator compares against.
    #[serde(default)]
    pub version: Option<String>,
}

/// A named category with its ordered function list.
#[derive(Clone, Debug, Deserialize)]
pub struct CategorySpec {
    /// Category display name.
    pub name: String,
    /// Function names in declaration order.
    #[serde(default)]
    pub functions: Vec<String>,
}

impl PackageDescription {
    /// Load a package description from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, MetaError> {
        let content = std::fs::read_to_string(path).map_err(|source| MetaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a package description from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, MetaError> {
        Ok(toml::from_str(content)?)
    }

    /// Total number of functions across all categories.
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.categories.iter().map(|c| c.functions.len()).sum()
    }
}

impl Dependency {
    /// Render the version constraint, e.g. `>= 7.1.0`, or an empty string
    /// when the dependency is unconstrained.
    #[must_use]
    pub fn constraint(&self) -> String {
        match (&self.operator, &self.version) {
            (Some(op), Some(version)) => format!("{op} {version}"),
            (None, Some(version)) => version.clone(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DESCRIPTION: &str = r#"
name = "signal"
version = "1.4.0"
date = "2026-03-01"
author = "Jane Doe"
maintainer = "Jane Doe <jane@example.org>"
license = "GPL-3.0+"
url = "https://example.org/signal"

[[depends]]
package = "core"
operator = ">="
version = "7.1.0"

[[depends]]
package = "control"

[[categories]]
name = "Filtering"
functions = ["filter", "sgolay"]

[[categories]]
name = "Transforms"
functions = ["dct"]
"#;

    #[test]
    fn parse_full_description() {
        let desc = PackageDescription::from_toml_str(DESCRIPTION).unwrap();
        assert_eq!(desc.name, "signal");
        assert_eq!(desc.version, "1.4.0");
        assert_eq!(desc.date.as_deref(), Some("2026-03-01"));
        assert_eq!(desc.depends.len(), 2);
        assert_eq!(desc.categories.len(), 2);
        assert_eq!(desc.categories[0].functions, ["filter", "sgolay"]);
        assert_eq!(desc.function_count(), 3);
    }

    #[test]
    fn parse_minimal_description() {
        let desc = PackageDescription::from_toml_str(
            r#"
name = "tiny"
version = "0.1.0"
author = "A"
maintainer = "A"
license = "MIT"
"#,
        )
        .unwrap();
        assert!(desc.date.is_none());
        assert!(desc.url.is_none());
        assert!(desc.depends.is_empty());
        assert!(desc.categories.is_empty());
        assert_eq!(desc.function_count(), 0);
    }

    #[test]
    fn parse_missing_required_field() {
        let result = PackageDescription::from_toml_str(r#"name = "broken""#);
        assert!(result.is_err());
    }

    #[test]
    fn dependency_constraint_forms() {
        let desc = PackageDescription::from_toml_str(DESCRIPTION).unwrap();
        assert_eq!(desc.depends[0].constraint(), ">= 7.1.0");
        assert_eq!(desc.depends[1].constraint(), "");
    }

    #[test]
    fn from_toml_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = PackageDescription::from_toml_file(&dir.path().join("package.toml"));
        assert!(matches!(result, Err(MetaError::Read { .. })));
    }

    #[test]
    fn from_toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.toml");
        std::fs::write(&path, DESCRIPTION).unwrap();
        let desc = PackageDescription::from_toml_file(&path).unwrap();
        assert_eq!(desc.name, "signal");
    }
}
