//! Asset reference scanning and copying.
//!
//! Converted manual pages reference images and stylesheets relative to the
//! manual source. The scan is line-oriented regex matching over attribute
//! syntax, not a full HTML parse; the pages come from a trusted conversion
//! step. Three rules decide what gets copied: the kind-specific attribute
//! pattern selects candidates, URLs containing `//` are external, URLs
//! containing `..` are traversal attempts. Rejections and per-asset copy
//! failures are warnings; only failing to read the scanned page is fatal.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:img|object)\b[^>]*?(?:src|data)\s*=\s*"([^"]+)""#).unwrap()
});

static STYLESHEET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:link|object)\b[^>]*?(?:href|data)\s*=\s*"([^"]+\.css)""#).unwrap()
});

/// Which kind of asset reference to scan for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// `<img src="...">` and `<object data="...">` references.
    Image,
    /// `<link href="....css">` and `<object data="....css">` references.
    Stylesheet,
}

impl AssetKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Image => &IMAGE_PATTERN,
            Self::Stylesheet => &STYLESHEET_PATTERN,
        }
    }
}

/// Error type for asset scanning.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The page to scan could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Path of the scanned page.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Scan a converted page for asset references of one kind and copy each
/// accepted reference from `source_root` to the same relative path under
/// `output_root`.
///
/// Returns the number of files copied. Rejected, missing and uncopiable
/// references produce warnings and are skipped; a malformed line never
/// fails the scan.
pub fn mirror_assets(
    page: &Path,
    kind: AssetKind,
    source_root: &Path,
    output_root: &Path,
) -> Result<usize, AssetError> {
    let content = std::fs::read_to_string(page).map_err(|source| AssetError::Read {
        path: page.to_path_buf(),
        source,
    })?;

    let mut copied = 0;
    for line in content.lines() {
        for caps in kind.pattern().captures_iter(line) {
            let url = &caps[1];
            if copy_reference(url, source_root, output_root) {
                copied += 1;
            }
        }
    }
    Ok(copied)
}

/// Apply the exclusion rules to one candidate URL and copy it if accepted.
fn copy_reference(url: &str, source_root: &Path, output_root: &Path) -> bool {
    if url.contains("//") {
        tracing::warn!(url = %url, "Skipping external asset reference");
        return false;
    }
    if url.contains("..") {
        tracing::warn!(url = %url, "Skipping path-traversal asset reference");
        return false;
    }

    let relative = Path::new(url);
    if let Some(dir) = relative.parent() {
        if !dir.as_os_str().is_empty() {
            let target_dir = output_root.join(dir);
            if !target_dir.is_dir() {
                if let Err(e) = std::fs::create_dir_all(&target_dir) {
                    tracing::warn!(url = %url, error = %e, "Failed to create asset directory");
                    return false;
                }
            }
        }
    }

    let source = source_root.join(relative);
    if !source.is_file() {
        tracing::warn!(url = %url, "Referenced asset not found, skipping");
        return false;
    }

    match std::fs::copy(&source, output_root.join(relative)) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to copy asset");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        source_root: PathBuf,
        output_root: PathBuf,
        page: PathBuf,
    }

    fn fixture(page_content: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let source_root = dir.path().join("manual-src");
        let output_root = dir.path().join("out");
        std::fs::create_dir_all(&source_root).unwrap();
        std::fs::create_dir_all(&output_root).unwrap();
        let page = output_root.join("manual.html");
        std::fs::write(&page, page_content).unwrap();
        Fixture {
            _dir: dir,
            source_root,
            output_root,
            page,
        }
    }

    #[test]
    fn copies_referenced_image_into_subdirectory() {
        let fx = fixture(r#"<p>intro</p><img alt="pic" src="img/pic.png">"#);
        std::fs::create_dir_all(fx.source_root.join("img")).unwrap();
        std::fs::write(fx.source_root.join("img/pic.png"), b"png").unwrap();

        let copied =
            mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root).unwrap();

        assert_eq!(copied, 1);
        assert!(fx.output_root.join("img/pic.png").is_file());
    }

    #[test]
    fn never_copies_traversal_urls_even_when_target_exists() {
        let fx = fixture(r#"<img src="../secret.png">"#);
        // The target resolves to an existing file; it must still be skipped.
        std::fs::write(fx.source_root.parent().unwrap().join("secret.png"), b"x").unwrap();

        let copied =
            mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root).unwrap();

        assert_eq!(copied, 0);
        // Nothing new appears in the output tree.
        let entries: Vec<_> = std::fs::read_dir(&fx.output_root)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["manual.html"]);
    }

    #[test]
    fn never_copies_external_urls() {
        let fx = fixture(r#"<img src="https://example.org/pic.png"><img src="//cdn/pic.png">"#);

        let copied =
            mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root).unwrap();

        assert_eq!(copied, 0);
    }

    #[test]
    fn missing_asset_is_skipped_not_fatal() {
        let fx = fixture(r#"<img src="gone.png">"#);

        let copied =
            mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root).unwrap();

        assert_eq!(copied, 0);
    }

    #[test]
    fn stylesheet_kind_matches_link_href() {
        let fx = fixture(
            r#"<link rel="stylesheet" href="style/manual.css"><img src="img/pic.png">"#,
        );
        std::fs::create_dir_all(fx.source_root.join("style")).unwrap();
        std::fs::write(fx.source_root.join("style/manual.css"), "body {}").unwrap();

        let copied = mirror_assets(
            &fx.page,
            AssetKind::Stylesheet,
            &fx.source_root,
            &fx.output_root,
        )
        .unwrap();

        // Only the stylesheet; the image is a different kind.
        assert_eq!(copied, 1);
        assert!(fx.output_root.join("style/manual.css").is_file());
    }

    #[test]
    fn stylesheet_kind_matches_object_data() {
        let fx = fixture(r#"<object data="extra.css"></object>"#);
        std::fs::write(fx.source_root.join("extra.css"), "p {}").unwrap();

        let copied = mirror_assets(
            &fx.page,
            AssetKind::Stylesheet,
            &fx.source_root,
            &fx.output_root,
        )
        .unwrap();

        assert_eq!(copied, 1);
    }

    #[test]
    fn image_kind_matches_object_data() {
        let fx = fixture(r#"<object data="fig.svg"></object>"#);
        std::fs::write(fx.source_root.join("fig.svg"), "<svg/>").unwrap();

        let copied =
            mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root).unwrap();

        assert_eq!(copied, 1);
    }

    #[test]
    fn multiple_references_on_one_line() {
        let fx = fixture(r#"<img src="a.png"><img src="b.png">"#);
        std::fs::write(fx.source_root.join("a.png"), b"a").unwrap();
        std::fs::write(fx.source_root.join("b.png"), b"b").unwrap();

        let copied =
            mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root).unwrap();

        assert_eq!(copied, 2);
    }

    #[test]
    fn malformed_markup_never_fails_the_scan() {
        let fx = fixture("<img src=\"unterminated\n<img\n<<<>>>");

        let result = mirror_assets(&fx.page, AssetKind::Image, &fx.source_root, &fx.output_root);

        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn unreadable_page_is_fatal() {
        let fx = fixture("");
        let missing = fx.output_root.join("absent.html");

        let result = mirror_assets(&missing, AssetKind::Image, &fx.source_root, &fx.output_root);

        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
