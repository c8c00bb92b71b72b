//! Site generation pipeline.
//!
//! One [`SiteGenerator::run`] produces the whole output tree for one
//! package, strictly sequentially: catalog → `description.json` → pages →
//! letter indices → manual conversion and asset mirroring → website files.
//! All structures are built fresh per run and discarded; a fatal error
//! aborts the run via propagation.

use std::path::{Path, PathBuf};

use pkgref_config::GenerateConfig;
use pkgref_index::Catalog;
use pkgref_manual::{html_files, mirror_assets, AssetKind, ManualConverter};
use pkgref_meta::{DocProvider, PackageDescription};

use crate::pages::{copy_tree, PageWriter, SiteError};

/// Default stylesheet written to the output root when no website files
/// provide one.
const DEFAULT_STYLESHEET: &str = "\
body { font-family: sans-serif; margin: 2em auto; max-width: 50em; padding: 0 1em; }\n\
h1, h2 { border-bottom: 1px solid #ccc; }\n\
dt { font-family: monospace; margin-top: 0.5em; }\n\
table.package-summary th { text-align: left; padding-right: 1em; }\n\
pre { background: #f6f6f6; padding: 1em; overflow-x: auto; }\n";

/// Feature flags recorded in `description.json`.
///
/// Each flag reflects what the run actually produces, so a site consumer
/// can trust the flags without probing the tree.
#[derive(Clone, Copy, Debug)]
pub struct FeatureFlags {
    /// The overview page is generated.
    pub overview: bool,
    /// At least one implemented function is indexed.
    pub alphabetical_data: bool,
    /// Every implemented function has a real summary.
    pub short_description: bool,
    /// `NEWS.html` is generated.
    pub news: bool,
    /// The package manual is converted and mirrored.
    pub package_doc: bool,
    /// The landing page is generated.
    pub index: bool,
    /// `COPYING.html` is generated.
    pub license: bool,
    /// Website files are copied into the output root.
    pub website_files: bool,
    /// The package ships demo material.
    pub demos: bool,
}

impl FeatureFlags {
    fn from_run(config: &GenerateConfig, catalog: &Catalog) -> Self {
        Self {
            overview: config.pages.overview,
            alphabetical_data: catalog.implemented_count() > 0,
            short_description: catalog.fully_documented(),
            news: config.pages.news,
            package_doc: config.manual.source.is_some(),
            index: config.pages.index,
            license: config.pages.license,
            website_files: config.website_dir.is_some(),
            demos: config.pages.demos,
        }
    }
}

/// What a generation run produced.
#[derive(Debug)]
pub struct GeneratedSite {
    /// The package's output directory.
    pub package_dir: PathBuf,
    /// Number of implemented, indexed functions.
    pub function_count: usize,
    /// The converted manual's entry page, when a manual was configured.
    pub manual_entry: Option<PathBuf>,
}

/// Generates the static site for one package.
pub struct SiteGenerator<'a> {
    config: &'a GenerateConfig,
    package_dir: &'a Path,
}

impl<'a> SiteGenerator<'a> {
    /// Create a generator for the package rooted at `package_dir`.
    #[must_use]
    pub fn new(config: &'a GenerateConfig, package_dir: &'a Path) -> Self {
        Self {
            config,
            package_dir,
        }
    }

    /// Generate the full output tree for one package.
    pub fn run(
        &self,
        description: &PackageDescription,
        docs: &dyn DocProvider,
    ) -> Result<GeneratedSite, SiteError> {
        let catalog = Catalog::build(description, docs, self.config.summary_len)?;
        let flags = FeatureFlags::from_run(self.config, &catalog);

        let out_pkg = self.config.output_dir.join(&description.name);
        std::fs::create_dir_all(&out_pkg).map_err(|source| SiteError::Create {
            path: out_pkg.clone(),
            source,
        })?;
        tracing::info!(package = %description.name, output = %out_pkg.display(), "Generating site");

        let writer = PageWriter::new(out_pkg.clone(), &self.config.templates, description);

        writer.write_description(description, &flags)?;
        if flags.overview {
            writer.write_overview(&catalog)?;
        }
        writer.write_letter_indices(&catalog)?;

        let mut manual_entry = None;
        if let Some(source_rel) = &self.config.manual.source {
            manual_entry = Some(self.convert_manual(source_rel, &out_pkg)?);
        }

        if flags.index {
            let entry_name = manual_entry
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned());
            writer.write_index_page(description, &flags, entry_name.as_deref())?;
        }
        if flags.news {
            writer.write_news(&self.package_dir.join(&self.config.news_file))?;
        }
        if flags.license {
            writer.write_license(&self.package_dir.join(&self.config.license_file))?;
        }

        if let Some(website_dir) = &self.config.website_dir {
            let copied = copy_tree(
                &self.package_dir.join(website_dir),
                &self.config.output_dir,
            )?;
            tracing::debug!(files = copied, "Website files copied");
        }
        self.write_default_stylesheet()?;

        Ok(GeneratedSite {
            package_dir: out_pkg,
            function_count: catalog.implemented_count(),
            manual_entry,
        })
    }

    /// Convert the manual into `<pkg>/manual/` and mirror the assets every
    /// produced page references.
    fn convert_manual(&self, source_rel: &str, out_pkg: &Path) -> Result<PathBuf, SiteError> {
        let source = self.package_dir.join(source_rel);
        let manual_dir = out_pkg.join("manual");
        let converter = ManualConverter::new(self.config.manual.program.clone());
        let entry = converter.convert(&source, &manual_dir)?;

        let source_root = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => self.package_dir.to_path_buf(),
        };
        let pages = html_files(&manual_dir).map_err(|e| SiteError::Read {
            path: manual_dir.clone(),
            source: e,
        })?;
        for page in &pages {
            mirror_assets(page, AssetKind::Image, &source_root, &manual_dir)?;
            mirror_assets(page, AssetKind::Stylesheet, &source_root, &manual_dir)?;
        }
        Ok(entry)
    }

    /// Write the fallback stylesheet unless the output root already has one
    /// (website files may ship their own).
    fn write_default_stylesheet(&self) -> Result<(), SiteError> {
        let path = self.config.output_dir.join("pkgref.css");
        if path.exists() {
            return Ok(());
        }
        std::fs::write(&path, DEFAULT_STYLESHEET).map_err(|source| SiteError::Write {
            path,
            source,
        })
    }
}
