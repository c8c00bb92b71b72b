//! Configuration management for pkgref.
//!
//! Parses `pkgref.toml` configuration files with serde and resolves them into
//! one plain [`GenerateConfig`] value that components receive at construction
//! time. There is no global option table: everything a component needs is a
//! field here.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Template fragments
//!
//! The `[templates]` section carries the header, title and footer fragments
//! every HTML page is assembled from. Fragments are plain strings with
//! `%`-prefixed placeholders (`%title`, `%name`, `%pkgroot`); unknown
//! placeholders are left untouched.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for in the package directory.
const CONFIG_FILENAME: &str = "pkgref.toml";

/// Default page header fragment.
const DEFAULT_HEADER: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>%title</title>\n\
<link rel=\"stylesheet\" href=\"%pkgrootpkgref.css\">\n\
</head>\n<body>\n";

/// Default page title fragment.
const DEFAULT_TITLE: &str = "%title";

/// Default page footer fragment.
const DEFAULT_FOOTER: &str = "\n</body>\n</html>\n";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The config file is not valid TOML.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output root directory.
    pub output_dir: Option<PathBuf>,
    /// Override the per-function docs directory.
    pub docs_dir: Option<String>,
    /// Override the manual source file.
    pub manual_source: Option<String>,
}

/// Resolved generation configuration.
///
/// Produced once by [`GenerateConfig::load`] and passed into each component
/// at construction; components never reach back into the config layer.
#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Root directory the site is generated under.
    pub output_dir: PathBuf,
    /// Directory of per-function documentation files, relative to the
    /// package directory.
    pub docs_dir: String,
    /// Maximum summary length in bytes (hard cut, no ellipsis).
    pub summary_len: usize,
    /// Package description filename inside the package directory.
    pub description_file: String,
    /// News filename inside the package directory.
    pub news_file: String,
    /// License filename inside the package directory.
    pub license_file: String,
    /// Which optional pages to generate.
    pub pages: PageFlags,
    /// Manual conversion settings.
    pub manual: ManualConfig,
    /// Directory of static website files to copy verbatim into the output
    /// root, relative to the package directory.
    pub website_dir: Option<String>,
    /// Template fragments for page assembly.
    pub templates: TemplateSet,
}

/// Which optional pages a run generates.
#[derive(Clone, Debug)]
pub struct PageFlags {
    /// Generate the category overview page.
    pub overview: bool,
    /// Generate the package landing page.
    pub index: bool,
    /// Generate `NEWS.html` from the package news file.
    pub news: bool,
    /// Generate `COPYING.html` from the package license file.
    pub license: bool,
    /// Whether the package ships demo material.
    pub demos: bool,
}

/// Manual conversion settings.
#[derive(Clone, Debug)]
pub struct ManualConfig {
    /// External conversion program.
    pub program: String,
    /// Manual source file, relative to the package directory. `None`
    /// disables manual conversion.
    pub source: Option<String>,
}

/// Header, title and footer template fragments.
#[derive(Clone, Debug)]
pub struct TemplateSet {
    /// Fragment emitted before every page body.
    pub header: String,
    /// Fragment producing the `%title` text substituted into the header.
    pub title: String,
    /// Fragment emitted after every page body.
    pub footer: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("site"),
            docs_dir: "docs".to_owned(),
            summary_len: 80,
            description_file: "package.toml".to_owned(),
            news_file: "NEWS".to_owned(),
            license_file: "COPYING".to_owned(),
            pages: PageFlags::default(),
            manual: ManualConfig::default(),
            website_dir: None,
            templates: TemplateSet::default(),
        }
    }
}

impl Default for PageFlags {
    fn default() -> Self {
        Self {
            overview: true,
            index: true,
            news: false,
            license: false,
            demos: false,
        }
    }
}

impl Default for ManualConfig {
    fn default() -> Self {
        Self {
            program: "makeinfo".to_owned(),
            source: None,
        }
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            footer: DEFAULT_FOOTER.to_owned(),
        }
    }
}

/// Raw configuration as parsed from TOML. Every field is optional; absent
/// fields fall back to [`GenerateConfig`] defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    output: OutputRaw,
    docs: DocsRaw,
    package: PackageRaw,
    pages: PagesRaw,
    manual: ManualRaw,
    website: WebsiteRaw,
    templates: TemplatesRaw,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputRaw {
    dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DocsRaw {
    dir: Option<String>,
    summary_len: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageRaw {
    description_file: Option<String>,
    news_file: Option<String>,
    license_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PagesRaw {
    overview: Option<bool>,
    index: Option<bool>,
    news: Option<bool>,
    license: Option<bool>,
    demos: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManualRaw {
    program: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebsiteRaw {
    dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplatesRaw {
    header: Option<String>,
    title: Option<String>,
    footer: Option<String>,
}

impl GenerateConfig {
    /// Load configuration for a generation run.
    ///
    /// When `explicit` is given the file must exist. Otherwise
    /// `pkgref.toml` is looked up in `package_dir` and defaults apply when
    /// it is absent. CLI settings override file values last.
    pub fn load(
        explicit: Option<&Path>,
        package_dir: &Path,
        cli: Option<&CliSettings>,
    ) -> Result<GenerateConfig, ConfigError> {
        let raw = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::parse_file(path)?
            }
            None => {
                let discovered = package_dir.join(CONFIG_FILENAME);
                if discovered.is_file() {
                    Self::parse_file(&discovered)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let mut config = Self::resolve(raw);
        if let Some(cli) = cli {
            Self::apply_cli(&mut config, cli);
        }
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn resolve(raw: ConfigFile) -> GenerateConfig {
        let defaults = GenerateConfig::default();
        GenerateConfig {
            output_dir: raw
                .output
                .dir
                .map_or(defaults.output_dir, PathBuf::from),
            docs_dir: raw.docs.dir.unwrap_or(defaults.docs_dir),
            summary_len: raw.docs.summary_len.unwrap_or(defaults.summary_len),
            description_file: raw
                .package
                .description_file
                .unwrap_or(defaults.description_file),
            news_file: raw.package.news_file.unwrap_or(defaults.news_file),
            license_file: raw.package.license_file.unwrap_or(defaults.license_file),
            pages: PageFlags {
                overview: raw.pages.overview.unwrap_or(defaults.pages.overview),
                index: raw.pages.index.unwrap_or(defaults.pages.index),
                news: raw.pages.news.unwrap_or(defaults.pages.news),
                license: raw.pages.license.unwrap_or(defaults.pages.license),
                demos: raw.pages.demos.unwrap_or(defaults.pages.demos),
            },
            manual: ManualConfig {
                program: raw.manual.program.unwrap_or(defaults.manual.program),
                source: raw.manual.source,
            },
            website_dir: raw.website.dir,
            templates: TemplateSet {
                header: raw.templates.header.unwrap_or(defaults.templates.header),
                title: raw.templates.title.unwrap_or(defaults.templates.title),
                footer: raw.templates.footer.unwrap_or(defaults.templates.footer),
            },
        }
    }

    fn apply_cli(config: &mut GenerateConfig, cli: &CliSettings) {
        if let Some(output_dir) = &cli.output_dir {
            config.output_dir.clone_from(output_dir);
        }
        if let Some(docs_dir) = &cli.docs_dir {
            config.docs_dir.clone_from(docs_dir);
        }
        if let Some(source) = &cli.manual_source {
            config.manual.source = Some(source.clone());
        }
    }
}
