//! Page assembly and site generation for pkgref.
//!
//! This crate provides:
//! - [`escape_html`]: HTML entity escaping
//! - [`Record`]: insertion-ordered metadata records and their
//!   object-notation serializer
//! - [`Fragment`]/[`PageTemplates`]: `%`-placeholder template fragments
//! - [`PageWriter`]: emission of every static page and index artifact
//! - [`SiteGenerator`]: the sequential generation pipeline for one package
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use pkgref_config::GenerateConfig;
//! use pkgref_meta::{FsDocProvider, PackageDescription};
//! use pkgref_site::SiteGenerator;
//!
//! let package_dir = Path::new("signal");
//! let config = GenerateConfig::default();
//! let description = PackageDescription::from_toml_file(&package_dir.join("package.toml"))?;
//! let docs = FsDocProvider::new(package_dir.join(&config.docs_dir));
//!
//! let site = SiteGenerator::new(&config, package_dir).run(&description, &docs)?;
//! println!("{} functions indexed", site.function_count);
//! # Ok(())
//! # }
//! ```

mod escape;
mod generator;
mod pages;
mod record;
mod template;

pub use escape::escape_html;
pub use generator::{FeatureFlags, GeneratedSite, SiteGenerator};
pub use pages::{copy_tree, PageWriter, SiteError};
pub use record::{Record, Value};
pub use template::{Fragment, PageTemplates};
