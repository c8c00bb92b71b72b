//! `pkgref generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use pkgref_config::{CliSettings, GenerateConfig};
use pkgref_meta::{FsDocProvider, PackageDescription};
use pkgref_site::SiteGenerator;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Package directory holding the description file, function docs and
    /// optional manual source.
    package_dir: PathBuf,

    /// Output root for the generated site (default: site/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Per-function docs directory, relative to the package (overrides config).
    #[arg(long)]
    docs_dir: Option<String>,

    /// Manual source file, relative to the package (overrides config).
    #[arg(long)]
    manual_source: Option<String>,

    /// Path to configuration file (default: <package>/pkgref.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        if !self.package_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Package directory not found: {}",
                self.package_dir.display()
            )));
        }

        let cli_settings = CliSettings {
            output_dir: self.output_dir.clone(),
            docs_dir: self.docs_dir.clone(),
            manual_source: self.manual_source.clone(),
        };
        let config = GenerateConfig::load(
            self.config.as_deref(),
            &self.package_dir,
            Some(&cli_settings),
        )?;

        let description =
            PackageDescription::from_toml_file(&self.package_dir.join(&config.description_file))?;
        let docs = FsDocProvider::new(self.package_dir.join(&config.docs_dir));

        output.info(&format!("pkgref {version}"));
        output.info(&format!("Package: {}", self.package_dir.display()));
        output.info(&format!("Output: {}", config.output_dir.display()));

        let site = SiteGenerator::new(&config, &self.package_dir).run(&description, &docs)?;

        output.success(&format!(
            "Site for {} generated to {} ({} functions indexed)",
            description.name,
            site.package_dir.display(),
            site.function_count
        ));
        Ok(())
    }
}
