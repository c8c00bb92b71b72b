//! CLI error types.

use pkgref_config::ConfigError;
use pkgref_manual::ManualError;
use pkgref_meta::MetaError;
use pkgref_site::SiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Meta(#[from] MetaError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Manual(#[from] ManualError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),
}
