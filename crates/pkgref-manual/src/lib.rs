//! Manual conversion and asset mirroring for pkgref.
//!
//! This crate provides:
//! - [`ManualConverter`]: synchronous invocation of the external
//!   manual-conversion program, with entry-page resolution
//! - [`mirror_assets`]: line-oriented scanning of a converted page for
//!   image/stylesheet references and replication of the referenced files
//!   into the output tree

mod assets;
mod convert;

pub use assets::{mirror_assets, AssetError, AssetKind};
pub use convert::{html_files, ManualConverter, ManualError};
