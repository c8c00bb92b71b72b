//! Package description model and documentation providers for pkgref.
//!
//! This crate provides:
//! - [`PackageDescription`]: package metadata loaded from a TOML description file
//! - [`DocProvider`]: trait for looking up one-line function summaries
//! - [`FsDocProvider`]: filesystem-backed provider reading `<docs>/<function>.txt`
//!
//! With the `mock` feature, [`MockDocProvider`] offers an in-memory provider
//! for tests in downstream crates.

mod description;
mod docs;
#[cfg(feature = "mock")]
mod mock;

pub use description::{CategorySpec, Dependency, MetaError, PackageDescription};
pub use docs::{DocFetch, DocProvider, FsDocProvider};
#[cfg(feature = "mock")]
pub use mock::MockDocProvider;
