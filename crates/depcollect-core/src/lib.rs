//! Core data types for depcollect.
//!
//! This crate defines the package manifest model, the [`source::ManifestSource`]
//! capability the closure collector reads through, and the optional
//! configuration file.
//!
//! This crate is intentionally free of async code.

/// Default source tree holding one directory per installed package.
pub const DEFAULT_SOURCE: &str = "/app/node_modules";

/// Default destination tree receiving the copied packages.
pub const DEFAULT_DEST: &str = "/prisma-runtime/node_modules";

/// Default root package whose runtime closure is collected.
pub const DEFAULT_ROOT: &str = "prisma";

/// Manifest filename read inside each package directory.
pub const DEFAULT_MANIFEST_FILE: &str = "package.json";

pub mod config;
pub mod manifest;
pub mod source;
