//! # poseidon-module: Module Discovery and Loading
//!
//! A Poseidon module is a directory holding a `poseidon.json` manifest plus
//! the genotype and annotation files it declares. This crate turns a tree of
//! such directories into a validated, typed [`ModuleRegistry`]:
//!
//! 1. [`find_module_manifests`] walks a root directory and returns every
//!    manifest path, sorted.
//! 2. [`ModuleLoader::load_modules`] reads and schema-validates each manifest,
//!    maps it onto [`ModuleManifest`], and rejects the whole batch if two
//!    manifests share a module name.
//!
//! ## Path resolution
//!
//! Paths declared inside a manifest are resolved according to
//! [`LoaderConfig::path_resolution`]. The default,
//! [`PathResolution::ManifestDir`], resolves them against the directory that
//! contains the manifest. [`ModuleManifest::genotype_files`] and
//! [`ModuleManifest::meta_data_path`] return resolved paths;
//! [`ModuleManifest::genotype_data`] returns them as declared.
//!
//! ## Errors
//!
//! [`ModuleError`] separates structural failures (a manifest that does not
//! match the schema) from business-rule failures (colliding module names).

pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod manifest;

pub use config::{LoaderConfig, PathResolution};
pub use discovery::{find_module_manifests, MANIFEST_FILENAME};
pub use error::ModuleError;
pub use loader::{load_modules, ModuleLoader, ModuleRegistry};
pub use manifest::ModuleManifest;
