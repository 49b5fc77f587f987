//! # poseidon-cli
//!
//! The `poseidon` command-line front end. Every subcommand goes through the
//! library crates (discovery, loading, decoding) and only formats results:
//!
//! ```bash
//! poseidon list --root modules/
//! poseidon validate --root modules/ --resolve-paths cwd
//! poseidon inspect --root modules/ --module myTestModule1
//! ```
//!
//! Subcommand handlers write to a caller-supplied sink and return the
//! process exit code, so they can be driven from tests.

pub mod inspect;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use poseidon_module::{LoaderConfig, ModuleError, ModuleLoader, ModuleRegistry, PathResolution};
use poseidon_schema::SchemaValidator;

/// What relative paths inside a manifest are resolved against.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePaths {
    /// The directory holding the manifest.
    Manifest,
    /// The process working directory.
    Cwd,
}

impl From<ResolvePaths> for PathResolution {
    fn from(value: ResolvePaths) -> Self {
        match value {
            ResolvePaths::Manifest => PathResolution::ManifestDir,
            ResolvePaths::Cwd => PathResolution::WorkingDir,
        }
    }
}

/// Options shared by every subcommand that loads a corpus.
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Directory searched recursively for poseidon.json manifests.
    #[arg(long, value_name = "DIR")]
    pub root: PathBuf,

    /// Base for relative file paths declared in manifests.
    #[arg(long, value_enum, default_value_t = ResolvePaths::Manifest)]
    pub resolve_paths: ResolvePaths,

    /// Load manifests one at a time instead of in parallel.
    #[arg(long)]
    pub sequential: bool,

    /// Directory of JSON schemas to validate against (default: bundled).
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,
}

impl LoadArgs {
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            path_resolution: self.resolve_paths.into(),
            parallel: !self.sequential,
        }
    }

    /// Build the validator from `--schema-dir`, or the bundled schemas.
    pub fn validator(&self) -> Result<SchemaValidator> {
        let validator = match &self.schema_dir {
            Some(dir) => SchemaValidator::new(dir)
                .with_context(|| format!("failed to load JSON schemas from {}", dir.display()))?,
            None => SchemaValidator::bundled().context("failed to load bundled JSON schemas")?,
        };
        tracing::info!(
            schema_count = validator.schema_count(),
            "loaded schema registry"
        );
        Ok(validator)
    }

    /// Discover and load every module under `--root`.
    pub fn load(&self, validator: &SchemaValidator) -> Result<ModuleRegistry, ModuleError> {
        ModuleLoader::with_config(validator, self.loader_config())
            .load_modules_from_root(&self.root)
    }
}
