//! # Module Manifest
//!
//! Typed form of a validated `poseidon.json`. Values are only built by the
//! loader, from documents that already passed schema validation, and expose
//! read-only accessors so a loaded registry cannot drift from what is on disk.

use std::path::{Path, PathBuf};

use poseidon_core::GenotypeData;
use poseidon_schema::SchemaValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::PathResolution;

/// One module's manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleManifest {
    module_name: String,
    genotype_data: GenotypeData,
    meta_data_file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    maintainer: String,
    maintainer_email: String,
    version: String,
    #[serde(skip)]
    manifest_path: PathBuf,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ModuleManifest {
    /// Map a schema-validated document onto the typed model.
    ///
    /// A document that passed validation always deserializes; a failure here
    /// means the schema and this struct disagree, reported as a document
    /// load error for `manifest_path`.
    pub(crate) fn from_validated(
        document: Value,
        manifest_path: &Path,
        resolution: PathResolution,
    ) -> Result<Self, SchemaValidationError> {
        let mut manifest: ModuleManifest = serde_json::from_value(document).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: manifest_path.display().to_string(),
                reason: format!("manifest does not match the module model: {e}"),
            }
        })?;
        manifest.manifest_path = manifest_path.to_path_buf();
        manifest.base_dir = resolution.base_dir_for(manifest_path);
        Ok(manifest)
    }

    /// Module identifier, unique within a loaded registry.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The `genotypeData` section with paths as declared in the manifest.
    pub fn genotype_data(&self) -> &GenotypeData {
        &self.genotype_data
    }

    /// `metaDataFile` as declared.
    pub fn meta_data_file(&self) -> &Path {
        &self.meta_data_file
    }

    /// Free-text notes, if present.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn maintainer(&self) -> &str {
        &self.maintainer
    }

    pub fn maintainer_email(&self) -> &str {
        &self.maintainer_email
    }

    /// `MAJOR.MINOR.PATCH` version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path the manifest was loaded from.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Directory that relative declared paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The genotype file triple with paths resolved against [`Self::base_dir`].
    pub fn genotype_files(&self) -> GenotypeData {
        self.genotype_data.resolved_against(&self.base_dir)
    }

    /// `metaDataFile` resolved against [`Self::base_dir`].
    pub fn meta_data_path(&self) -> PathBuf {
        self.base_dir.join(&self.meta_data_file)
    }
}
