//! Loader configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How relative paths declared inside a manifest are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathResolution {
    /// Relative to the directory that contains the manifest.
    #[default]
    ManifestDir,
    /// Relative to the process working directory, i.e. left as declared.
    WorkingDir,
}

impl PathResolution {
    /// The directory that relative paths in `manifest_path` resolve against.
    ///
    /// For [`PathResolution::WorkingDir`] this is the empty path, so joining
    /// onto it leaves a declared path unchanged.
    pub fn base_dir_for(&self, manifest_path: &Path) -> PathBuf {
        match self {
            Self::ManifestDir => manifest_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            Self::WorkingDir => PathBuf::new(),
        }
    }
}

/// Options for [`ModuleLoader`](crate::ModuleLoader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Resolution of manifest-declared paths.
    pub path_resolution: PathResolution,
    /// Read and validate manifests on the rayon thread pool.
    pub parallel: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            path_resolution: PathResolution::ManifestDir,
            parallel: true,
        }
    }
}
