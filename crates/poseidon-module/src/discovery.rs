//! # Module Discovery
//!
//! Finds every `poseidon.json` below a root directory. Nothing is parsed
//! here; the result is a sorted list of paths so downstream errors and test
//! assertions do not depend on directory enumeration order.

use std::path::{Path, PathBuf};

/// Reserved filename of a module manifest.
pub const MANIFEST_FILENAME: &str = "poseidon.json";

/// Recursively collect every file named [`MANIFEST_FILENAME`] under `root`.
///
/// Directories are searched to any depth. Symbolic links to directories are
/// not followed. The returned paths are sorted.
///
/// # Errors
///
/// Any I/O error (missing or unreadable directory) is returned unmodified.
pub fn find_module_manifests(root: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();
    walk_for_manifests(root.as_ref(), &mut manifests)?;
    manifests.sort();
    tracing::debug!(
        root = %root.as_ref().display(),
        count = manifests.len(),
        "module discovery finished"
    );
    Ok(manifests)
}

fn walk_for_manifests(dir: &Path, acc: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            walk_for_manifests(&path, acc)?;
        } else if entry.file_name() == MANIFEST_FILENAME && path.is_file() {
            tracing::debug!(path = %path.display(), "found module manifest");
            acc.push(path);
        }
    }
    Ok(())
}
