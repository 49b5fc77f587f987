//! # Module Loading
//!
//! Reads, validates and types a batch of manifests, then enforces that module
//! names are unique across the batch.
//!
//! ## Ordering
//!
//! Per-manifest work has no shared mutable state and runs on the rayon pool
//! when [`LoaderConfig::parallel`] is set. Results are always collected in
//! input order: the error reported for a failing batch is the first failure
//! in input order, and the duplicate-name check runs once, after every
//! manifest has loaded, over the ordered names. Output never depends on
//! scheduling.

use std::path::{Path, PathBuf};

use poseidon_core::{find_duplicates, PoseidonError};
use poseidon_schema::SchemaValidator;
use rayon::prelude::*;

use crate::config::LoaderConfig;
use crate::discovery::find_module_manifests;
use crate::error::ModuleError;
use crate::manifest::ModuleManifest;

/// Manifests loaded together, in input order, with pairwise distinct names.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleManifest>,
}

impl ModuleRegistry {
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleManifest> {
        self.modules.iter()
    }

    /// Look up a module by name.
    pub fn get(&self, module_name: &str) -> Option<&ModuleManifest> {
        self.modules.iter().find(|m| m.module_name() == module_name)
    }

    /// Module names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.module_name()).collect()
    }

    pub fn into_inner(self) -> Vec<ModuleManifest> {
        self.modules
    }
}

impl IntoIterator for ModuleRegistry {
    type Item = ModuleManifest;
    type IntoIter = std::vec::IntoIter<ModuleManifest>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModuleRegistry {
    type Item = &'a ModuleManifest;
    type IntoIter = std::slice::Iter<'a, ModuleManifest>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

/// Loads manifests against a shared [`SchemaValidator`].
#[derive(Debug, Clone)]
pub struct ModuleLoader<'v> {
    validator: &'v SchemaValidator,
    config: LoaderConfig,
}

impl<'v> ModuleLoader<'v> {
    /// Loader with the default configuration (manifest-relative paths,
    /// parallel loading).
    pub fn new(validator: &'v SchemaValidator) -> Self {
        Self::with_config(validator, LoaderConfig::default())
    }

    pub fn with_config(validator: &'v SchemaValidator, config: LoaderConfig) -> Self {
        Self { validator, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read, validate and type a single manifest.
    ///
    /// # Errors
    ///
    /// [`ModuleError::Validation`] carrying the validator's error unchanged.
    pub fn load_module(&self, path: &Path) -> Result<ModuleManifest, ModuleError> {
        let document = self.validator.validate_file(path)?;
        let manifest =
            ModuleManifest::from_validated(document, path, self.config.path_resolution)?;
        tracing::debug!(
            module = manifest.module_name(),
            path = %path.display(),
            "loaded module manifest"
        );
        Ok(manifest)
    }

    /// Load every manifest in `paths` into one registry.
    ///
    /// Fails as a whole: no partial registry is ever returned.
    ///
    /// # Errors
    ///
    /// - [`ModuleError::Validation`] for the first manifest, in input order,
    ///   that cannot be read or does not match the schema.
    /// - [`ModuleError::Poseidon`] with
    ///   [`PoseidonError::DuplicateModuleNames`] if any name occurs twice,
    ///   including when the same path is listed twice.
    pub fn load_modules<P>(&self, paths: &[P]) -> Result<ModuleRegistry, ModuleError>
    where
        P: AsRef<Path> + Sync,
    {
        let modules: Vec<ModuleManifest> = if self.config.parallel {
            let results: Vec<Result<ModuleManifest, ModuleError>> = paths
                .par_iter()
                .map(|p| self.load_module(p.as_ref()))
                .collect();
            results.into_iter().collect::<Result<_, _>>()?
        } else {
            paths
                .iter()
                .map(|p| self.load_module(p.as_ref()))
                .collect::<Result<_, _>>()?
        };

        let names: Vec<&str> = modules.iter().map(|m| m.module_name()).collect();
        let duplicates = find_duplicates(&names);
        if !duplicates.is_empty() {
            return Err(PoseidonError::DuplicateModuleNames {
                names: duplicates.into_iter().map(|n| n.to_string()).collect(),
            }
            .into());
        }

        tracing::debug!(count = modules.len(), "module registry loaded");
        Ok(ModuleRegistry { modules })
    }

    /// Discover every manifest under `root` and load them.
    pub fn load_modules_from_root(&self, root: &Path) -> Result<ModuleRegistry, ModuleError> {
        let paths: Vec<PathBuf> =
            find_module_manifests(root).map_err(|source| ModuleError::Discovery {
                root: root.to_path_buf(),
                source,
            })?;
        self.load_modules(&paths)
    }
}

/// Load `paths` with the default [`LoaderConfig`].
pub fn load_modules<P>(
    validator: &SchemaValidator,
    paths: &[P],
) -> Result<ModuleRegistry, ModuleError>
where
    P: AsRef<Path> + Sync,
{
    ModuleLoader::new(validator).load_modules(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poseidon_schema::SchemaValidationError;
    use serde_json::json;
    use std::fs;

    fn write_manifest(root: &Path, dir: &str, name: &str) -> PathBuf {
        let module_dir = root.join(dir);
        fs::create_dir_all(&module_dir).unwrap();
        let path = module_dir.join("poseidon.json");
        let doc = json!({
            "moduleName": name,
            "genotypeData": {
                "format": "EIGENSTRAT",
                "genoFile": "geno.txt",
                "snpFile": "snp.txt",
                "indFile": "ind.txt"
            },
            "metaDataFile": "annot.txt",
            "maintainer": "Jane Doe",
            "maintainerEmail": "jane@example.org",
            "version": "0.1.0"
        });
        fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
        path
    }

    fn sequential() -> LoaderConfig {
        LoaderConfig {
            parallel: false,
            ..LoaderConfig::default()
        }
    }

    #[test]
    fn loads_distinct_modules_in_input_order() {
        let root = tempfile::tempdir().unwrap();
        let paths = vec![
            write_manifest(root.path(), "b", "modB"),
            write_manifest(root.path(), "a", "modA"),
            write_manifest(root.path(), "c", "modC"),
        ];
        let validator = SchemaValidator::bundled().unwrap();
        for config in [LoaderConfig::default(), sequential()] {
            let registry = ModuleLoader::with_config(&validator, config)
                .load_modules(&paths)
                .unwrap();
            assert_eq!(registry.names(), ["modB", "modA", "modC"]);
            assert_eq!(registry.len(), 3);
            assert!(registry.get("modA").is_some());
            assert!(registry.get("modZ").is_none());
        }
    }

    #[test]
    fn empty_input_gives_empty_registry() {
        let validator = SchemaValidator::bundled().unwrap();
        let registry = load_modules::<PathBuf>(&validator, &[]).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn same_path_twice_is_business_rule_error() {
        let root = tempfile::tempdir().unwrap();
        let path = write_manifest(root.path(), "a", "modA");
        let validator = SchemaValidator::bundled().unwrap();
        let err = load_modules(&validator, &[path.clone(), path]).unwrap_err();
        assert!(err.is_business_rule());
        match err {
            ModuleError::Poseidon(PoseidonError::DuplicateModuleNames { names }) => {
                assert_eq!(names, vec!["modA".to_string()]);
            }
            other => panic!("expected DuplicateModuleNames, got: {other}"),
        }
    }

    #[test]
    fn duplicate_names_across_directories_are_all_reported() {
        let root = tempfile::tempdir().unwrap();
        let paths = vec![
            write_manifest(root.path(), "1", "modX"),
            write_manifest(root.path(), "2", "modY"),
            write_manifest(root.path(), "3", "modY"),
            write_manifest(root.path(), "4", "modX"),
        ];
        let validator = SchemaValidator::bundled().unwrap();
        match load_modules(&validator, &paths).unwrap_err() {
            ModuleError::Poseidon(PoseidonError::DuplicateModuleNames { names }) => {
                assert_eq!(names, ["modY", "modX"]);
            }
            other => panic!("expected DuplicateModuleNames, got: {other}"),
        }
    }

    #[test]
    fn first_invalid_manifest_in_input_order_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let good = write_manifest(root.path(), "good", "modGood");
        let bad1 = root.path().join("bad1.json");
        fs::write(&bad1, r#"{"moduleName": "broken"}"#).unwrap();
        let bad2 = root.path().join("bad2.json");
        fs::write(&bad2, "not json").unwrap();

        let validator = SchemaValidator::bundled().unwrap();
        for config in [LoaderConfig::default(), sequential()] {
            let loader = ModuleLoader::with_config(&validator, config);
            let err = loader
                .load_modules(&[good.clone(), bad1.clone(), bad2.clone()])
                .unwrap_err();
            assert!(err.is_validation());
            match err {
                ModuleError::Validation(SchemaValidationError::ValidationFailed {
                    document, ..
                }) => assert_eq!(document, bad1.display().to_string()),
                other => panic!("expected ValidationFailed, got: {other}"),
            }
        }
    }

    #[test]
    fn schema_error_passes_through_unchanged() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("poseidon.json");
        fs::write(&path, r#"{"moduleName": 5}"#).unwrap();
        let validator = SchemaValidator::bundled().unwrap();

        let direct = validator.validate_file(&path).unwrap_err().to_string();
        let via_loader = load_modules(&validator, &[&path]).unwrap_err().to_string();
        assert_eq!(direct, via_loader);
    }

    #[test]
    fn load_modules_from_root_discovers_and_loads() {
        let root = tempfile::tempdir().unwrap();
        write_manifest(root.path(), "x/one", "modOne");
        write_manifest(root.path(), "y", "modTwo");
        let validator = SchemaValidator::bundled().unwrap();
        let registry = ModuleLoader::new(&validator)
            .load_modules_from_root(root.path())
            .unwrap();
        assert_eq!(registry.names(), ["modOne", "modTwo"]);
        let one = registry.get("modOne").unwrap();
        assert_eq!(
            one.genotype_files().geno_file,
            root.path().join("x/one/geno.txt")
        );
    }

    #[test]
    fn load_from_missing_root_is_discovery_error() {
        let validator = SchemaValidator::bundled().unwrap();
        let err = ModuleLoader::new(&validator)
            .load_modules_from_root(Path::new("/nonexistent/poseidon/modules"))
            .unwrap_err();
        assert!(matches!(err, ModuleError::Discovery { .. }), "got: {err}");
    }
}
