//! Integration test: discover and load the module corpus in `testdata/modules`.
//!
//! The corpus holds four modules in two sibling subtrees: `ancient/` with two
//! modules at depth 2, and `modern/` with one module at depth 2 and one at
//! depth 3.

use std::collections::BTreeSet;
use std::path::PathBuf;

use poseidon_core::PoseidonError;
use poseidon_module::{
    find_module_manifests, load_modules, LoaderConfig, ModuleError, ModuleLoader, PathResolution,
};
use poseidon_schema::SchemaValidator;

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn modules_dir() -> PathBuf {
    repo_root().join("testdata/modules")
}

fn validator() -> SchemaValidator {
    SchemaValidator::new(repo_root().join("schemas")).expect("failed to load schemas")
}

#[test]
fn test_find_module_files() {
    let root = modules_dir();
    let found = find_module_manifests(&root).unwrap();
    let expected: Vec<PathBuf> = [
        "ancient/myTestModule1/poseidon.json",
        "ancient/myTestModule2/poseidon.json",
        "modern/myTestModule3/poseidon.json",
        "modern/published/myTestModule4/poseidon.json",
    ]
    .iter()
    .map(|rel| root.join(rel))
    .collect();
    assert_eq!(found, expected, "there should be four modules in the test set");
}

#[test]
fn test_load_modules() {
    let files = find_module_manifests(modules_dir()).unwrap();
    let registry = load_modules(&validator(), &files).unwrap();
    let names: BTreeSet<&str> = registry.iter().map(|m| m.module_name()).collect();
    let expected: BTreeSet<&str> =
        ["myTestModule1", "myTestModule2", "myTestModule3", "myTestModule4"].into();
    assert_eq!(names, expected);
}

#[test]
fn test_load_modules_raise_duplicates() {
    let mut files = find_module_manifests(modules_dir()).unwrap();
    files.push(files[0].clone());
    let err = load_modules(&validator(), &files).unwrap_err();
    assert!(err.is_business_rule(), "got: {err}");
    match err {
        ModuleError::Poseidon(PoseidonError::DuplicateModuleNames { names }) => {
            assert_eq!(names, ["myTestModule1"]);
        }
        other => panic!("expected DuplicateModuleNames, got: {other}"),
    }
}

#[test]
fn test_optional_notes() {
    let registry = ModuleLoader::new(&validator())
        .load_modules_from_root(&modules_dir())
        .unwrap();
    assert!(registry.get("myTestModule1").unwrap().notes().is_some());
    assert!(registry.get("myTestModule2").unwrap().notes().is_none());
}

#[test]
fn test_genotype_files_resolve_to_module_directory() {
    let validator = validator();
    let registry = ModuleLoader::new(&validator)
        .load_modules_from_root(&modules_dir())
        .unwrap();
    for module in &registry {
        let files = module.genotype_files();
        let dir = module.manifest_path().parent().unwrap();
        assert_eq!(files.geno_file, dir.join("geno.txt"));
        assert!(files.geno_file.is_file(), "{} missing", files.geno_file.display());
        assert!(files.snp_file.is_file());
        assert!(files.ind_file.is_file());
        assert!(module.meta_data_path().is_file());
    }
}

#[test]
fn test_working_dir_resolution_keeps_declared_paths() {
    let validator = validator();
    let config = LoaderConfig {
        path_resolution: PathResolution::WorkingDir,
        parallel: false,
    };
    let registry = ModuleLoader::with_config(&validator, config)
        .load_modules_from_root(&modules_dir())
        .unwrap();
    let module = registry.get("myTestModule4").unwrap();
    assert_eq!(module.genotype_files().snp_file, PathBuf::from("snp.txt"));
}

#[test]
fn test_bundled_and_directory_schemas_agree() {
    let files = find_module_manifests(modules_dir()).unwrap();
    let bundled = SchemaValidator::bundled().unwrap();
    let a = load_modules(&bundled, &files).unwrap();
    let b = load_modules(&validator(), &files).unwrap();
    assert_eq!(a.names(), b.names());
}
