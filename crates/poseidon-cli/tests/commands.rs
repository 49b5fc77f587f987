//! Subcommand handlers driven against the `testdata/modules` corpus and
//! scratch corpora in temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use poseidon_cli::inspect::{run_inspect, InspectArgs};
use poseidon_cli::list::{run_list, ListArgs};
use poseidon_cli::validate::{run_validate, ValidateArgs};
use poseidon_cli::{LoadArgs, ResolvePaths};

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop();
    dir.pop();
    dir
}

fn load_args(root: &Path) -> LoadArgs {
    LoadArgs {
        root: root.to_path_buf(),
        resolve_paths: ResolvePaths::Manifest,
        sequential: false,
        schema_dir: None,
    }
}

fn corpus() -> LoadArgs {
    load_args(&repo_root().join("testdata/modules"))
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

fn write_manifest(dir: &Path, name: &str) {
    fs::create_dir_all(dir).unwrap();
    let doc = serde_json::json!({
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
    fs::write(dir.join("poseidon.json"), doc.to_string()).unwrap();
}

#[test]
fn list_prints_one_line_per_module() {
    let mut out = Vec::new();
    let code = run_list(&ListArgs { load: corpus() }, &mut out).unwrap();
    assert_eq!(code, 0);
    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "myTestModule1\t1.0.0\tStephan Schiffels <schiffels@shh.mpg.de>"
    );
    assert!(lines[3].starts_with("myTestModule4\t1.3.0\t"));
}

#[test]
fn validate_accepts_corpus() {
    let mut out = Vec::new();
    let code = run_validate(&ValidateArgs { load: corpus() }, &mut out).unwrap();
    assert_eq!(code, 0);
    assert!(output(out).starts_with("OK: 4 module(s)"));
}

#[test]
fn validate_with_schema_dir_and_sequential_loading() {
    let mut load = corpus();
    load.schema_dir = Some(repo_root().join("schemas"));
    load.sequential = true;
    let mut out = Vec::new();
    assert_eq!(run_validate(&ValidateArgs { load }, &mut out).unwrap(), 0);
}

#[test]
fn validate_reports_duplicate_names() {
    let root = tempfile::tempdir().unwrap();
    write_manifest(&root.path().join("a"), "same");
    write_manifest(&root.path().join("b"), "same");
    let mut out = Vec::new();
    let code = run_validate(&ValidateArgs { load: load_args(root.path()) }, &mut out).unwrap();
    assert_eq!(code, 1);
    let text = output(out);
    assert!(text.starts_with("FAIL (rule)"), "got: {text}");
    assert!(text.contains("same"));
}

#[test]
fn validate_reports_schema_failures() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("bad")).unwrap();
    fs::write(root.path().join("bad/poseidon.json"), r#"{"moduleName": "x"}"#).unwrap();
    let mut out = Vec::new();
    let code = run_validate(&ValidateArgs { load: load_args(root.path()) }, &mut out).unwrap();
    assert_eq!(code, 1);
    assert!(output(out).starts_with("FAIL (schema)"));
}

#[test]
fn list_fails_on_invalid_corpus() {
    let root = tempfile::tempdir().unwrap();
    write_manifest(&root.path().join("a"), "same");
    write_manifest(&root.path().join("b"), "same");
    let mut out = Vec::new();
    assert!(run_list(&ListArgs { load: load_args(root.path()) }, &mut out).is_err());
}

#[test]
fn inspect_counts_every_module() {
    let mut out = Vec::new();
    let args = InspectArgs {
        load: corpus(),
        module: None,
    };
    assert_eq!(run_inspect(&args, &mut out).unwrap(), 0);
    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "module\tformat\tindividuals\tvariants\tmissing");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("myTestModule1\tEIGENSTRAT\t10\t10\t"));
}

#[test]
fn inspect_single_module() {
    let mut out = Vec::new();
    let args = InspectArgs {
        load: corpus(),
        module: Some("myTestModule3".to_string()),
    };
    run_inspect(&args, &mut out).unwrap();
    let text = output(out);
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().starts_with("myTestModule3\tEIGENSTRAT\t3\t2\t"));
}

#[test]
fn inspect_unknown_module_is_error() {
    let mut out = Vec::new();
    let args = InspectArgs {
        load: corpus(),
        module: Some("noSuchModule".to_string()),
    };
    let err = run_inspect(&args, &mut out).unwrap_err();
    assert!(err.to_string().contains("noSuchModule"));
}

#[test]
fn inspect_stops_at_decode_error() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("m");
    write_manifest(&dir, "broken");
    fs::write(dir.join("ind.txt"), "a M P\nb F P\n").unwrap();
    fs::write(dir.join("snp.txt"), "s1 1 0.0 10 A C\n").unwrap();
    fs::write(dir.join("geno.txt"), "0x\n").unwrap();
    fs::write(dir.join("annot.txt"), "").unwrap();

    let mut out = Vec::new();
    let args = InspectArgs {
        load: load_args(root.path()),
        module: None,
    };
    let err = run_inspect(&args, &mut out).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("broken"), "got: {chain}");
    assert!(chain.contains("row 0, column 1"), "got: {chain}");
}
