//! Binary-level tests for the orchestration entry points.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("frombones-build").unwrap()
}

fn project_with_manifest(manifest: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("CMakeLists.txt"), manifest).unwrap();
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    bin().arg("--project-root").arg(dir).args(args).assert()
}

#[test]
fn report_version_prints_identity() {
    let dir = project_with_manifest("project (FromBones VERSION 1.4.2)\n");

    run_in(dir.path(), &["report-version"])
        .success()
        .stdout(predicate::str::contains("com.okkomastudio.frombones"))
        .stdout(predicate::str::contains("versionCode = 142"))
        .stdout(predicate::str::contains("versionName = 1.4.2-demo"));
}

#[test]
fn report_version_json_output() {
    let dir = project_with_manifest("project (FromBones VERSION 1.4.2)\n");

    run_in(dir.path(), &["report-version", "--json"])
        .success()
        .stdout(predicate::str::contains("\"versionCode\": 142"))
        .stdout(predicate::str::contains("\"versionName\": \"1.4.2-demo\""));
}

#[test]
fn report_version_fails_without_manifest() {
    let dir = tempfile::tempdir().unwrap();

    run_in(dir.path(), &["report-version"])
        .failure()
        .stderr(predicate::str::contains("CMakeLists.txt"));
}

#[test]
fn apply_version_writes_module_properties() {
    let dir = project_with_manifest("project (FromBones VERSION 1.4.2)\n");

    run_in(dir.path(), &["apply-version"]).success();

    let written =
        std::fs::read_to_string(dir.path().join("app").join("version.properties")).unwrap();
    assert!(written.contains("applicationId=com.okkomastudio.frombones"));
    assert!(written.contains("versionCode=142"));
    assert!(written.contains("versionName=1.4.2-demo"));

    // applying again produces the same file
    run_in(dir.path(), &["apply-version"]).success();
}

#[test]
fn clean_all_succeeds_twice() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("app").join(".cxx");
    std::fs::create_dir_all(&staging).unwrap();

    run_in(dir.path(), &["clean-all"]).success();
    assert!(!staging.exists());

    // staging directory already absent on the second run
    run_in(dir.path(), &["clean-all"]).success();
}
