// SPDX-License-Identifier: MIT

use std::path::Path;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::{fixture, rstest};

fn fixture_path(relative: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join(relative)
        .display()
        .to_string()
}

fn seqdiff(args: &[&str]) -> Command {
    let mut command = Command::cargo_bin("seqdiff").expect("binary is built");
    command
        .args(["--pager", "false", "--color", "false"])
        .args(args)
        .env_remove("RUST_LOG");
    command
}

#[fixture]
fn config_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[test]
fn identical_files() {
    let old = fixture_path("diff_test/kitten/old");
    seqdiff(&[&old, &old])
        .assert()
        .code(0)
        .stdout(" k\n i\n t\n t\n e\n n\n");
}

#[rstest]
#[case::hirschberg("hirschberg")]
#[case::wagner("wagner")]
fn different_files(#[case] algorithm: &str) {
    let old = fixture_path("diff_test/kitten/old");
    let new = fixture_path("diff_test/kitten/new");
    let expected = std::fs::read_to_string(fixture_path("diff_test/kitten/expected"))
        .expect("fixture is readable");

    seqdiff(&["--algorithm", algorithm, &old, &new])
        .assert()
        .code(1)
        .stdout(expected);
}

#[test]
fn merge_format() {
    let old = fixture_path("merge_test/merge01/old");
    let new = fixture_path("merge_test/merge01/new");
    let expected = std::fs::read_to_string(fixture_path("merge_test/merge01/expected"))
        .expect("fixture is readable");

    seqdiff(&["--format", "merge", &old, &new])
        .assert()
        .code(1)
        .stdout(expected);
}

#[test]
fn missing_file() {
    let old = fixture_path("diff_test/kitten/old");
    let missing = fixture_path("diff_test/kitten/does-not-exist");

    seqdiff(&[&old, &missing])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("does-not-exist"));
}

#[rstest]
fn config_markers(config_dir: TempDir) {
    let config = config_dir.child("seqdiff.toml");
    config
        .write_str("[markers]\nstart = \"<<<<<<< old\"\nend = \">>>>>>> new\"\n")
        .expect("config is written");
    let config = config.path().display().to_string();
    let old = fixture_path("merge_test/merge01/old");
    let new = fixture_path("merge_test/merge01/new");

    seqdiff(&["--config", &config, "--format", "merge", &old, &new])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("<<<<<<< old\nfn beta() {\n"))
        .stdout(predicate::str::contains("========\n"))
        .stdout(predicate::str::contains(">>>>>>> new\n}\n"));
}

#[rstest]
fn invalid_config(config_dir: TempDir) {
    let config = config_dir.child("seqdiff.toml");
    config.write_str("[unknown]\n").expect("config is written");
    let config = config.path().display().to_string();
    let old = fixture_path("diff_test/kitten/old");

    seqdiff(&["--config", &config, &old, &old])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("seqdiff.toml"));
}

#[rstest]
fn flags_override_config(config_dir: TempDir) {
    let config = config_dir.child("seqdiff.toml");
    config
        .write_str("[diff]\nthreshold_length = 7\nthreshold_size = 1000\n")
        .expect("config is written");
    let config = config.path().display().to_string();
    let old = fixture_path("diff_test/kitten/old");
    let new = fixture_path("diff_test/kitten/new");

    seqdiff(&["--config", &config, "--threshold-size", "3", &old, &new])
        .env("RUST_LOG", "debug")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("threshold_length: 7,"))
        .stderr(predicate::str::contains("threshold_size: 3 "));
}
