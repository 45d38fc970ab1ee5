use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{tempdir, TempDir};

const VALID_DATA: &str = r#"
inputs:
  - variable: users__app__count
    variable_type: market
    entity: app
    units: count
    value: 2000
    scale: 1
    display_units: users
    key_assumption: Steady state adoption.
    source_url: https://example.com/users
  - variable: price__app__usd
    variable_type: pricing
    entity: app
    units: usd
    value: 5
    scale: 1
    display_units: USD
    key_assumption: List price.
    source_url: https://example.com/price
calculations:
  - title: Monthly revenue
    inputs: [users__app__count, price__app__usd]
    explanation: users__app__count * price__app__usd
"#;

fn setup(data: &str) -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let cfg = root.join("config.toml");
    fs::write(&cfg, format!("version = 1\n[profiles.default]\ndata_root = \"{}\"\n", root.display()))
        .unwrap();
    fs::write(root.join("data.yaml"), data).unwrap();
    (tmp, cfg)
}

#[test]
fn validate_passes_clean_data() {
    let (_tmp, cfg) = setup(VALID_DATA);
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&cfg).arg("validate");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All inputs are correctly formatted."))
        .stdout(predicate::str::contains(
            "Calculation \"Monthly revenue\" evaluated successfully with result: 10000",
        ))
        .stdout(predicate::str::contains("All calculations evaluated successfully."));
}

#[test]
fn validate_reports_every_problem() {
    let data = VALID_DATA
        .replace("source_url: https://example.com/price", "source_url: source needed")
        .replace("units: count", "units: people");
    let (_tmp, cfg) = setup(&data);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&cfg).arg("validate");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Validation Errors Found:"))
        .stdout(predicate::str::contains(
            "- Units mismatch in variable 'users__app__count': expected 'count', got 'people'.",
        ))
        .stdout(predicate::str::contains(
            "- Missing or placeholder source URL for variable 'price__app__usd'.",
        ));
}

#[test]
fn validate_reports_missing_calculation_input() {
    let data = VALID_DATA.replace("inputs: [users__app__count, price__app__usd]", "inputs: [nope]");
    let (_tmp, cfg) = setup(&data);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&cfg).arg("validate");
    cmd.assert().failure().stdout(predicate::str::contains(
        "Validation error: Missing input value for key: nope in calculation: Monthly revenue",
    ));
}

#[test]
fn validate_fails_without_data_file() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, format!("version = 1\n[profiles.default]\ndata_root = \"{}\"\n", tmp.path().display()))
        .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&cfg).arg("validate");
    cmd.assert().failure().stderr(predicate::str::contains("Error:"));
}

fn write_input(root: &std::path::Path, file: &str, body: &str) {
    let dir = root.join("inputs");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), body).unwrap();
}

#[test]
fn validate_accepts_plain_markdown_inputs() {
    let (tmp, cfg) = setup(VALID_DATA);
    fs::create_dir_all(tmp.path().join("inputs")).unwrap();
    fs::write(tmp.path().join("inputs/index.json"), r#"{"files": ["users.md"]}"#).unwrap();
    write_input(tmp.path(), "users.md", "---\nvariable_name: users__app__count\nvalue: 2000\n---\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&cfg).arg("validate");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Missing mandatory field").not());
}

#[test]
fn validate_flags_badly_named_markdown_inputs() {
    let (tmp, cfg) = setup(VALID_DATA);
    fs::create_dir_all(tmp.path().join("inputs")).unwrap();
    fs::write(tmp.path().join("inputs/index.json"), r#"{"files": ["revenue.md"]}"#).unwrap();
    write_input(tmp.path(), "revenue.md", "---\nvariable_name: revenue\nvalue: 1\n---\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&cfg).arg("validate");
    cmd.assert().failure().stdout(predicate::str::contains(
        "- Variable name 'revenue' does not match the naming convention 'description__entity__units'.",
    ));
}
