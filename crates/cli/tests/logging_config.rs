use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("logs").join("napkin.log");

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
data_root = "{}"

[logging]
level = "warn"
file_level = "debug"
file = "{{{{data_root}}}}/logs/napkin.log"
"#,
        root.display()
    );
    fs::write(&config_path, &config_content).unwrap();
    fs::create_dir(root.join("inputs")).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&config_path).arg("inputs").assert().success();

    assert!(log_file.exists(), "Log file should be created");
    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("loaded 0 variables"), "log was: {log}");
}

#[test]
fn test_invalid_level_falls_back() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
data_root = "{}"

[logging]
level = "chatty"
"#,
        root.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("napkin"));
    cmd.arg("--config").arg(&config_path).arg("scenarios").assert().success();
}
