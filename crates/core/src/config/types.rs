use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub data_root: String,
    #[serde(default = "default_inputs_dir")]
    pub inputs_dir: String,
    #[serde(default = "default_scenarios_dir")]
    pub scenarios_dir: String,
    /// Consolidated YAML file with `inputs` and `calculations`.
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Where `export` and `build` write their files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_inputs_dir() -> String {
    "{{data_root}}/inputs".to_string()
}

fn default_scenarios_dir() -> String {
    "{{data_root}}/scenarios".to_string()
}

fn default_data_file() -> String {
    "{{data_root}}/data.yaml".to_string()
}

fn default_output_dir() -> String {
    "{{data_root}}/out".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How computed numbers are shown.
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Decimal places used by human-readable numbers (default: 2)
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: default_precision() }
    }
}

fn default_precision() -> usize {
    2
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub data_root: PathBuf,
    pub inputs_dir: PathBuf,
    pub scenarios_dir: PathBuf,
    pub data_file: PathBuf,
    pub output_dir: PathBuf,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}
