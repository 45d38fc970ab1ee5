//! Reading `config.toml` and resolving the active profile into paths.

use std::path::{Path, PathBuf};
use std::{env, fs};

use thiserror::Error;

use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};

/// Placeholder replaced by the profile's data root in the other paths.
const DATA_ROOT_VAR: &str = "{{data_root}}";

const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no napkin config at {0}")]
    NotFound(String),

    #[error("cannot read napkin config {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("invalid TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("config defines no [profiles.*] table")]
    NoProfiles,

    #[error("config version {0} is not supported (expected 1)")]
    BadVersion(u32),

    #[error("cannot expand '{0}': home directory or environment variable unavailable")]
    NoHome(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `config_path`, or [`default_config_path`] when none is given, and
    /// resolve `profile_override` or the file's `profile` (else `default`).
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
        let origin = path.display().to_string();

        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(origin.clone()),
            _ => ConfigError::ReadError(origin.clone(), e),
        })?;
        Self::from_toml_str(&text, &origin, profile_override)
    }

    /// Resolve a config from TOML text; `origin` is only used in error messages.
    pub fn from_toml_str(
        s: &str,
        origin: &str,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let file: ConfigFile =
            toml::from_str(s).map_err(|e| ConfigError::ParseError(origin.to_string(), e))?;

        if file.version != SUPPORTED_VERSION {
            return Err(ConfigError::BadVersion(file.version));
        }
        if file.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let name = profile_override.or(file.profile.as_deref()).unwrap_or("default");
        let Some(profile) = file.profiles.get(name) else {
            return Err(ConfigError::ProfileNotFound(name.to_string()));
        };

        let data_root = expand_path(&profile.data_root)?;
        let resolve = |raw: &str| {
            expand_path(&raw.replace(DATA_ROOT_VAR, &data_root.to_string_lossy()))
        };

        let logging = LoggingConfig {
            file: file
                .logging
                .file
                .as_deref()
                .map(|f| resolve(&f.to_string_lossy()))
                .transpose()?,
            ..file.logging.clone()
        };

        let resolved = ResolvedConfig {
            active_profile: name.to_string(),
            inputs_dir: resolve(&profile.inputs_dir)?,
            scenarios_dir: resolve(&profile.scenarios_dir)?,
            data_file: resolve(&profile.data_file)?,
            output_dir: resolve(&profile.output_dir)?,
            data_root,
            logging,
            display: file.display.clone(),
        };
        tracing::debug!(
            profile = %resolved.active_profile,
            root = %resolved.data_root.display(),
            "resolved config"
        );
        Ok(resolved)
    }
}

/// `$XDG_CONFIG_HOME/napkin/config.toml`, else `~/.config/napkin/config.toml`.
pub fn default_config_path() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("napkin").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(input)
        .map(|expanded| PathBuf::from(expanded.into_owned()))
        .map_err(|_| ConfigError::NoHome(input.to_string()))
}
