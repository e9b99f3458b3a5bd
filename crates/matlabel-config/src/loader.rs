//! Load configuration from an optional JSON file plus environment overrides.
//!
//! # Design
//! - Precedence, lowest to highest: built-in defaults, file, environment.
//! - Environment access goes through a lookup closure so tests never mutate
//!   process state.
//! - The merged document is validated before it is returned.

use std::fs;
use std::path::Path;

use matlabel_layout::ScaleMode;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::AppConfig;

/// Environment variable naming the configuration file.
pub const ENV_CONFIG_PATH: &str = "MATLABEL_CONFIG";
/// Environment override for `database.url`.
pub const ENV_DATABASE_URL: &str = "MATLABEL_DATABASE_URL";
/// Environment override for `host.paper`.
pub const ENV_HOST_PAPER: &str = "MATLABEL_HOST_PAPER";
/// Environment override for `host.scale`.
pub const ENV_HOST_SCALE: &str = "MATLABEL_HOST_SCALE";
/// Environment override for `telemetry.level`.
pub const ENV_LOG_LEVEL: &str = "MATLABEL_LOG_LEVEL";
/// Environment override for `telemetry.format`.
pub const ENV_LOG_FORMAT: &str = "MATLABEL_LOG_FORMAT";

/// Load configuration using the process environment.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed, an override is
/// malformed, or the result fails validation.
pub fn load(path: Option<&Path>) -> ConfigResult<AppConfig> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with_env<F>(path: Option<&Path>, env: F) -> ConfigResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_file(path)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(config)
}

/// Parse a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
pub fn read_file(path: &Path) -> ConfigResult<AppConfig> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "read_config",
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "configuration file loaded");
    Ok(config)
}

/// Apply `MATLABEL_*` overrides onto `config`. Empty values are ignored.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] for an unrecognised scale mode.
pub fn apply_env_overrides<F>(config: &mut AppConfig, env: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_DATABASE_URL) {
        config.database.url = url;
    }
    if let Some(paper) = lookup(ENV_HOST_PAPER) {
        config.host.paper = paper;
    }
    if let Some(scale) = lookup(ENV_HOST_SCALE) {
        config.host.scale = scale.parse::<ScaleMode>().map_err(|_| {
            ConfigError::invalid("host", "scale", Some(scale.clone()), "must be fit or noscale")
        })?;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.telemetry.level = level;
    }
    if let Some(format) = lookup(ENV_LOG_FORMAT) {
        config.telemetry.format = Some(format);
    }
    Ok(())
}
