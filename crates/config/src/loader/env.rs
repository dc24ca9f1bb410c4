//! Environment variable parsing for settings.
//!
//! Responsibilities:
//! - Read and parse `HADOOP_CLUSTER_*` environment variables.
//! - Apply environment variable values to a `SettingsLoader` instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return `ConfigError::InvalidValue`.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::SettingsLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut SettingsLoader) -> Result<(), ConfigError> {
    if let Some(home) = env_var_or_none("HADOOP_CLUSTER_HOME") {
        loader.set_home_dir(Some(PathBuf::from(home)));
    }
    if let Some(shim) = env_var_or_none("HADOOP_CLUSTER_INTERNAL_SHIM") {
        loader.set_internal_shim_id(Some(shim));
    }
    if let Some(path) = env_var_or_none("HADOOP_CLUSTER_SHIMS_FILE") {
        loader.set_shims_file(Some(PathBuf::from(path)));
    }
    if let Some(timeout) = env_var_or_none("HADOOP_CLUSTER_PROBE_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "HADOOP_CLUSTER_PROBE_TIMEOUT".to_string(),
            message: "must be a number of seconds".to_string(),
        })?;
        loader.set_probe_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(value) = env_var_or_none("HADOOP_CLUSTER_USE_KEYRING") {
        loader.set_use_keyring(Some(parse_bool("HADOOP_CLUSTER_USE_KEYRING", &value)?));
    }
    Ok(())
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}
