//! Settings loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` for hierarchical settings merging.
//! - Build the final `Settings` from loaded values, applying defaults last.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - `from_env()` overwrites values set earlier; builder calls made afterwards win.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{DEFAULT_INTERNAL_SHIM_ID, DEFAULT_PROBE_TIMEOUT_SECS, MAX_PROBE_TIMEOUT_SECS};
use crate::paths::{default_home_dir, metastore_root};
use crate::settings::Settings;

/// Settings loader that builds `Settings` from environment variables and overrides.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    home_dir: Option<PathBuf>,
    internal_shim_id: Option<String>,
    shims_file: Option<PathBuf>,
    probe_timeout: Option<Duration>,
    use_keyring: Option<bool>,
}

impl SettingsLoader {
    /// Create a new settings loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DotenvParse` or `ConfigError::DotenvIo` when the
    /// file exists but cannot be used.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read `HADOOP_CLUSTER_*` environment variables into the loader.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Override the home directory the metastore lives under.
    pub fn with_home_dir(mut self, path: PathBuf) -> Self {
        self.home_dir = Some(path);
        self
    }

    /// Override the id of the internal shim hidden from user-facing choices.
    pub fn with_internal_shim_id(mut self, id: String) -> Self {
        self.internal_shim_id = Some(id);
        self
    }

    /// Use a JSON shim catalog instead of the built-in one.
    pub fn with_shims_file(mut self, path: PathBuf) -> Self {
        self.shims_file = Some(path);
        self
    }

    /// Override the per-probe connectivity timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    /// Choose whether HDFS passwords go to the system keyring.
    pub fn with_use_keyring(mut self, enabled: bool) -> Self {
        self.use_keyring = Some(enabled);
        self
    }

    pub(crate) fn set_home_dir(&mut self, path: Option<PathBuf>) {
        self.home_dir = path;
    }

    pub(crate) fn set_internal_shim_id(&mut self, id: Option<String>) {
        self.internal_shim_id = id;
    }

    pub(crate) fn set_shims_file(&mut self, path: Option<PathBuf>) {
        self.shims_file = path;
    }

    pub(crate) fn set_probe_timeout(&mut self, timeout: Option<Duration>) {
        self.probe_timeout = timeout;
    }

    pub(crate) fn set_use_keyring(&mut self, enabled: Option<bool>) {
        self.use_keyring = enabled;
    }

    /// Build the final settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, the
    /// internal shim id is blank, or the probe timeout is out of range.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let home_dir = match self.home_dir {
            Some(path) => path,
            None => default_home_dir()?,
        };

        let internal_shim_id = match self.internal_shim_id {
            Some(id) if id.trim().is_empty() => return Err(ConfigError::EmptyInternalShim),
            Some(id) => id.trim().to_string(),
            None => DEFAULT_INTERNAL_SHIM_ID.to_string(),
        };

        let probe_timeout = self
            .probe_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS));
        if probe_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "must be greater than zero".to_string(),
            });
        }
        if probe_timeout.as_secs() > MAX_PROBE_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!("must not exceed {MAX_PROBE_TIMEOUT_SECS} seconds"),
            });
        }

        Ok(Settings {
            metastore_root: metastore_root(&home_dir),
            home_dir,
            internal_shim_id,
            shims_file: self.shims_file,
            probe_timeout,
            use_keyring: self.use_keyring.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_applies_defaults() {
        let settings = SettingsLoader::new()
            .with_home_dir(PathBuf::from("/home/test"))
            .build()
            .unwrap();

        assert_eq!(settings.internal_shim_id, "apache");
        assert_eq!(settings.probe_timeout, Duration::from_secs(10));
        assert!(settings.shims_file.is_none());
        assert!(settings.use_keyring);
        assert_eq!(
            settings.metastore_root,
            PathBuf::from("/home/test/.pentaho/metastore/pentaho")
        );
    }

    #[test]
    fn test_build_rejects_blank_internal_shim() {
        let result = SettingsLoader::new()
            .with_home_dir(PathBuf::from("/home/test"))
            .with_internal_shim_id("  ".to_string())
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyInternalShim)));
    }

    #[test]
    fn test_build_rejects_zero_timeout() {
        let result = SettingsLoader::new()
            .with_home_dir(PathBuf::from("/home/test"))
            .with_probe_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_build_rejects_excessive_timeout() {
        let result = SettingsLoader::new()
            .with_home_dir(PathBuf::from("/home/test"))
            .with_probe_timeout(Duration::from_secs(MAX_PROBE_TIMEOUT_SECS + 1))
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }
}
