//! Resolved settings shared by the manager and the CLI.

use std::path::PathBuf;
use std::time::Duration;

use crate::paths::{cluster_config_dir, registry_path};

/// Fully resolved settings produced by `SettingsLoader::build`.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Home directory the metastore lives under.
    pub home_dir: PathBuf,
    /// `<home>/.pentaho/metastore/pentaho`.
    pub metastore_root: PathBuf,
    /// Shim id hidden from user-facing shim listings.
    pub internal_shim_id: String,
    /// Optional JSON catalog of available shims.
    pub shims_file: Option<PathBuf>,
    /// Timeout applied to each connectivity probe.
    pub probe_timeout: Duration,
    /// Store HDFS passwords in the system keyring instead of the registry file.
    pub use_keyring: bool,
}

impl Settings {
    pub fn registry_path(&self) -> PathBuf {
        registry_path(&self.metastore_root)
    }

    pub fn cluster_config_dir(&self, name: &str) -> PathBuf {
        cluster_config_dir(&self.metastore_root, name)
    }
}
