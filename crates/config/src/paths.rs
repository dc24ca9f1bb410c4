//! Path helpers for metastore locations.
//!
//! Responsibilities:
//! - Determine the user's home directory using the `directories` crate.
//! - Derive the metastore root, registry file, and per-cluster config paths.
//!
//! Does NOT handle:
//! - File I/O operations.
//! - Validating cluster names (see `hadoop-cluster`).
//!
//! Layout:
//! - `<home>/.pentaho/metastore/pentaho/NamedCluster/clusters.json`
//! - `<home>/.pentaho/metastore/pentaho/NamedCluster/Configs/<name>/`

use std::path::{Path, PathBuf};

use crate::constants::{CONFIGS_DIR, METASTORE_SEGMENTS, NAMED_CLUSTER_DIR, REGISTRY_FILE};
use crate::loader::ConfigError;

/// Returns the current user's home directory.
pub fn default_home_dir() -> Result<PathBuf, ConfigError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Returns the metastore root below `home`.
pub fn metastore_root(home: &Path) -> PathBuf {
    METASTORE_SEGMENTS
        .iter()
        .fold(home.to_path_buf(), |path, segment| path.join(segment))
}

/// Returns the directory holding named cluster definitions.
pub fn named_cluster_dir(metastore_root: &Path) -> PathBuf {
    metastore_root.join(NAMED_CLUSTER_DIR)
}

/// Returns the path of the named cluster registry file.
pub fn registry_path(metastore_root: &Path) -> PathBuf {
    named_cluster_dir(metastore_root).join(REGISTRY_FILE)
}

/// Returns the managed configuration directory for the cluster `name`.
pub fn cluster_config_dir(metastore_root: &Path, name: &str) -> PathBuf {
    named_cluster_dir(metastore_root).join(CONFIGS_DIR).join(name)
}
