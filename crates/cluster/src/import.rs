//! Copying site files into a cluster's managed configuration directory.
//!
//! Invariants:
//! - The source is fully validated before anything is written.
//! - A failed copy removes the destination directory it created.
//! - `ConfigDirChange` replaces directories without deleting the previous
//!   contents until `commit`; `rollback` restores them.

use std::path::{Path, PathBuf};

use crate::error::{ClusterError, Result};

/// Site files every import source must provide.
pub const REQUIRED_CONFIG_FILES: [&str; 4] = [
    "core-site.xml",
    "yarn-site.xml",
    "hive-site.xml",
    "oozie-default.xml",
];

/// Site files copied when present.
pub const OPTIONAL_CONFIG_FILES: [&str; 4] = [
    "hdfs-site.xml",
    "mapred-site.xml",
    "hbase-site.xml",
    "oozie-site.xml",
];

/// Checks that `source` is a directory holding every required site file.
pub fn validate_import_source(source: &Path) -> Result<()> {
    if !source.is_dir() {
        return Err(ClusterError::ImportSourceMissing(source.to_path_buf()));
    }

    for file in REQUIRED_CONFIG_FILES {
        if !source.join(file).is_file() {
            return Err(ClusterError::MissingConfigFile {
                dir: source.to_path_buf(),
                file,
            });
        }
    }
    Ok(())
}

/// Copies the required and any optional site files from `source` into `dest`.
///
/// Returns the names of the files copied, required files first.
pub fn copy_site_files(source: &Path, dest: &Path) -> Result<Vec<String>> {
    validate_import_source(source)?;

    let created = !dest.exists();
    match copy_into(source, dest) {
        Ok(copied) => {
            tracing::debug!(
                source = %source.display(),
                dest = %dest.display(),
                files = copied.len(),
                "Copied site files"
            );
            Ok(copied)
        }
        Err(e) => {
            if created && let Err(cleanup) = std::fs::remove_dir_all(dest) {
                tracing::warn!(
                    path = %dest.display(),
                    error = %cleanup,
                    "Failed to clean up partially imported configuration"
                );
            }
            Err(e)
        }
    }
}

fn copy_into(source: &Path, dest: &Path) -> Result<Vec<String>> {
    std::fs::create_dir_all(dest).map_err(|e| ClusterError::io(dest, e))?;

    let optional = OPTIONAL_CONFIG_FILES
        .into_iter()
        .filter(|file| source.join(file).is_file());

    let mut copied = Vec::new();
    for file in REQUIRED_CONFIG_FILES.into_iter().chain(optional) {
        let from = source.join(file);
        let to = dest.join(file);
        std::fs::copy(&from, &to).map_err(|e| ClusterError::io(&from, e))?;
        copied.push(file.to_string());
    }
    Ok(copied)
}

/// Lists the known site files present in `dir`.
pub fn present_site_files(dir: &Path) -> Vec<String> {
    REQUIRED_CONFIG_FILES
        .into_iter()
        .chain(OPTIONAL_CONFIG_FILES)
        .filter(|file| dir.join(file).is_file())
        .map(str::to_string)
        .collect()
}

/// Moves a managed configuration directory to a new cluster's location.
///
/// A missing source directory is not an error; there is nothing to move.
pub fn move_config_dir(from: &Path, to: &Path) -> Result<Option<PathBuf>> {
    if !from.is_dir() {
        return Ok(None);
    }
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ClusterError::io(parent, e))?;
    }
    std::fs::rename(from, to).map_err(|e| ClusterError::io(from, e))?;
    Ok(Some(to.to_path_buf()))
}

/// A reversible set of changes to managed configuration directories.
///
/// Directories displaced by a change are parked beside their original
/// location until the change is committed or rolled back.
#[derive(Debug, Default)]
pub struct ConfigDirChange {
    steps: Vec<Step>,
}

#[derive(Debug)]
enum Step {
    Moved { from: PathBuf, to: PathBuf },
    SetAside { original: PathBuf, parked: PathBuf },
    Created(PathBuf),
}

impl ConfigDirChange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `dir` out of the way if it exists.
    pub fn set_aside(&mut self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            return Ok(());
        }
        let parked = sibling(dir, &format!("replaced-{}", self.steps.len()));
        remove_stale(&parked)?;
        std::fs::rename(dir, &parked).map_err(|e| ClusterError::io(dir, e))?;
        self.steps.push(Step::SetAside {
            original: dir.to_path_buf(),
            parked,
        });
        Ok(())
    }

    /// Moves the directory at `from` to `to`; a missing `from` is skipped.
    pub fn move_dir(&mut self, from: &Path, to: &Path) -> Result<()> {
        if move_config_dir(from, to)?.is_some() {
            self.steps.push(Step::Moved {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Replaces `dest` with a fresh copy of the site files in `source`.
    ///
    /// Files are copied into a staging directory first, so a failed copy
    /// leaves `dest` untouched.
    pub fn import(&mut self, source: &Path, dest: &Path) -> Result<Vec<String>> {
        let staging = sibling(dest, "staging");
        remove_stale(&staging)?;
        let copied = copy_site_files(source, &staging)?;

        if let Err(e) = self.set_aside(dest) {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(e);
        }
        if let Err(e) = std::fs::rename(&staging, dest) {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(ClusterError::io(&staging, e));
        }
        self.steps.push(Step::Created(dest.to_path_buf()));
        Ok(copied)
    }

    /// Keeps the changes and deletes the directories they displaced.
    pub fn commit(self) {
        for step in self.steps {
            if let Step::SetAside { parked, .. } = step
                && let Err(e) = std::fs::remove_dir_all(&parked)
            {
                tracing::warn!(path = %parked.display(), error = %e, "Failed to remove replaced configuration");
            }
        }
    }

    /// Undoes the changes in reverse order.
    pub fn rollback(self) {
        for step in self.steps.into_iter().rev() {
            let restored = match &step {
                Step::Created(dir) => std::fs::remove_dir_all(dir),
                Step::SetAside { original, parked } => std::fs::rename(parked, original),
                Step::Moved { from, to } => std::fs::rename(to, from),
            };
            if let Err(e) = restored {
                tracing::error!(step = ?step, error = %e, "Failed to roll back configuration directory change");
            }
        }
    }
}

/// Hidden path next to `dir`, e.g. `Configs/.nc.staging`.
fn sibling(dir: &Path, suffix: &str) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.with_file_name(format!(".{name}.{suffix}"))
}

fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| ClusterError::io(path, e))?;
    }
    Ok(())
}
