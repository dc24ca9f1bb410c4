//! Named cluster registry.
//!
//! Responsibilities:
//! - Define the `NamedClusterRegistry` lookup/persistence seam.
//! - Provide `FileRegistry`, a JSON file beside the managed `Configs` directory.
//! - Provide `MemoryRegistry` for embedding and tests.
//!
//! Does NOT handle:
//! - Name validation or collision policy (see `manager`).
//! - Site file management (see `import`).
//!
//! Invariants:
//! - Cluster names are unique keys.
//! - File writes are atomic (temp file + rename).
//! - In-memory state changes only after the file write succeeds.
//! - Corrupt registry files are backed up before being overwritten.
//! - With a credential store attached, passwords are written to the store
//!   and the file holds only the account name. If the store rejects a
//!   password it is kept in plain text and a warning is logged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::credentials::{CredentialStore, SecureValue, hdfs_password_account};
use crate::named_cluster::NamedCluster;

/// Lookup and persistence of named clusters.
pub trait NamedClusterRegistry {
    /// A fresh cluster definition to build new clusters from.
    fn template(&self) -> NamedCluster {
        NamedCluster::default()
    }

    fn contains(&self, name: &str) -> bool;

    fn get(&self, name: &str) -> Option<NamedCluster>;

    fn list(&self) -> Vec<NamedCluster>;

    /// Inserts or replaces the cluster keyed by its name.
    fn save(&mut self, cluster: NamedCluster) -> Result<()>;

    /// Removes the cluster; errors if it is not registered.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Saves `cluster` and removes the entry registered as `old_name`.
    fn replace(&mut self, old_name: &str, cluster: NamedCluster) -> Result<()> {
        let new_name = cluster.name.clone();
        self.save(cluster)?;
        if old_name != new_name {
            self.delete(old_name)?;
        }
        Ok(())
    }
}

/// Registry held in memory only.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    clusters: BTreeMap<String, NamedCluster>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NamedClusterRegistry for MemoryRegistry {
    fn contains(&self, name: &str) -> bool {
        self.clusters.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<NamedCluster> {
        self.clusters.get(name).cloned()
    }

    fn list(&self) -> Vec<NamedCluster> {
        self.clusters.values().cloned().collect()
    }

    fn save(&mut self, cluster: NamedCluster) -> Result<()> {
        self.clusters.insert(cluster.name.clone(), cluster);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.clusters
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("Named cluster '{}' not found", name))
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    clusters: BTreeMap<String, NamedCluster>,
}

/// Registry persisted as JSON at `<metastore>/NamedCluster/clusters.json`.
#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    file: RegistryFile,
    credentials: Option<Box<dyn CredentialStore>>,
}

impl FileRegistry {
    /// Opens the registry at `path`.
    ///
    /// A missing file yields an empty registry. A file that exists but cannot be
    /// parsed is renamed to `<name>.corrupt.<timestamp>` and an empty registry is used.
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = if path.exists() {
            match read_registry_file(&path) {
                Ok(file) => file,
                Err(e) => {
                    match create_corrupt_backup(&path) {
                        Ok(backup_path) => tracing::warn!(
                            path = %path.display(),
                            backup_path = %backup_path.display(),
                            error = %format!("{e:#}"),
                            "Registry file is corrupt, backed up and using an empty registry"
                        ),
                        Err(backup_err) => tracing::error!(
                            path = %path.display(),
                            error = %format!("{e:#}"),
                            backup_error = %backup_err,
                            "Registry file is corrupt and backup failed, using an empty registry"
                        ),
                    }
                    RegistryFile::default()
                }
            }
        } else {
            RegistryFile::default()
        };

        Ok(Self {
            path,
            file,
            credentials: None,
        })
    }

    /// Keeps saved passwords in `store` instead of the registry file.
    pub fn with_credential_store(mut self, store: Box<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Resolves the HDFS password saved for `name`.
    pub fn hdfs_password(&self, name: &str) -> Result<Option<SecretString>> {
        let Some(value) = self.file.clusters.get(name).and_then(|c| c.hdfs_password.as_ref()) else {
            return Ok(None);
        };
        match (value, &self.credentials) {
            (SecureValue::Keyring { keyring_account }, None) => {
                anyhow::bail!("No credential store configured to read '{keyring_account}'")
            }
            (value, Some(store)) => value.resolve(&**store).map(Some),
            (SecureValue::Plain(secret), None) => Ok(Some(secret.clone())),
        }
    }

    /// Moves the cluster's password into the credential store when one is attached.
    ///
    /// Plain-text passwords are stored under the cluster's account. A keyring
    /// reference left under another cluster's account, as after a rename, is
    /// copied to the cluster's own account.
    fn secure_password(&self, cluster: &mut NamedCluster) {
        let Some(store) = &self.credentials else {
            return;
        };
        let account = hdfs_password_account(&cluster.name);
        let secret = match &cluster.hdfs_password {
            None => return,
            Some(SecureValue::Plain(secret)) => Ok(secret.clone()),
            Some(SecureValue::Keyring { keyring_account }) if *keyring_account == account => return,
            Some(value) => value.resolve(&**store),
        };

        match secret.and_then(|secret| store.set(&account, &secret)) {
            Ok(()) => {
                cluster.hdfs_password = Some(SecureValue::Keyring {
                    keyring_account: account,
                });
            }
            Err(e) => tracing::warn!(
                cluster = %cluster.name,
                error = %format!("{e:#}"),
                "Keyring unavailable, HDFS password left in its current storage"
            ),
        }
    }

    /// Deletes store entries referenced by `removed` that the registry no longer uses.
    fn release_credentials<'a>(&self, removed: impl IntoIterator<Item = &'a NamedCluster>) {
        let Some(store) = &self.credentials else {
            return;
        };

        for cluster in removed {
            let Some(account) = cluster
                .hdfs_password
                .as_ref()
                .and_then(SecureValue::keyring_account)
            else {
                continue;
            };
            let still_used = self.file.clusters.values().any(|c| {
                c.hdfs_password.as_ref().and_then(SecureValue::keyring_account) == Some(account)
            });
            if !still_used && let Err(e) = store.delete(account) {
                tracing::warn!(account, error = %format!("{e:#}"), "Failed to delete keyring entry");
            }
        }
    }

    /// Writes `file` to disk and makes it the current state on success.
    fn commit(&mut self, file: RegistryFile) -> Result<()> {
        atomic_save(&self.path, &file)?;
        self.file = file;
        Ok(())
    }
}

impl NamedClusterRegistry for FileRegistry {
    fn contains(&self, name: &str) -> bool {
        self.file.clusters.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<NamedCluster> {
        self.file.clusters.get(name).cloned()
    }

    fn list(&self) -> Vec<NamedCluster> {
        self.file.clusters.values().cloned().collect()
    }

    fn save(&mut self, mut cluster: NamedCluster) -> Result<()> {
        self.secure_password(&mut cluster);
        let mut next = self.file.clone();
        let previous = next.clusters.insert(cluster.name.clone(), cluster);
        self.commit(next)?;
        self.release_credentials(&previous);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        let mut next = self.file.clone();
        let Some(removed) = next.clusters.remove(name) else {
            anyhow::bail!("Named cluster '{}' not found", name);
        };
        self.commit(next)?;
        self.release_credentials([&removed]);
        Ok(())
    }

    fn replace(&mut self, old_name: &str, mut cluster: NamedCluster) -> Result<()> {
        self.secure_password(&mut cluster);
        let mut next = self.file.clone();
        let renamed = if old_name == cluster.name {
            None
        } else {
            next.clusters.remove(old_name)
        };
        let overwritten = next.clusters.insert(cluster.name.clone(), cluster);
        self.commit(next)?;
        self.release_credentials(renamed.iter().chain(&overwritten));
        Ok(())
    }
}

fn atomic_save(path: &Path, file: &RegistryFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create registry directory")?;
    }

    let temp_path = path.with_extension("tmp");
    let content = serde_json::to_string_pretty(file)?;
    std::fs::write(&temp_path, content).context("Failed to write temporary registry file")?;
    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e).context("Failed to rename temporary registry file");
    }

    tracing::debug!(
        path = %path.display(),
        clusters = file.clusters.len(),
        "Registry saved atomically"
    );
    Ok(())
}

fn read_registry_file(path: &Path) -> Result<RegistryFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read registry file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse registry file {}", path.display()))
}

fn create_corrupt_backup(path: &Path) -> std::io::Result<PathBuf> {
    let timestamp = chrono::Utc::now().timestamp();
    let backup_path = path.with_extension(format!("corrupt.{timestamp}"));
    std::fs::rename(path, &backup_path)?;
    Ok(backup_path)
}
