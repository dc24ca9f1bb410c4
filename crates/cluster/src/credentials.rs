//! Storage of cluster credentials outside the registry file.
//!
//! Responsibilities:
//! - Define `SecureValue`, a password held either in plain text or as a
//!   reference to a credential store entry.
//! - Define the `CredentialStore` seam and its system keyring implementation.
//!
//! Does NOT handle:
//! - Deciding when a password moves into the store (see `registry`).
//!
//! Invariants:
//! - `KEYRING_SERVICE` is the service name for every keyring entry.
//! - A `Keyring` value never carries the secret itself.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Service name used for keyring storage.
pub const KEYRING_SERVICE: &str = "hadoop-cluster";

mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// A password stored either in plain text or in a credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecureValue {
    /// Value held by a credential store under this account.
    Keyring { keyring_account: String },
    /// Value stored in plain text.
    #[serde(with = "secret_string")]
    Plain(SecretString),
}

impl SecureValue {
    pub fn plain(secret: SecretString) -> Self {
        Self::Plain(secret)
    }

    pub fn keyring_account(&self) -> Option<&str> {
        match self {
            Self::Keyring { keyring_account } => Some(keyring_account),
            Self::Plain(_) => None,
        }
    }

    /// Resolves the value to the secret, reading the store for `Keyring` values.
    pub fn resolve(&self, store: &dyn CredentialStore) -> Result<SecretString> {
        match self {
            Self::Plain(secret) => Ok(secret.clone()),
            Self::Keyring { keyring_account } => store.get(keyring_account),
        }
    }
}

/// Keyring account holding the HDFS password of `cluster_name`.
pub fn hdfs_password_account(cluster_name: &str) -> String {
    format!("{cluster_name}-hdfs")
}

/// Backend that holds secrets referenced from the registry.
pub trait CredentialStore: std::fmt::Debug + Send + Sync {
    fn set(&self, account: &str, secret: &SecretString) -> Result<()>;

    fn get(&self, account: &str) -> Result<SecretString>;

    fn delete(&self, account: &str) -> Result<()>;
}

/// The operating system keyring.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringStore;

impl CredentialStore for KeyringStore {
    fn set(&self, account: &str, secret: &SecretString) -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
        entry
            .set_password(secret.expose_secret())
            .with_context(|| format!("Failed to store keyring entry '{account}'"))
    }

    fn get(&self, account: &str) -> Result<SecretString> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
        let password = entry
            .get_password()
            .with_context(|| format!("Failed to read keyring entry '{account}'"))?;
        Ok(SecretString::new(password.into()))
    }

    fn delete(&self, account: &str) -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, account)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete keyring entry '{account}'")),
        }
    }
}

/// Credential store held in memory, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    secrets: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, account: &str) -> bool {
        self.secrets
            .lock()
            .map(|secrets| secrets.contains_key(account))
            .unwrap_or(false)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set(&self, account: &str, secret: &SecretString) -> Result<()> {
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?;
        secrets.insert(account.to_string(), secret.expose_secret().to_string());
        Ok(())
    }

    fn get(&self, account: &str) -> Result<SecretString> {
        let secrets = self
            .secrets
            .lock()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?;
        secrets
            .get(account)
            .map(|s| SecretString::new(s.clone().into()))
            .ok_or_else(|| anyhow::anyhow!("No credential stored for '{account}'"))
    }

    fn delete(&self, account: &str) -> Result<()> {
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|_| anyhow::anyhow!("credential store lock poisoned"))?;
        secrets.remove(account);
        Ok(())
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    fn set(&self, account: &str, secret: &SecretString) -> Result<()> {
        (**self).set(account, secret)
    }

    fn get(&self, account: &str) -> Result<SecretString> {
        (**self).get(account)
    }

    fn delete(&self, account: &str) -> Result<()> {
        (**self).delete(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_plain_value_reads_legacy_registry_string() {
        let value: SecureValue = serde_json::from_str(r#""hunter2""#).unwrap();
        let store = MemoryCredentialStore::new();
        assert!(value.keyring_account().is_none());
        assert_eq!(value.resolve(&store).unwrap().expose_secret(), "hunter2");
    }

    #[test]
    fn test_keyring_value_serializes_account_only() {
        let value = SecureValue::Keyring {
            keyring_account: hdfs_password_account("prod"),
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"keyring_account":"prod-hdfs"}"#);

        let parsed: SecureValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.keyring_account(), Some("prod-hdfs"));
    }

    #[test]
    fn test_memory_store_resolves_keyring_value() {
        let store = MemoryCredentialStore::new();
        store
            .set("prod-hdfs", &SecretString::new("s3cret".into()))
            .unwrap();

        let value = SecureValue::Keyring {
            keyring_account: "prod-hdfs".to_string(),
        };
        assert_eq!(value.resolve(&store).unwrap().expose_secret(), "s3cret");

        store.delete("prod-hdfs").unwrap();
        assert!(value.resolve(&store).is_err());
    }

    #[test]
    #[serial]
    fn test_system_keyring_round_trip() {
        let store = KeyringStore;
        let account = "hadoop-cluster-test-account";
        match store.set(account, &SecretString::new("s3cret".into())) {
            Ok(()) => {
                match store.get(account) {
                    Ok(secret) => assert_eq!(secret.expose_secret(), "s3cret"),
                    Err(e) => eprintln!("Skipping keyring read check: {e:#}"),
                }
                store.delete(account).unwrap();
            }
            Err(e) => eprintln!("Skipping keyring test: {e:#}"),
        }
    }
}
