//! Named cluster definitions.
//!
//! Responsibilities:
//! - Define `NamedCluster`, the persisted connection profile.
//! - Validate cluster names before they key registry entries or directories.
//! - Apply a submitted `ThinClusterModel` onto a definition.
//!
//! Invariants:
//! - A cluster always carries exactly one shim identifier.
//! - Valid names are usable as a single path component.
//! - A password submitted through a model is held as `SecureValue::Plain`
//!   until the registry moves it to a credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::credentials::SecureValue;
use crate::error::{ClusterError, Result};
use crate::model::ThinClusterModel;

/// Storage scheme assigned to new clusters.
pub const DEFAULT_STORAGE_SCHEME: &str = "hdfs";

/// A saved Hadoop cluster connection profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedCluster {
    pub name: String,
    pub shim_identifier: String,
    pub storage_scheme: String,
    pub hdfs_host: Option<String>,
    pub hdfs_port: Option<u16>,
    pub hdfs_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdfs_password: Option<SecureValue>,
    pub job_tracker_host: Option<String>,
    pub job_tracker_port: Option<u16>,
    pub zookeeper_host: Option<String>,
    pub zookeeper_port: Option<u16>,
    pub oozie_url: Option<String>,
    pub kafka_bootstrap_servers: Option<String>,
    /// Site files present in the managed configuration directory.
    pub config_files: Vec<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Default for NamedCluster {
    fn default() -> Self {
        Self {
            name: String::new(),
            shim_identifier: String::new(),
            storage_scheme: DEFAULT_STORAGE_SCHEME.to_string(),
            hdfs_host: None,
            hdfs_port: None,
            hdfs_username: None,
            hdfs_password: None,
            job_tracker_host: None,
            job_tracker_port: None,
            zookeeper_host: None,
            zookeeper_port: None,
            oozie_url: None,
            kafka_bootstrap_servers: None,
            config_files: Vec::new(),
            last_modified: None,
        }
    }
}

impl NamedCluster {
    /// Copies the model's connection fields onto this cluster.
    ///
    /// Blank strings in the model clear the corresponding field; absent
    /// fields leave it untouched.
    pub fn apply_model(&mut self, model: &ThinClusterModel) {
        merge_text(&mut self.hdfs_host, &model.hdfs_host);
        merge_port(&mut self.hdfs_port, model.hdfs_port);
        merge_text(&mut self.hdfs_username, &model.hdfs_username);
        if let Some(password) = &model.hdfs_password {
            self.hdfs_password = Some(SecureValue::plain(password.clone()));
        }
        merge_text(&mut self.job_tracker_host, &model.job_tracker_host);
        merge_port(&mut self.job_tracker_port, model.job_tracker_port);
        merge_text(&mut self.zookeeper_host, &model.zoo_keeper_host);
        merge_port(&mut self.zookeeper_port, model.zoo_keeper_port);
        merge_text(&mut self.oozie_url, &model.oozie_url);
        merge_text(
            &mut self.kafka_bootstrap_servers,
            &model.kafka_bootstrap_servers,
        );
    }

    /// Marks the cluster as modified now.
    pub fn touch(&mut self) {
        self.last_modified = Some(Utc::now());
    }
}

fn merge_text(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        *target = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
}

fn merge_port(target: &mut Option<u16>, value: Option<u16>) {
    if value.is_some() {
        *target = value;
    }
}

/// Validates a cluster name, returning the trimmed name.
///
/// # Errors
///
/// Returns `ClusterError::InvalidName` when the name is empty, contains a
/// path separator or control character, or is `.` / `..`.
pub fn validate_cluster_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        Some("name must not be empty")
    } else if trimmed == "." || trimmed == ".." {
        Some("name must not be a relative path component")
    } else if trimmed.contains(['/', '\\']) {
        Some("name must not contain path separators")
    } else if trimmed.chars().any(char::is_control) {
        Some("name must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ClusterError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_and_trims() {
        assert_eq!(validate_cluster_name("  ncTest ").unwrap(), "ncTest");
        assert_eq!(validate_cluster_name("prod cluster 2").unwrap(), "prod cluster 2");
    }

    #[test]
    fn test_validate_rejects_unsafe_names() {
        for name in ["", "   ", ".", "..", "a/b", "a\\b", "bad\nname"] {
            assert!(
                matches!(
                    validate_cluster_name(name),
                    Err(ClusterError::InvalidName { .. })
                ),
                "expected {name:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_apply_model_merges_fields() {
        let mut cluster = NamedCluster {
            name: "nc".to_string(),
            hdfs_host: Some("old-nn".to_string()),
            oozie_url: Some("http://oozie:11000/oozie".to_string()),
            ..Default::default()
        };

        let model = ThinClusterModel {
            hdfs_host: Some(" new-nn ".to_string()),
            hdfs_port: Some(9000),
            oozie_url: Some(String::new()),
            ..ThinClusterModel::named("nc")
        };
        cluster.apply_model(&model);

        assert_eq!(cluster.hdfs_host.as_deref(), Some("new-nn"));
        assert_eq!(cluster.hdfs_port, Some(9000));
        assert!(cluster.oozie_url.is_none());
        assert!(cluster.job_tracker_host.is_none());
    }

    #[test]
    fn test_default_storage_scheme() {
        assert_eq!(NamedCluster::default().storage_scheme, "hdfs");
    }

    #[test]
    fn test_password_not_serialized_when_absent() {
        let json = serde_json::to_string(&NamedCluster::default()).unwrap();
        assert!(!json.contains("hdfs_password"));
    }
}
