//! Form model submitted by callers and the structured result returned to them.
//!
//! Responsibilities:
//! - Define `ThinClusterModel`, the camelCase form bound from a UI or JSON file.
//! - Define `ClusterResult`, whose `namedCluster` field is empty on failure.
//!
//! Invariants:
//! - `hdfsPassword` is never serialized back out of the model.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Cluster form model.
///
/// Every field is optional; each manager operation checks the ones it needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThinClusterModel {
    pub name: String,
    /// Name of the cluster being edited.
    pub old_name: String,
    /// Directory holding the site files to import.
    pub import_path: Option<String>,
    pub shim_vendor: Option<String>,
    pub shim_version: Option<String>,
    pub hdfs_host: Option<String>,
    pub hdfs_port: Option<u16>,
    pub hdfs_username: Option<String>,
    #[serde(with = "crate::secret")]
    pub hdfs_password: Option<SecretString>,
    pub job_tracker_host: Option<String>,
    pub job_tracker_port: Option<u16>,
    #[serde(alias = "zookeeperHost")]
    pub zoo_keeper_host: Option<String>,
    #[serde(alias = "zookeeperPort")]
    pub zoo_keeper_port: Option<u16>,
    pub oozie_url: Option<String>,
    pub kafka_bootstrap_servers: Option<String>,
}

impl ThinClusterModel {
    /// Creates a model carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Outcome of a create, import, edit or delete operation.
///
/// On failure `named_cluster` is the empty string; there is no other signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    pub named_cluster: String,
}

impl ClusterResult {
    pub fn success(name: impl Into<String>) -> Self {
        Self {
            named_cluster: name.into(),
        }
    }

    pub fn failed() -> Self {
        Self {
            named_cluster: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        !self.named_cluster.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_model_binds_camel_case_json() {
        let json = r#"{
            "name": "ncTest",
            "oldName": "ncOld",
            "importPath": "/tmp/conf",
            "shimVendor": "Cloudera",
            "shimVersion": "5.14",
            "hdfsHost": "nn.example.com",
            "hdfsPort": 8020,
            "hdfsPassword": "s3cret",
            "zooKeeperHost": "zk.example.com",
            "kafkaBootstrapServers": "k1:9092,k2:9092"
        }"#;

        let model: ThinClusterModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.name, "ncTest");
        assert_eq!(model.old_name, "ncOld");
        assert_eq!(model.import_path.as_deref(), Some("/tmp/conf"));
        assert_eq!(model.shim_vendor.as_deref(), Some("Cloudera"));
        assert_eq!(model.hdfs_port, Some(8020));
        assert_eq!(
            model.hdfs_password.as_ref().map(|p| p.expose_secret().to_string()),
            Some("s3cret".to_string())
        );
        assert_eq!(model.zoo_keeper_host.as_deref(), Some("zk.example.com"));
        assert!(model.job_tracker_host.is_none());
    }

    #[test]
    fn test_model_debug_redacts_password() {
        let model = ThinClusterModel {
            hdfs_password: Some(SecretString::new("hunter2".to_string().into())),
            ..ThinClusterModel::named("nc")
        };
        assert!(!format!("{model:?}").contains("hunter2"));
    }

    #[test]
    fn test_result_serializes_named_cluster_key() {
        let ok = serde_json::to_value(ClusterResult::success("ncTest")).unwrap();
        assert_eq!(ok, serde_json::json!({ "namedCluster": "ncTest" }));

        let failed = serde_json::to_value(ClusterResult::failed()).unwrap();
        assert_eq!(failed, serde_json::json!({ "namedCluster": "" }));
    }
}
