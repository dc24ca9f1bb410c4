//! Centralized constants for the Hadoop cluster manager workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Metastore Layout
// =============================================================================

/// Path segments from the user's home directory to the metastore root.
pub const METASTORE_SEGMENTS: [&str; 3] = [".pentaho", "metastore", "pentaho"];

/// Directory (under the metastore root) holding named cluster definitions.
pub const NAMED_CLUSTER_DIR: &str = "NamedCluster";

/// Directory (under `NamedCluster`) holding per-cluster site files.
pub const CONFIGS_DIR: &str = "Configs";

/// File name of the named cluster registry.
pub const REGISTRY_FILE: &str = "clusters.json";

// =============================================================================
// Shim Defaults
// =============================================================================

/// Id of the internal shim bundled with the host runtime.
///
/// This shim is never offered as a user-facing choice.
pub const DEFAULT_INTERNAL_SHIM_ID: &str = "apache";

// =============================================================================
// Connectivity Test Defaults
// =============================================================================

/// Default timeout for a single connectivity probe in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Maximum allowed probe timeout in seconds (5 minutes).
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 300;

/// Default HDFS name node RPC port.
pub const DEFAULT_HDFS_PORT: u16 = 8020;

/// Default YARN resource manager port.
pub const DEFAULT_JOB_TRACKER_PORT: u16 = 8032;

/// Default ZooKeeper client port.
pub const DEFAULT_ZOOKEEPER_PORT: u16 = 2181;

/// Default Kafka broker port.
pub const DEFAULT_KAFKA_PORT: u16 = 9092;
