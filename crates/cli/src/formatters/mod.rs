//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide JSON and table output for clusters, shims, operation results
//!   and test reports.
//! - Redact secrets before anything is formatted.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - JSON output for empty listings is a valid empty array.
//! - Tables print `No <items> found.` for empty listings.
//! - Missing values render as `N/A` in tables and `null` in JSON.

mod json;
mod table;

use anyhow::Result;
use chrono::{DateTime, Utc};
use hadoop_cluster::{ClusterResult, NamedCluster, ShimIdentifier, TestCategory};
use serde::Serialize;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Placeholder for missing values in human-facing output.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// Secret-free view of a named cluster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterView {
    pub name: String,
    pub shim_identifier: String,
    pub storage_scheme: String,
    pub hdfs_host: Option<String>,
    pub hdfs_port: Option<u16>,
    pub hdfs_username: Option<String>,
    pub has_hdfs_password: bool,
    pub job_tracker_host: Option<String>,
    pub job_tracker_port: Option<u16>,
    pub zookeeper_host: Option<String>,
    pub zookeeper_port: Option<u16>,
    pub oozie_url: Option<String>,
    pub kafka_bootstrap_servers: Option<String>,
    pub config_files: Vec<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl From<&NamedCluster> for ClusterView {
    fn from(c: &NamedCluster) -> Self {
        Self {
            name: c.name.clone(),
            shim_identifier: c.shim_identifier.clone(),
            storage_scheme: c.storage_scheme.clone(),
            hdfs_host: c.hdfs_host.clone(),
            hdfs_port: c.hdfs_port,
            hdfs_username: c.hdfs_username.clone(),
            has_hdfs_password: c.hdfs_password.is_some(),
            job_tracker_host: c.job_tracker_host.clone(),
            job_tracker_port: c.job_tracker_port,
            zookeeper_host: c.zookeeper_host.clone(),
            zookeeper_port: c.zookeeper_port,
            oozie_url: c.oozie_url.clone(),
            kafka_bootstrap_servers: c.kafka_bootstrap_servers.clone(),
            config_files: c.config_files.clone(),
            last_modified: c.last_modified,
        }
    }
}

/// Shim listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct ShimView {
    pub id: String,
    pub vendor: String,
    pub version: String,
}

impl From<&ShimIdentifier> for ShimView {
    fn from(s: &ShimIdentifier) -> Self {
        Self {
            id: s.id().to_string(),
            vendor: s.vendor().to_string(),
            version: s.version().to_string(),
        }
    }
}

/// Connectivity test report for one cluster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    pub cluster_name: String,
    pub categories: Vec<TestCategory>,
}

/// Formats command output.
pub trait Formatter {
    fn format_result(&self, result: &ClusterResult) -> Result<String>;

    fn format_clusters(&self, clusters: &[ClusterView]) -> Result<String>;

    fn format_cluster(&self, cluster: &ClusterView) -> Result<String>;

    fn format_shims(&self, shims: &[ShimView]) -> Result<String>;

    fn format_test_report(&self, report: &TestReport) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
