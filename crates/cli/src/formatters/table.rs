//! Table output formatter.

use anyhow::Result;
use hadoop_cluster::{ClusterResult, TestStatus};

use super::{ClusterView, DEFAULT_MISSING_VALUE, Formatter, ShimView, TestReport};

pub struct TableFormatter;

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(DEFAULT_MISSING_VALUE)
}

fn endpoint(host: Option<&str>, port: Option<u16>) -> String {
    match (host, port) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => DEFAULT_MISSING_VALUE.to_string(),
    }
}

fn status_marker(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "PASS",
        TestStatus::Warning => "WARN",
        TestStatus::Fail => "FAIL",
        TestStatus::Skipped => "SKIP",
    }
}

impl Formatter for TableFormatter {
    fn format_result(&self, result: &ClusterResult) -> Result<String> {
        Ok(format!("Named cluster: {}\n", result.named_cluster))
    }

    fn format_clusters(&self, clusters: &[ClusterView]) -> Result<String> {
        if clusters.is_empty() {
            return Ok("No named clusters found.\n".to_string());
        }

        let name_width = clusters
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("NAME".len());

        let mut output = format!("{:<name_width$}  {:<10}  {}\n", "NAME", "SHIM", "HDFS");
        for cluster in clusters {
            output.push_str(&format!(
                "{:<name_width$}  {:<10}  {}\n",
                cluster.name,
                cluster.shim_identifier,
                endpoint(cluster.hdfs_host.as_deref(), cluster.hdfs_port),
            ));
        }
        Ok(output)
    }

    fn format_cluster(&self, c: &ClusterView) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("Name: {}\n", c.name));
        output.push_str(&format!("Shim: {}\n", c.shim_identifier));
        output.push_str(&format!("Storage Scheme: {}\n", c.storage_scheme));
        output.push_str(&format!(
            "HDFS: {}\n",
            endpoint(c.hdfs_host.as_deref(), c.hdfs_port)
        ));
        output.push_str(&format!(
            "HDFS Username: {}\n",
            or_missing(c.hdfs_username.as_deref())
        ));
        output.push_str(&format!(
            "HDFS Password: {}\n",
            if c.has_hdfs_password { "********" } else { DEFAULT_MISSING_VALUE }
        ));
        output.push_str(&format!(
            "Job Tracker: {}\n",
            endpoint(c.job_tracker_host.as_deref(), c.job_tracker_port)
        ));
        output.push_str(&format!(
            "ZooKeeper: {}\n",
            endpoint(c.zookeeper_host.as_deref(), c.zookeeper_port)
        ));
        output.push_str(&format!("Oozie URL: {}\n", or_missing(c.oozie_url.as_deref())));
        output.push_str(&format!(
            "Kafka: {}\n",
            or_missing(c.kafka_bootstrap_servers.as_deref())
        ));
        let files = c.config_files.join(", ");
        output.push_str(&format!("Config Files: {}\n", or_missing(Some(files.as_str()))));
        output.push_str(&format!(
            "Last Modified: {}\n",
            c.last_modified
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string())
        ));
        Ok(output)
    }

    fn format_shims(&self, shims: &[ShimView]) -> Result<String> {
        if shims.is_empty() {
            return Ok("No shims found.\n".to_string());
        }

        let mut output = format!("{:<12}  {:<14}  {}\n", "ID", "VENDOR", "VERSION");
        for shim in shims {
            output.push_str(&format!(
                "{:<12}  {:<14}  {}\n",
                shim.id, shim.vendor, shim.version
            ));
        }
        Ok(output)
    }

    fn format_test_report(&self, report: &TestReport) -> Result<String> {
        let mut output = format!("--- Connectivity tests: {} ---\n", report.cluster_name);
        for category in &report.categories {
            output.push_str(&format!(
                "[{}] {}\n",
                status_marker(category.status),
                category.category_name
            ));
            for test in &category.tests {
                output.push_str(&format!(
                    "    [{}] {}: {}\n",
                    status_marker(test.status),
                    test.name,
                    test.message
                ));
            }
        }
        Ok(output)
    }
}
