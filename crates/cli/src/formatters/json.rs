//! JSON output formatter.

use anyhow::Result;
use hadoop_cluster::ClusterResult;

use super::{ClusterView, Formatter, ShimView, TestReport};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_result(&self, result: &ClusterResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn format_clusters(&self, clusters: &[ClusterView]) -> Result<String> {
        Ok(serde_json::to_string_pretty(clusters)?)
    }

    fn format_cluster(&self, cluster: &ClusterView) -> Result<String> {
        Ok(serde_json::to_string_pretty(cluster)?)
    }

    fn format_shims(&self, shims: &[ShimView]) -> Result<String> {
        Ok(serde_json::to_string_pretty(shims)?)
    }

    fn format_test_report(&self, report: &TestReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
