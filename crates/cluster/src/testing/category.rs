//! Test category and result types.

use serde::Serialize;

/// The fixed connectivity test categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCategoryKind {
    HadoopFileSystem,
    OozieHostConnection,
    KafkaConnection,
    ZookeeperConnection,
    JobTracker,
    BigDataShim,
}

impl TestCategoryKind {
    /// All categories in reporting order.
    pub const ALL: [TestCategoryKind; 6] = [
        TestCategoryKind::HadoopFileSystem,
        TestCategoryKind::OozieHostConnection,
        TestCategoryKind::KafkaConnection,
        TestCategoryKind::ZookeeperConnection,
        TestCategoryKind::JobTracker,
        TestCategoryKind::BigDataShim,
    ];

    /// Display name reported to callers.
    pub const fn category_name(self) -> &'static str {
        match self {
            TestCategoryKind::HadoopFileSystem => "Hadoop file system",
            TestCategoryKind::OozieHostConnection => "Oozie host connection",
            TestCategoryKind::KafkaConnection => "Kafka connection",
            TestCategoryKind::ZookeeperConnection => "Zookeeper connection",
            TestCategoryKind::JobTracker => "Job tracker / resource manager",
            TestCategoryKind::BigDataShim => "Pentaho big data shim",
        }
    }

    pub(crate) fn position(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(Self::ALL.len())
    }
}

/// Outcome of a single test or a whole category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Pass,
    Warning,
    Fail,
    Skipped,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Warning => "warning",
            TestStatus::Fail => "fail",
            TestStatus::Skipped => "skipped",
        }
    }
}

/// Result of one check inside a category.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub message: String,
}

impl TestResult {
    pub fn new(name: impl Into<String>, status: TestStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

/// Aggregated result of one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCategory {
    pub category_name: String,
    pub kind: TestCategoryKind,
    pub status: TestStatus,
    pub tests: Vec<TestResult>,
}

impl TestCategory {
    /// Builds a category whose status is the worst of its tests.
    ///
    /// Fail outranks warning, warning outranks pass; a category with no
    /// passing, warning or failing test is skipped.
    pub fn from_results(kind: TestCategoryKind, tests: Vec<TestResult>) -> Self {
        let has = |status: TestStatus| tests.iter().any(|t| t.status == status);
        let status = if has(TestStatus::Fail) {
            TestStatus::Fail
        } else if has(TestStatus::Warning) {
            TestStatus::Warning
        } else if has(TestStatus::Pass) {
            TestStatus::Pass
        } else {
            TestStatus::Skipped
        };

        Self {
            category_name: kind.category_name().to_string(),
            kind,
            status,
            tests,
        }
    }
}

/// Progress snapshot delivered to a `ProgressSink`.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeTestStatus {
    pub cluster_name: String,
    pub completed: usize,
    pub total: usize,
    /// Category that just finished, absent on the final report.
    pub latest: Option<TestCategory>,
    pub done: bool,
}

/// Receives progress while a test run is in flight.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, status: &RuntimeTestStatus);
}

impl<F> ProgressSink for F
where
    F: Fn(&RuntimeTestStatus) + Send + Sync,
{
    fn on_progress(&self, status: &RuntimeTestStatus) {
        self(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_are_fixed() {
        let names: Vec<_> = TestCategoryKind::ALL
            .iter()
            .map(|k| k.category_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "Hadoop file system",
                "Oozie host connection",
                "Kafka connection",
                "Zookeeper connection",
                "Job tracker / resource manager",
                "Pentaho big data shim",
            ]
        );
    }

    #[test]
    fn test_category_status_is_worst_result() {
        let results = vec![
            TestResult::new("a", TestStatus::Pass, ""),
            TestResult::new("b", TestStatus::Warning, ""),
        ];
        let category = TestCategory::from_results(TestCategoryKind::KafkaConnection, results);
        assert_eq!(category.status, TestStatus::Warning);

        let results = vec![
            TestResult::new("a", TestStatus::Skipped, ""),
            TestResult::new("b", TestStatus::Fail, ""),
        ];
        let category = TestCategory::from_results(TestCategoryKind::KafkaConnection, results);
        assert_eq!(category.status, TestStatus::Fail);
    }

    #[test]
    fn test_empty_category_is_skipped() {
        let category = TestCategory::from_results(TestCategoryKind::JobTracker, Vec::new());
        assert_eq!(category.status, TestStatus::Skipped);
        assert_eq!(category.category_name, "Job tracker / resource manager");
    }

    #[test]
    fn test_category_serializes_category_name() {
        let category = TestCategory::from_results(TestCategoryKind::BigDataShim, Vec::new());
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["categoryName"], "Pentaho big data shim");
        assert_eq!(value["status"], "skipped");
    }
}
