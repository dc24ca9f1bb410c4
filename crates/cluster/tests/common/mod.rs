//! Common test utilities for cluster integration tests.
//!
//! # Invariants
//! - Fixtures are read from `tests/fixtures/` relative to the crate root.
//! - Every manager is rooted in its own temporary metastore.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

#[allow(unused_imports)]
pub use hadoop_cluster::{
    ClusterResult, FileRegistry, HadoopClusterManager, NamedCluster, NamedClusterRegistry,
    ProgressSink, RuntimeTestStatus, ShimIdentifier, StaticShimSource, TestCategoryKind,
    TestRunner, TestStatus, ThinClusterModel,
};
#[allow(unused_imports)]
pub use tempfile::TempDir;

pub type TestManager = HadoopClusterManager<FileRegistry, StaticShimSource>;

/// Directory holding a complete set of site files.
#[allow(dead_code)]
pub fn complete_fixture() -> PathBuf {
    fixture_dir("cluster")
}

/// Directory missing most of the required site files.
#[allow(dead_code)]
pub fn incomplete_fixture() -> PathBuf {
    fixture_dir("bad")
}

pub fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Two user-facing shims plus the internal `apache` shim.
pub fn test_shims() -> StaticShimSource {
    StaticShimSource::new(vec![
        ShimIdentifier::new("cdh514", "Cloudera", "5.14"),
        ShimIdentifier::new("apache", "apache", "3.1"),
        ShimIdentifier::new("hdp30", "Hortonworks", "3.0"),
    ])
}

/// Manager over a file registry inside `root`.
#[allow(dead_code)]
pub fn manager_in(root: &Path) -> TestManager {
    let registry = FileRegistry::open(hadoop_cluster_config::paths::registry_path(root))
        .expect("open registry");
    HadoopClusterManager::new(
        registry,
        test_shims(),
        root.to_path_buf(),
        "apache",
        Duration::from_millis(500),
    )
}

/// Progress sink that keeps every report it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSink {
    pub reports: Mutex<Vec<RuntimeTestStatus>>,
}

impl ProgressSink for RecordingSink {
    fn on_progress(&self, status: &RuntimeTestStatus) {
        self.reports.lock().unwrap().push(status.clone());
    }
}
