//! Concurrent driver for the category probes.

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::Instrument;

use super::category::{
    ProgressSink, RuntimeTestStatus, TestCategory, TestCategoryKind, TestResult, TestStatus,
};
use super::probes::{CategoryProbe, OozieProbe, ShimProbe, TcpProbe};
use crate::named_cluster::NamedCluster;
use crate::shim::ShimIdentifier;

/// Runs one probe per category against a cluster.
pub struct TestRunner {
    probes: Vec<Box<dyn CategoryProbe>>,
    timeout: Duration,
}

impl TestRunner {
    /// A runner without probes; every category reports `skipped`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            probes: Vec::new(),
            timeout,
        }
    }

    /// A runner with the standard probe for every category.
    pub fn with_default_probes(available_shims: Vec<ShimIdentifier>, timeout: Duration) -> Self {
        Self::new(timeout)
            .with_probe(Box::new(TcpProbe::hdfs()))
            .with_probe(Box::new(OozieProbe::default()))
            .with_probe(Box::new(TcpProbe::kafka()))
            .with_probe(Box::new(TcpProbe::zookeeper()))
            .with_probe(Box::new(TcpProbe::job_tracker()))
            .with_probe(Box::new(ShimProbe::new(available_shims)))
    }

    /// Registers `probe`, replacing any probe for the same category.
    pub fn with_probe(mut self, probe: Box<dyn CategoryProbe>) -> Self {
        self.probes.retain(|p| p.kind() != probe.kind());
        self.probes.push(probe);
        self
    }

    /// Runs every category against `cluster`.
    ///
    /// Returns the six categories in `TestCategoryKind::ALL` order.
    pub async fn run(
        &self,
        cluster: &NamedCluster,
        sink: Option<&dyn ProgressSink>,
    ) -> Vec<TestCategory> {
        let span = tracing::info_span!("run_tests", cluster = %cluster.name);
        async move {
            let total = TestCategoryKind::ALL.len();
            let mut pending: FuturesUnordered<_> = TestCategoryKind::ALL
                .into_iter()
                .map(|kind| self.run_category(kind, cluster))
                .collect();

            let mut categories = Vec::with_capacity(total);
            while let Some(category) = pending.next().await {
                tracing::debug!(
                    category = %category.category_name,
                    status = category.status.as_str(),
                    "Category finished"
                );
                if let Some(sink) = sink {
                    sink.on_progress(&RuntimeTestStatus {
                        cluster_name: cluster.name.clone(),
                        completed: categories.len() + 1,
                        total,
                        latest: Some(category.clone()),
                        done: false,
                    });
                }
                categories.push(category);
            }

            categories.sort_by_key(|c| c.kind.position());

            let failed = categories
                .iter()
                .filter(|c| c.status == TestStatus::Fail)
                .count();
            tracing::info!(failed, total, "Connectivity tests finished");

            if let Some(sink) = sink {
                sink.on_progress(&RuntimeTestStatus {
                    cluster_name: cluster.name.clone(),
                    completed: total,
                    total,
                    latest: None,
                    done: true,
                });
            }
            categories
        }
        .instrument(span)
        .await
    }

    async fn run_category(&self, kind: TestCategoryKind, cluster: &NamedCluster) -> TestCategory {
        let results = match self.probes.iter().find(|p| p.kind() == kind) {
            Some(probe) => probe.run(cluster, self.timeout).await,
            None => vec![TestResult::new(
                kind.category_name(),
                TestStatus::Skipped,
                "No probe registered for this category",
            )],
        };
        TestCategory::from_results(kind, results)
    }
}
