//! Category probes.
//!
//! Each probe inspects a `NamedCluster`, reports `skipped` for endpoints the
//! cluster does not configure, and otherwise checks reachability within the
//! given timeout.

use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use hadoop_cluster_config::constants::{
    DEFAULT_HDFS_PORT, DEFAULT_JOB_TRACKER_PORT, DEFAULT_KAFKA_PORT, DEFAULT_ZOOKEEPER_PORT,
};
use tokio::net::TcpStream;

use super::category::{TestCategoryKind, TestResult, TestStatus};
use crate::named_cluster::NamedCluster;
use crate::shim::ShimIdentifier;
use crate::site_xml::parse_host_port;

/// Checks one test category against a cluster.
pub trait CategoryProbe: Send + Sync {
    fn kind(&self) -> TestCategoryKind;

    fn run<'a>(&'a self, cluster: &'a NamedCluster, timeout: Duration)
    -> BoxFuture<'a, Vec<TestResult>>;
}

type EndpointFn = fn(&NamedCluster) -> Vec<(String, u16)>;

/// Probe that opens a TCP connection to each configured endpoint.
pub struct TcpProbe {
    kind: TestCategoryKind,
    endpoints: EndpointFn,
    /// When set, unreachable members only warn as long as one member answers.
    quorum: bool,
}

impl TcpProbe {
    pub fn new(kind: TestCategoryKind, endpoints: EndpointFn, quorum: bool) -> Self {
        Self {
            kind,
            endpoints,
            quorum,
        }
    }

    pub fn hdfs() -> Self {
        Self::new(
            TestCategoryKind::HadoopFileSystem,
            |c| single(&c.hdfs_host, c.hdfs_port, DEFAULT_HDFS_PORT),
            false,
        )
    }

    pub fn job_tracker() -> Self {
        Self::new(
            TestCategoryKind::JobTracker,
            |c| single(&c.job_tracker_host, c.job_tracker_port, DEFAULT_JOB_TRACKER_PORT),
            false,
        )
    }

    pub fn zookeeper() -> Self {
        Self::new(
            TestCategoryKind::ZookeeperConnection,
            |c| {
                let port = c.zookeeper_port.unwrap_or(DEFAULT_ZOOKEEPER_PORT);
                host_list(c.zookeeper_host.as_deref(), port)
            },
            true,
        )
    }

    pub fn kafka() -> Self {
        Self::new(
            TestCategoryKind::KafkaConnection,
            |c| host_list(c.kafka_bootstrap_servers.as_deref(), DEFAULT_KAFKA_PORT),
            true,
        )
    }
}

fn single(host: &Option<String>, port: Option<u16>, default_port: u16) -> Vec<(String, u16)> {
    host.as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(|h| vec![(h.to_string(), port.unwrap_or(default_port))])
        .unwrap_or_default()
}

fn host_list(hosts: Option<&str>, default_port: u16) -> Vec<(String, u16)> {
    hosts
        .unwrap_or_default()
        .split(',')
        .filter_map(|entry| parse_host_port(entry, default_port))
        .collect()
}

async fn tcp_connect(host: &str, port: u16, timeout: Duration) -> Result<(), String> {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("timed out after {:?}", timeout)),
    }
}

impl CategoryProbe for TcpProbe {
    fn kind(&self) -> TestCategoryKind {
        self.kind
    }

    fn run<'a>(
        &'a self,
        cluster: &'a NamedCluster,
        timeout: Duration,
    ) -> BoxFuture<'a, Vec<TestResult>> {
        async move {
            let endpoints = (self.endpoints)(cluster);
            if endpoints.is_empty() {
                return vec![TestResult::new(
                    "Endpoint configured",
                    TestStatus::Skipped,
                    "No host configured for this cluster",
                )];
            }

            let attempts = futures::future::join_all(endpoints.iter().map(|(host, port)| async move {
                (host, port, tcp_connect(host, *port, timeout).await)
            }))
            .await;
            let any_reachable = attempts.iter().any(|(_, _, r)| r.is_ok());

            attempts
                .into_iter()
                .map(|(host, port, outcome)| {
                    let name = format!("Connect to {host}:{port}");
                    match outcome {
                        Ok(()) => TestResult::new(name, TestStatus::Pass, "Connection established"),
                        Err(e) if self.quorum && any_reachable => {
                            TestResult::new(name, TestStatus::Warning, e)
                        }
                        Err(e) => TestResult::new(name, TestStatus::Fail, e),
                    }
                })
                .collect()
        }
        .boxed()
    }
}

/// Probe that queries the Oozie admin status endpoint.
pub struct OozieProbe {
    client: reqwest::Client,
}

impl OozieProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn status_url(base: &str) -> String {
        format!("{}/v2/admin/status", base.trim().trim_end_matches('/'))
    }
}

impl Default for OozieProbe {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl CategoryProbe for OozieProbe {
    fn kind(&self) -> TestCategoryKind {
        TestCategoryKind::OozieHostConnection
    }

    fn run<'a>(
        &'a self,
        cluster: &'a NamedCluster,
        timeout: Duration,
    ) -> BoxFuture<'a, Vec<TestResult>> {
        async move {
            let Some(base) = cluster.oozie_url.as_deref().filter(|u| !u.trim().is_empty()) else {
                return vec![TestResult::new(
                    "Oozie URL configured",
                    TestStatus::Skipped,
                    "No Oozie URL configured for this cluster",
                )];
            };

            let url = Self::status_url(base);
            let name = format!("GET {url}");
            let result = match self.client.get(&url).timeout(timeout).send().await {
                Ok(response) if response.status().is_success() => {
                    TestResult::new(name, TestStatus::Pass, format!("HTTP {}", response.status()))
                }
                Ok(response) => TestResult::new(
                    name,
                    TestStatus::Fail,
                    format!("Unexpected response: HTTP {}", response.status()),
                ),
                Err(e) if e.is_timeout() => TestResult::new(
                    name,
                    TestStatus::Fail,
                    format!("timed out after {:?}", timeout),
                ),
                Err(e) => TestResult::new(name, TestStatus::Fail, e.to_string()),
            };
            vec![result]
        }
        .boxed()
    }
}

/// Probe that checks the cluster's shim is among the available shims.
pub struct ShimProbe {
    available: Vec<ShimIdentifier>,
}

impl ShimProbe {
    pub fn new(available: Vec<ShimIdentifier>) -> Self {
        Self { available }
    }
}

impl CategoryProbe for ShimProbe {
    fn kind(&self) -> TestCategoryKind {
        TestCategoryKind::BigDataShim
    }

    fn run<'a>(
        &'a self,
        cluster: &'a NamedCluster,
        _timeout: Duration,
    ) -> BoxFuture<'a, Vec<TestResult>> {
        let name = format!("Shim '{}' available", cluster.shim_identifier);
        let result = match self
            .available
            .iter()
            .find(|s| s.id() == cluster.shim_identifier)
        {
            Some(shim) => TestResult::new(
                name,
                TestStatus::Pass,
                format!("{} {}", shim.vendor(), shim.version()),
            ),
            None => TestResult::new(name, TestStatus::Fail, "Shim is not installed"),
        };
        futures::future::ready(vec![result]).boxed()
    }
}
