//! Integration tests for connectivity probing against local endpoints.

mod common;

use std::time::Duration;

use common::*;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn local_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

#[tokio::test]
async fn test_run_tests_against_live_endpoints() {
    let oozie = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oozie/v2/admin/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "systemMode": "NORMAL"
        })))
        .expect(1)
        .mount(&oozie)
        .await;

    let (_hdfs, hdfs_port) = local_listener().await;
    let (_rm, rm_port) = local_listener().await;

    let root = TempDir::new().unwrap();
    let mut manager = manager_in(root.path());
    let model = ThinClusterModel {
        hdfs_host: Some("127.0.0.1".to_string()),
        hdfs_port: Some(hdfs_port),
        job_tracker_host: Some("127.0.0.1".to_string()),
        job_tracker_port: Some(rm_port),
        oozie_url: Some(format!("{}/oozie/", oozie.uri())),
        ..ThinClusterModel::named("local")
    };
    assert!(manager.create_named_cluster(&model).is_success());

    let categories = manager.run_tests(None, "local").await;
    let status_of = |kind: TestCategoryKind| {
        categories
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.status)
            .unwrap()
    };

    assert_eq!(status_of(TestCategoryKind::HadoopFileSystem), TestStatus::Pass);
    assert_eq!(status_of(TestCategoryKind::OozieHostConnection), TestStatus::Pass);
    assert_eq!(status_of(TestCategoryKind::JobTracker), TestStatus::Pass);
    assert_eq!(status_of(TestCategoryKind::KafkaConnection), TestStatus::Skipped);
    assert_eq!(status_of(TestCategoryKind::ZookeeperConnection), TestStatus::Skipped);
}

#[tokio::test]
async fn test_oozie_error_status_fails_category() {
    let oozie = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/admin/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&oozie)
        .await;

    let root = TempDir::new().unwrap();
    let mut manager = manager_in(root.path());
    let model = ThinClusterModel {
        oozie_url: Some(oozie.uri()),
        ..ThinClusterModel::named("degraded")
    };
    manager.create_named_cluster(&model);

    let categories = manager.run_tests(None, "degraded").await;
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[1].category_name, "Oozie host connection");
    assert_eq!(categories[1].status, TestStatus::Fail);
}

#[tokio::test]
async fn test_closed_port_fails_category() {
    let (listener, port) = local_listener().await;
    drop(listener);

    let root = TempDir::new().unwrap();
    let mut manager = manager_in(root.path());
    let model = ThinClusterModel {
        kafka_bootstrap_servers: Some(format!("127.0.0.1:{port}")),
        ..ThinClusterModel::named("closed")
    };
    manager.create_named_cluster(&model);

    let categories = manager.run_tests(None, "closed").await;
    assert_eq!(categories[2].category_name, "Kafka connection");
    assert_eq!(categories[2].status, TestStatus::Fail);
}

#[tokio::test]
async fn test_custom_runner_replaces_defaults() {
    let root = TempDir::new().unwrap();
    let mut manager =
        manager_in(root.path()).with_test_runner(TestRunner::new(Duration::from_millis(100)));
    manager.create_named_cluster(&ThinClusterModel::named("bare"));

    let categories = manager.run_tests(None, "bare").await;
    assert_eq!(categories.len(), 6);
    assert!(categories.iter().all(|c| c.status == TestStatus::Skipped));
}
