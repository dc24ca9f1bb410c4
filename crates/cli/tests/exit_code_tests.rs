//! Integration tests for structured exit codes.
//!
//! These tests verify that hadoop-cluster returns the correct exit codes
//! for different failure modes, enabling reliable shell scripting.

mod common;

use common::{cluster_cmd, config_dir};
use predicates::prelude::*;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test that successful commands return exit code 0.
#[test]
fn test_success_returns_exit_code_0() {
    let home = TempDir::new().unwrap();
    cluster_cmd(home.path()).arg("list").assert().code(0);
}

/// Test that unknown clusters return exit code 4.
#[test]
fn test_not_found_returns_exit_code_4() {
    let home = TempDir::new().unwrap();
    cluster_cmd(home.path())
        .args(["delete", "ghost"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not found"));

    cluster_cmd(home.path()).args(["test", "ghost"]).assert().code(4);
}

/// Test that duplicate names return exit code 5.
#[test]
fn test_duplicate_name_returns_exit_code_5() {
    let home = TempDir::new().unwrap();
    cluster_cmd(home.path())
        .args(["create", "existingName"])
        .assert()
        .success();
    cluster_cmd(home.path())
        .args(["create", "existingName"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("already exists"));
}

/// Test that an incomplete import source returns exit code 5 and writes nothing.
#[test]
fn test_incomplete_import_returns_exit_code_5() {
    let home = TempDir::new().unwrap();
    let source = TempDir::new().unwrap();
    std::fs::write(source.path().join("core-site.xml"), "<configuration/>").unwrap();

    cluster_cmd(home.path())
        .args(["--quiet", "import", "ncTest", "--from"])
        .arg(source.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("yarn-site.xml"));

    assert!(!config_dir(home.path(), "ncTest").exists());
}

/// Test that path-unsafe names return exit code 5.
#[test]
fn test_invalid_name_returns_exit_code_5() {
    let home = TempDir::new().unwrap();
    cluster_cmd(home.path())
        .args(["create", "../escape"])
        .assert()
        .code(5);
}

/// Test that an out-of-range probe timeout returns exit code 5.
#[test]
fn test_invalid_probe_timeout_returns_exit_code_5() {
    let home = TempDir::new().unwrap();
    cluster_cmd(home.path())
        .env("HADOOP_CLUSTER_PROBE_TIMEOUT", "0")
        .arg("list")
        .assert()
        .code(5);
}

/// Test that an invalid output format returns exit code 1.
#[test]
fn test_invalid_output_format_returns_exit_code_1() {
    let home = TempDir::new().unwrap();
    cluster_cmd(home.path())
        .args(["-o", "yaml", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output format"));
}

/// Test that a failing connectivity category returns exit code 6.
#[tokio::test]
async fn test_failed_tests_return_exit_code_6() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let home = TempDir::new().unwrap();
    cluster_cmd(home.path())
        .args(["create", "unreachable", "--hdfs-host", "127.0.0.1", "--hdfs-port"])
        .arg(port.to_string())
        .assert()
        .success();

    cluster_cmd(home.path())
        .args(["--quiet", "--probe-timeout", "2", "test", "unreachable"])
        .assert()
        .code(6)
        .stdout(predicate::str::contains("[FAIL] Hadoop file system"));
}
