//! Shared test utilities for hadoop-cluster CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading and
//!   points the metastore at a temporary home directory.
//! - Write minimal Hadoop site files for import tests.
//!
//! Invariants / Assumptions:
//! - Every command built here uses its own `HADOOP_CLUSTER_HOME`.

use std::path::Path;

use assert_cmd::Command;

/// Returns a hermetic `hadoop-cluster` command rooted at `home`.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `HADOOP_CLUSTER_HOME` points at `home`.
/// - `HADOOP_CLUSTER_USE_KEYRING=false` keeps the host keyring untouched.
/// - Other `HADOOP_CLUSTER_*` variables are cleared to ensure no leakage from the host.
pub fn cluster_cmd(home: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("hadoop-cluster");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("HADOOP_CLUSTER_HOME", home);
    cmd.env("HADOOP_CLUSTER_USE_KEYRING", "false");
    cmd.env_remove("HADOOP_CLUSTER_INTERNAL_SHIM")
        .env_remove("HADOOP_CLUSTER_SHIMS_FILE")
        .env_remove("HADOOP_CLUSTER_PROBE_TIMEOUT")
        .env_remove("HADOOP_CLUSTER_HDFS_PASSWORD")
        .env_remove("RUST_LOG");

    cmd
}

/// Writes the four required site files into `dir`.
#[allow(dead_code)]
pub fn write_site_files(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    let property = |name: &str, value: &str| {
        format!(
            "<?xml version=\"1.0\"?>\n<configuration>\n  <property>\n    <name>{name}</name>\n    <value>{value}</value>\n  </property>\n</configuration>\n"
        )
    };
    std::fs::write(
        dir.join("core-site.xml"),
        property("fs.defaultFS", "hdfs://namenode.example.com:8020"),
    )
    .unwrap();
    std::fs::write(
        dir.join("yarn-site.xml"),
        property("yarn.resourcemanager.address", "rm.example.com:8032"),
    )
    .unwrap();
    std::fs::write(
        dir.join("hive-site.xml"),
        property("hive.zookeeper.quorum", "zk.example.com"),
    )
    .unwrap();
    std::fs::write(
        dir.join("oozie-default.xml"),
        property("oozie.base.url", "http://oozie.example.com:11000/oozie"),
    )
    .unwrap();
}

/// Path of a cluster's managed configuration directory under `home`.
#[allow(dead_code)]
pub fn config_dir(home: &Path, name: &str) -> std::path::PathBuf {
    home.join(".pentaho")
        .join("metastore")
        .join("pentaho")
        .join("NamedCluster")
        .join("Configs")
        .join(name)
}
