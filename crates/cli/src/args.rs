//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate cluster flags into a `ThinClusterModel`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not resolve settings precedence (see `hadoop_cluster_config::SettingsLoader`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hadoop_cluster::ThinClusterModel;
use secrecy::SecretString;

#[derive(Parser)]
#[command(name = "hadoop-cluster")]
#[command(about = "Manage named Hadoop cluster configurations", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  hadoop-cluster import prod --from /etc/hadoop/conf --shim-vendor Cloudera --shim-version 5.14\n  hadoop-cluster create dev --hdfs-host namenode --hdfs-port 8020\n  hadoop-cluster edit dev --new-name staging\n  hadoop-cluster test prod\n  hadoop-cluster --output json list\n"
)]
pub struct Cli {
    /// Home directory holding the metastore (default: the user's home).
    ///
    /// Can also be set via HADOOP_CLUSTER_HOME.
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Shim id hidden from shim listings.
    ///
    /// Can also be set via HADOOP_CLUSTER_INTERNAL_SHIM.
    #[arg(long, global = true, value_name = "ID")]
    pub internal_shim: Option<String>,

    /// JSON catalog of available shims (default: built-in catalog).
    ///
    /// Can also be set via HADOOP_CLUSTER_SHIMS_FILE.
    #[arg(long, global = true, value_name = "FILE")]
    pub shims_file: Option<PathBuf>,

    /// Timeout in seconds for each connectivity probe.
    ///
    /// Can also be set via HADOOP_CLUSTER_PROBE_TIMEOUT.
    #[arg(long, global = true, value_name = "SECS")]
    pub probe_timeout: Option<u64>,

    /// Keep HDFS passwords in the registry file instead of the system keyring.
    ///
    /// Can also be set via HADOOP_CLUSTER_USE_KEYRING=false.
    #[arg(long, global = true)]
    pub no_keyring: bool,

    /// Output format (json, table)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Suppress all progress output (spinners).
    ///
    /// Note: Progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a named cluster without importing site files
    Create {
        /// Name of the new cluster
        name: String,

        #[command(flatten)]
        fields: ClusterFields,
    },

    /// Create a named cluster from a directory of Hadoop site files
    Import {
        /// Name of the new cluster
        name: String,

        /// Directory containing core-site.xml, yarn-site.xml, hive-site.xml and oozie-default.xml
        #[arg(long = "from", value_name = "DIR")]
        from: PathBuf,

        #[command(flatten)]
        fields: ClusterFields,
    },

    /// Edit or rename an existing named cluster
    Edit {
        /// Name of the cluster to edit
        name: String,

        /// Rename the cluster
        #[arg(long, value_name = "NAME")]
        new_name: Option<String>,

        /// Replace another cluster already using the new name
        #[arg(long)]
        overwrite: bool,

        /// Re-import site files from this directory
        #[arg(long = "from", value_name = "DIR")]
        from: Option<PathBuf>,

        #[command(flatten)]
        fields: ClusterFields,
    },

    /// Delete a named cluster and its managed configuration
    Delete {
        /// Name of the cluster to delete
        name: String,
    },

    /// List named clusters
    List,

    /// Show one named cluster
    Show {
        /// Name of the cluster
        name: String,
    },

    /// List available shims (excluding the internal shim)
    Shims,

    /// Run connectivity tests against a named cluster
    Test {
        /// Name of the cluster
        name: String,
    },
}

/// Connection flags shared by create, import and edit.
#[derive(Args, Default)]
pub struct ClusterFields {
    /// JSON file holding a cluster model; flags override its values
    #[arg(long, value_name = "FILE")]
    pub model_file: Option<PathBuf>,

    /// Shim vendor (e.g. Cloudera)
    #[arg(long)]
    pub shim_vendor: Option<String>,

    /// Shim version (e.g. 5.14)
    #[arg(long)]
    pub shim_version: Option<String>,

    #[arg(long)]
    pub hdfs_host: Option<String>,

    #[arg(long)]
    pub hdfs_port: Option<u16>,

    #[arg(long)]
    pub hdfs_username: Option<String>,

    /// HDFS password (prefer the environment variable)
    #[arg(long, env = "HADOOP_CLUSTER_HDFS_PASSWORD", hide_env_values = true)]
    pub hdfs_password: Option<String>,

    #[arg(long)]
    pub job_tracker_host: Option<String>,

    #[arg(long)]
    pub job_tracker_port: Option<u16>,

    /// Comma-separated ZooKeeper quorum hosts
    #[arg(long)]
    pub zookeeper_host: Option<String>,

    #[arg(long)]
    pub zookeeper_port: Option<u16>,

    #[arg(long)]
    pub oozie_url: Option<String>,

    /// Comma-separated Kafka bootstrap servers
    #[arg(long)]
    pub kafka_bootstrap_servers: Option<String>,
}

impl ClusterFields {
    /// Builds a model named `name`, layering flags over `--model-file`.
    pub fn into_model(self, name: String) -> Result<ThinClusterModel> {
        let mut model = match &self.model_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read model file {}", path.display()))?;
                serde_json::from_str::<ThinClusterModel>(&content)
                    .with_context(|| format!("Failed to parse model file {}", path.display()))?
            }
            None => ThinClusterModel::default(),
        };

        model.name = name;
        overlay(&mut model.shim_vendor, self.shim_vendor);
        overlay(&mut model.shim_version, self.shim_version);
        overlay(&mut model.hdfs_host, self.hdfs_host);
        overlay(&mut model.hdfs_port, self.hdfs_port);
        overlay(&mut model.hdfs_username, self.hdfs_username);
        overlay(
            &mut model.hdfs_password,
            self.hdfs_password.map(|p| SecretString::new(p.into())),
        );
        overlay(&mut model.job_tracker_host, self.job_tracker_host);
        overlay(&mut model.job_tracker_port, self.job_tracker_port);
        overlay(&mut model.zoo_keeper_host, self.zookeeper_host);
        overlay(&mut model.zoo_keeper_port, self.zookeeper_port);
        overlay(&mut model.oozie_url, self.oozie_url);
        overlay(&mut model.kafka_bootstrap_servers, self.kafka_bootstrap_servers);
        Ok(model)
    }
}

fn overlay<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}
