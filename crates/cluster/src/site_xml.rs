//! Hadoop `*-site.xml` parsing.
//!
//! Responsibilities:
//! - Read `<configuration><property><name/><value/></property>` documents.
//! - Discover connection endpoints (HDFS, resource manager, ZooKeeper, Oozie)
//!   from an imported configuration directory.
//!
//! Does NOT handle:
//! - Variable expansion; values containing `${...}` are ignored.
//! - Final/overridable semantics or `<include>` directives.

use std::collections::HashMap;
use std::path::Path;

use hadoop_cluster_config::constants::{
    DEFAULT_HDFS_PORT, DEFAULT_JOB_TRACKER_PORT, DEFAULT_ZOOKEEPER_PORT,
};
use url::Url;

use crate::error::{ClusterError, Result};

pub const DEFAULT_FS: &str = "fs.defaultFS";
pub const RESOURCE_MANAGER_ADDRESS: &str = "yarn.resourcemanager.address";
pub const RESOURCE_MANAGER_HOSTNAME: &str = "yarn.resourcemanager.hostname";
pub const HIVE_ZOOKEEPER_QUORUM: &str = "hive.zookeeper.quorum";
pub const HIVE_ZOOKEEPER_PORT: &str = "hive.zookeeper.client.port";
pub const OOZIE_BASE_URL: &str = "oozie.base.url";

/// Key/value pairs read from one or more site files.
#[derive(Debug, Clone, Default)]
pub struct SiteConfiguration {
    map: HashMap<String, String>,
}

impl SiteConfiguration {
    /// Reads a single site file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ClusterError::io(path, e))?;
        Self::parse(&content).map_err(|message| ClusterError::SiteXml {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parses site XML from a string.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let tree = roxmltree::Document::parse_with_options(content, options)
            .map_err(|e| e.to_string())?;

        let map = tree
            .root()
            .children()
            .find(|n| n.tag_name().name() == "configuration")
            .into_iter()
            .flat_map(|config| {
                config
                    .children()
                    .filter(|c| c.tag_name().name() == "property")
            })
            .filter_map(|property| {
                let child_text = |tag: &str| {
                    property
                        .children()
                        .find(|n| n.tag_name().name() == tag)
                        .and_then(|n| n.text())
                        .map(str::trim)
                };
                match (child_text("name"), child_text("value")) {
                    (Some(name), Some(value)) if !name.is_empty() => {
                        Some((name.to_string(), value.to_string()))
                    }
                    _ => None,
                }
            })
            .collect();

        Ok(Self { map })
    }

    /// Get a value, returning None if the key is undefined, blank or unexpanded.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty() && !v.contains("${"))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Connection endpoints discovered from imported site files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredEndpoints {
    pub hdfs: Option<(String, u16)>,
    pub job_tracker: Option<(String, u16)>,
    /// Comma-separated ZooKeeper hosts with the shared client port.
    pub zookeeper: Option<(String, u16)>,
    pub oozie_url: Option<String>,
}

impl DiscoveredEndpoints {
    /// Discovers endpoints from the site files in `dir`.
    ///
    /// Missing files are skipped; a file that exists but is not valid XML
    /// is an error.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let load = |file: &str| -> Result<SiteConfiguration> {
            let path = dir.join(file);
            if path.is_file() {
                SiteConfiguration::read(&path)
            } else {
                Ok(SiteConfiguration::default())
            }
        };

        let core = load("core-site.xml")?;
        let yarn = load("yarn-site.xml")?;
        let hive = load("hive-site.xml")?;
        let oozie_site = load("oozie-site.xml")?;
        let oozie_default = load("oozie-default.xml")?;

        Ok(Self {
            hdfs: core.get(DEFAULT_FS).and_then(parse_default_fs),
            job_tracker: yarn
                .get(RESOURCE_MANAGER_ADDRESS)
                .and_then(|v| parse_host_port(v, DEFAULT_JOB_TRACKER_PORT))
                .or_else(|| {
                    yarn.get(RESOURCE_MANAGER_HOSTNAME)
                        .and_then(|v| parse_host_port(v, DEFAULT_JOB_TRACKER_PORT))
                }),
            zookeeper: hive
                .get(HIVE_ZOOKEEPER_QUORUM)
                .and_then(|quorum| parse_quorum(quorum, hive.get(HIVE_ZOOKEEPER_PORT))),
            oozie_url: oozie_site
                .get(OOZIE_BASE_URL)
                .or_else(|| oozie_default.get(OOZIE_BASE_URL))
                .map(str::to_string),
        })
    }
}

/// Parses `fs.defaultFS` (e.g. `hdfs://nn:8020`) into a name node address.
///
/// Schemes without an authority (`file:///`, `maprfs:///`) yield None.
pub fn parse_default_fs(value: &str) -> Option<(String, u16)> {
    let url = Url::parse(value.trim()).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;
    Some((host.to_string(), url.port().unwrap_or(DEFAULT_HDFS_PORT)))
}

/// Parses `host[:port]`, falling back to `default_port`.
///
/// A leading `scheme://` and any trailing path are ignored. IPv6 literals
/// take a port only in brackets (`[::1]:2181`); a bare literal such as
/// `fe80::1` uses `default_port`. Hosts are returned without brackets.
pub fn parse_host_port(value: &str, default_port: u16) -> Option<(String, u16)> {
    let value = value.trim();
    let value = value.split_once("://").map_or(value, |(_, rest)| rest);
    let authority = value.split('/').next().unwrap_or_default();
    if authority.is_empty() {
        return None;
    }

    if let Some(rest) = authority.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        if host.is_empty() {
            return None;
        }
        let port = match tail {
            "" => default_port,
            tail => tail.strip_prefix(':')?.parse().ok()?,
        };
        return Some((host.to_string(), port));
    }

    if authority.matches(':').count() > 1 {
        return Some((authority.to_string(), default_port));
    }
    match authority.split_once(':') {
        Some(("", _)) => None,
        Some((host, port)) => Some((host.to_string(), port.parse().ok()?)),
        None => Some((authority.to_string(), default_port)),
    }
}

fn parse_quorum(quorum: &str, client_port: Option<&str>) -> Option<(String, u16)> {
    let entries: Vec<(String, u16)> = quorum
        .split(',')
        .filter_map(|entry| parse_host_port(entry, DEFAULT_ZOOKEEPER_PORT))
        .collect();
    let (_, first_port) = entries.first()?;

    let port = client_port
        .and_then(|p| p.parse().ok())
        .unwrap_or(*first_port);
    let hosts = entries
        .iter()
        .map(|(host, _)| host.as_str())
        .collect::<Vec<_>>()
        .join(",");
    Some((hosts, port))
}
