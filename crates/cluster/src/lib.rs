//! Hadoop named cluster management.
//!
//! This crate imports, creates and edits named Hadoop cluster definitions,
//! copies site configuration files into a managed metastore directory,
//! enumerates distribution shims and runs connectivity tests against a
//! cluster's endpoints.

pub mod credentials;
pub mod error;
pub mod import;
pub mod manager;
pub mod model;
pub mod named_cluster;
pub mod registry;
mod secret;
pub mod shim;
pub mod site_xml;
pub mod testing;

pub use credentials::{CredentialStore, KeyringStore, MemoryCredentialStore, SecureValue};
pub use error::{ClusterError, Result};
pub use manager::{DefaultClusterManager, HadoopClusterManager};
pub use model::{ClusterResult, ThinClusterModel};
pub use named_cluster::{NamedCluster, validate_cluster_name};
pub use registry::{FileRegistry, MemoryRegistry, NamedClusterRegistry};
pub use shim::{CatalogFileShimSource, ShimIdentifier, ShimSource, StaticShimSource};
pub use testing::{
    ProgressSink, RuntimeTestStatus, TestCategory, TestCategoryKind, TestResult, TestRunner,
    TestStatus,
};
