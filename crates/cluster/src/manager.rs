//! Named cluster manager.
//!
//! Responsibilities:
//! - Create, import, edit and delete named clusters with soft-fail results.
//! - Copy imported site files into `<metastore>/NamedCluster/Configs/<name>/`.
//! - Enumerate user-facing shims and run connectivity tests.
//!
//! Does NOT handle:
//! - Registry persistence format (see `registry`).
//! - Probing endpoints itself (see `testing`).
//!
//! Invariants:
//! - Business-rule and filesystem failures never escape the soft-fail
//!   operations; they yield `ClusterResult::failed()` and are logged.
//! - A failed import or edit leaves the managed directories as they were.
//! - Editing a shim selection only ever assigns an exactly matching shim.
//! - Shim listings exclude exactly the internal shim id.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hadoop_cluster_config::Settings;
use hadoop_cluster_config::paths::cluster_config_dir;

use crate::credentials::KeyringStore;
use crate::error::{ClusterError, Result};
use crate::import::{ConfigDirChange, present_site_files, validate_import_source};
use crate::model::{ClusterResult, ThinClusterModel};
use crate::named_cluster::{NamedCluster, validate_cluster_name};
use crate::registry::{FileRegistry, NamedClusterRegistry};
use crate::shim::{
    CatalogFileShimSource, ShimIdentifier, ShimSource, StaticShimSource, find_shim, resolve_shim_id,
};
use crate::site_xml::DiscoveredEndpoints;
use crate::testing::{ProgressSink, TestCategory, TestRunner};

/// Manager backed by the file registry and a boxed shim source.
pub type DefaultClusterManager =
    HadoopClusterManager<FileRegistry, Box<dyn ShimSource + Send + Sync>>;

/// Orchestrates named cluster operations over a registry and a shim source.
pub struct HadoopClusterManager<R, S> {
    registry: R,
    shims: S,
    metastore_root: PathBuf,
    internal_shim_id: String,
    runner: TestRunner,
}

impl DefaultClusterManager {
    /// Builds a manager from resolved settings.
    ///
    /// # Errors
    /// Returns an error if the configured shim catalog cannot be loaded.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut registry = FileRegistry::open(settings.registry_path())?;
        if settings.use_keyring {
            registry = registry.with_credential_store(Box::new(KeyringStore));
        }
        let shims: Box<dyn ShimSource + Send + Sync> = match &settings.shims_file {
            Some(path) => Box::new(CatalogFileShimSource::load(path)?),
            None => Box::new(StaticShimSource::builtin()),
        };

        Ok(Self::new(
            registry,
            shims,
            settings.metastore_root.clone(),
            settings.internal_shim_id.clone(),
            settings.probe_timeout,
        ))
    }
}

impl<R, S> HadoopClusterManager<R, S>
where
    R: NamedClusterRegistry,
    S: ShimSource,
{
    pub fn new(
        registry: R,
        shims: S,
        metastore_root: PathBuf,
        internal_shim_id: impl Into<String>,
        probe_timeout: Duration,
    ) -> Self {
        let runner = TestRunner::with_default_probes(shims.shim_identifiers(), probe_timeout);
        Self {
            registry,
            shims,
            metastore_root,
            internal_shim_id: internal_shim_id.into(),
            runner,
        }
    }

    /// Replaces the connectivity test runner.
    pub fn with_test_runner(mut self, runner: TestRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Managed configuration directory for `name`.
    pub fn cluster_config_dir(&self, name: &str) -> PathBuf {
        cluster_config_dir(&self.metastore_root, name)
    }

    pub fn create_named_cluster(&mut self, model: &ThinClusterModel) -> ClusterResult {
        soft_fail("create", self.try_create_named_cluster(model))
    }

    /// Registers a new cluster built from the registry template.
    pub fn try_create_named_cluster(&mut self, model: &ThinClusterModel) -> Result<String> {
        let name = self.validate_new_name(&model.name)?;
        let cluster = self.build_cluster(&name, model);
        self.register(cluster)
    }

    pub fn import_named_cluster(&mut self, model: &ThinClusterModel) -> ClusterResult {
        soft_fail("import", self.try_import_named_cluster(model))
    }

    /// Registers a new cluster whose site files are copied from `model.import_path`.
    ///
    /// Connection fields the model leaves empty are filled from the imported files.
    pub fn try_import_named_cluster(&mut self, model: &ThinClusterModel) -> Result<String> {
        let name = self.validate_new_name(&model.name)?;
        let source = import_source(model).ok_or(ClusterError::ImportPathRequired)?;
        validate_import_source(source)?;

        let dest = self.cluster_config_dir(&name);
        let mut change = ConfigDirChange::new();
        let result = change.import(source, &dest).and_then(|copied| {
            let mut cluster = self.build_cluster(&name, model);
            cluster.config_files = copied;
            fill_from_site_files(&mut cluster, &dest);
            self.register(cluster)
        });
        finish(change, result)
    }

    pub fn edit_named_cluster(&mut self, model: &ThinClusterModel, overwrite: bool) -> ClusterResult {
        soft_fail("edit", self.try_edit_named_cluster(model, overwrite))
    }

    /// Renames and reconfigures the cluster named `model.old_name`.
    ///
    /// An empty `old_name` edits `model.name` in place. Without `overwrite`,
    /// renaming onto another registered cluster fails.
    pub fn try_edit_named_cluster(&mut self, model: &ThinClusterModel, overwrite: bool) -> Result<String> {
        let new_name = validate_cluster_name(&model.name)?.to_string();
        let old_name = match model.old_name.trim() {
            "" => new_name.clone(),
            old => old.to_string(),
        };

        let mut cluster = self
            .registry
            .get(&old_name)
            .ok_or_else(|| ClusterError::NotFound(old_name.clone()))?;

        let renamed = old_name != new_name;
        if renamed && !overwrite && self.registry.contains(&new_name) {
            return Err(ClusterError::DuplicateName(new_name));
        }

        let source = import_source(model);
        if let Some(source) = source {
            validate_import_source(source)?;
        }
        if let Some(shim_id) = self.requested_shim(&cluster, model)? {
            cluster.shim_identifier = shim_id;
        }

        let mut change = ConfigDirChange::new();
        let result = self.stage_edit(&mut change, cluster, &old_name, new_name, source, model);
        finish(change, result)
    }

    pub fn delete_named_cluster(&mut self, name: &str) -> ClusterResult {
        soft_fail("delete", self.try_delete_named_cluster(name))
    }

    /// Removes the cluster and its managed configuration directory.
    pub fn try_delete_named_cluster(&mut self, name: &str) -> Result<String> {
        let name = validate_cluster_name(name)?.to_string();
        if !self.registry.contains(&name) {
            return Err(ClusterError::NotFound(name));
        }
        self.registry.delete(&name).map_err(ClusterError::Registry)?;

        let dir = self.cluster_config_dir(&name);
        if dir.exists() {
            std::fs::remove_dir_all(&dir).map_err(|e| ClusterError::io(&dir, e))?;
        }
        Ok(name)
    }

    pub fn get_named_cluster(&self, name: &str) -> Option<NamedCluster> {
        self.registry.get(name.trim())
    }

    pub fn list_named_clusters(&self) -> Vec<NamedCluster> {
        self.registry.list()
    }

    /// Available shims minus the internal shim.
    pub fn get_shim_identifiers(&self) -> Vec<ShimIdentifier> {
        self.shims
            .shim_identifiers()
            .into_iter()
            .filter(|shim| shim.id() != self.internal_shim_id)
            .collect()
    }

    /// Runs the connectivity tests for `cluster_name`.
    ///
    /// Returns the six categories in fixed order, or an empty vector when the
    /// cluster is not registered.
    pub async fn run_tests(
        &self,
        sink: Option<&dyn ProgressSink>,
        cluster_name: &str,
    ) -> Vec<TestCategory> {
        match self.registry.get(cluster_name.trim()) {
            Some(cluster) => self.runner.run(&cluster, sink).await,
            None => {
                tracing::warn!(cluster = %cluster_name, "Cannot run tests for unknown named cluster");
                Vec::new()
            }
        }
    }

    fn validate_new_name(&self, name: &str) -> Result<String> {
        let name = validate_cluster_name(name)?;
        if self.registry.contains(name) {
            return Err(ClusterError::DuplicateName(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn build_cluster(&self, name: &str, model: &ThinClusterModel) -> NamedCluster {
        let mut cluster = self.registry.template();
        cluster.name = name.to_string();
        cluster.shim_identifier = self.resolve_shim(model);
        cluster.apply_model(model);
        cluster
    }

    fn resolve_shim(&self, model: &ThinClusterModel) -> String {
        resolve_shim_id(
            &self.shims.shim_identifiers(),
            model.shim_vendor.as_deref(),
            model.shim_version.as_deref(),
            &self.internal_shim_id,
        )
    }

    /// The shim an edit selects, if the model names a vendor or version.
    ///
    /// A missing half of the pair is taken from the cluster's current shim.
    fn requested_shim(&self, cluster: &NamedCluster, model: &ThinClusterModel) -> Result<Option<String>> {
        let requested = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let (vendor, version) = (requested(&model.shim_vendor), requested(&model.shim_version));
        if vendor.is_none() && version.is_none() {
            return Ok(None);
        }

        let shims = self.shims.shim_identifiers();
        let current = shims.iter().find(|s| s.id() == cluster.shim_identifier);
        let vendor = vendor
            .or_else(|| current.map(|s| s.vendor().to_string()))
            .unwrap_or_default();
        let version = version
            .or_else(|| current.map(|s| s.version().to_string()))
            .unwrap_or_default();

        match find_shim(&shims, &vendor, &version) {
            Some(shim) => Ok(Some(shim.id().to_string())),
            None => Err(ClusterError::UnknownShim { vendor, version }),
        }
    }

    /// Applies an edit's directory changes and saves the result under `new_name`.
    fn stage_edit(
        &mut self,
        change: &mut ConfigDirChange,
        mut cluster: NamedCluster,
        old_name: &str,
        new_name: String,
        source: Option<&Path>,
        model: &ThinClusterModel,
    ) -> Result<String> {
        let new_dir = self.cluster_config_dir(&new_name);
        if old_name != new_name {
            change.set_aside(&new_dir)?;
            change.move_dir(&self.cluster_config_dir(old_name), &new_dir)?;
        }
        if let Some(source) = source {
            change.import(source, &new_dir)?;
            fill_from_site_files(&mut cluster, &new_dir);
        }

        cluster.name = new_name;
        cluster.apply_model(model);
        cluster.config_files = present_site_files(&new_dir);
        cluster.touch();

        let name = cluster.name.clone();
        self.registry
            .replace(old_name, cluster)
            .map_err(ClusterError::Registry)?;
        Ok(name)
    }

    fn register(&mut self, mut cluster: NamedCluster) -> Result<String> {
        cluster.touch();
        let name = cluster.name.clone();
        self.registry.save(cluster).map_err(ClusterError::Registry)?;
        Ok(name)
    }
}

fn import_source(model: &ThinClusterModel) -> Option<&Path> {
    model
        .import_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Path::new)
}

/// Fills connection fields that are still empty from the site files in `dir`.
fn fill_from_site_files(cluster: &mut NamedCluster, dir: &Path) {
    let endpoints = match DiscoveredEndpoints::from_dir(dir) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Could not read imported site files");
            return;
        }
    };

    if cluster.hdfs_host.is_none()
        && let Some((host, port)) = endpoints.hdfs
    {
        cluster.hdfs_host = Some(host);
        cluster.hdfs_port.get_or_insert(port);
    }
    if cluster.job_tracker_host.is_none()
        && let Some((host, port)) = endpoints.job_tracker
    {
        cluster.job_tracker_host = Some(host);
        cluster.job_tracker_port.get_or_insert(port);
    }
    if cluster.zookeeper_host.is_none()
        && let Some((hosts, port)) = endpoints.zookeeper
    {
        cluster.zookeeper_host = Some(hosts);
        cluster.zookeeper_port.get_or_insert(port);
    }
    if cluster.oozie_url.is_none() {
        cluster.oozie_url = endpoints.oozie_url;
    }
}

/// Commits the directory changes of a successful operation, rolls them back otherwise.
fn finish(change: ConfigDirChange, result: Result<String>) -> Result<String> {
    match &result {
        Ok(_) => change.commit(),
        Err(_) => change.rollback(),
    }
    result
}

fn soft_fail(operation: &'static str, result: Result<String>) -> ClusterResult {
    match result {
        Ok(name) => {
            tracing::info!(operation, cluster = %name, "Named cluster operation succeeded");
            ClusterResult::success(name)
        }
        Err(e) => {
            tracing::warn!(
                operation,
                validation = e.is_validation(),
                error = %e,
                "Named cluster operation failed"
            );
            ClusterResult::failed()
        }
    }
}
