//! Named cluster commands: create, import, edit, delete, list, show.
//!
//! Responsibilities:
//! - Build a `ThinClusterModel` from parsed flags and run the manager operation.
//! - Print the `{"namedCluster": ...}` result or the requested listing.
//!
//! Does NOT handle:
//! - Validation or filesystem work (see `hadoop_cluster::manager`).
//!
//! Invariants:
//! - Failures surface as `ClusterError` inside the anyhow chain so the exit
//!   code reflects the failure kind.

use std::path::PathBuf;

use anyhow::{Context, Result};
use hadoop_cluster::{ClusterError, ClusterResult, DefaultClusterManager};
use tracing::info;

use super::{emit, formatter_for};
use crate::args::ClusterFields;
use crate::formatters::ClusterView;
use crate::progress::Spinner;

pub fn create(
    manager: &mut DefaultClusterManager,
    name: String,
    fields: ClusterFields,
    output: &str,
) -> Result<()> {
    let formatter = formatter_for(output)?;
    let model = fields.into_model(name)?;
    let created = manager
        .try_create_named_cluster(&model)
        .context("Failed to create named cluster")?;

    info!(cluster = %created, "Created named cluster");
    emit(&formatter.format_result(&ClusterResult::success(created))?);
    Ok(())
}

pub fn import(
    manager: &mut DefaultClusterManager,
    name: String,
    from: PathBuf,
    fields: ClusterFields,
    output: &str,
    quiet: bool,
) -> Result<()> {
    let formatter = formatter_for(output)?;
    let mut model = fields.into_model(name)?;
    model.import_path = Some(from.display().to_string());

    let spinner = Spinner::new(!quiet, format!("Importing site files from {}", from.display()));
    let imported = manager
        .try_import_named_cluster(&model)
        .context("Failed to import named cluster")?;
    spinner.finish();

    info!(cluster = %imported, source = %from.display(), "Imported named cluster");
    emit(&formatter.format_result(&ClusterResult::success(imported))?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn edit(
    manager: &mut DefaultClusterManager,
    name: String,
    new_name: Option<String>,
    overwrite: bool,
    from: Option<PathBuf>,
    fields: ClusterFields,
    output: &str,
) -> Result<()> {
    let formatter = formatter_for(output)?;
    let mut model = fields.into_model(new_name.unwrap_or_else(|| name.clone()))?;
    model.old_name = name;
    model.import_path = from.map(|p| p.display().to_string());

    let edited = manager
        .try_edit_named_cluster(&model, overwrite)
        .context("Failed to edit named cluster")?;

    info!(cluster = %edited, "Edited named cluster");
    emit(&formatter.format_result(&ClusterResult::success(edited))?);
    Ok(())
}

pub fn delete(manager: &mut DefaultClusterManager, name: &str, output: &str) -> Result<()> {
    let formatter = formatter_for(output)?;
    let deleted = manager
        .try_delete_named_cluster(name)
        .context("Failed to delete named cluster")?;

    info!(cluster = %deleted, "Deleted named cluster");
    emit(&formatter.format_result(&ClusterResult::success(deleted))?);
    Ok(())
}

pub fn list(manager: &DefaultClusterManager, output: &str) -> Result<()> {
    let formatter = formatter_for(output)?;
    let views: Vec<ClusterView> = manager
        .list_named_clusters()
        .iter()
        .map(ClusterView::from)
        .collect();
    emit(&formatter.format_clusters(&views)?);
    Ok(())
}

pub fn show(manager: &DefaultClusterManager, name: &str, output: &str) -> Result<()> {
    let formatter = formatter_for(output)?;
    let cluster = manager
        .get_named_cluster(name)
        .ok_or_else(|| ClusterError::NotFound(name.to_string()))?;
    emit(&formatter.format_cluster(&ClusterView::from(&cluster))?);
    Ok(())
}
