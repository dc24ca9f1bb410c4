//! Shim listing command.

use anyhow::Result;
use hadoop_cluster::DefaultClusterManager;

use super::{emit, formatter_for};
use crate::formatters::ShimView;

pub fn run(manager: &DefaultClusterManager, output: &str) -> Result<()> {
    let formatter = formatter_for(output)?;
    let shims: Vec<ShimView> = manager
        .get_shim_identifiers()
        .iter()
        .map(ShimView::from)
        .collect();
    emit(&formatter.format_shims(&shims)?);
    Ok(())
}
