//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the cluster manager from resolved settings.
//! - Route parsed CLI arguments to the command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Settings resolution (see `main`).

use anyhow::{Context, Result};
use hadoop_cluster::DefaultClusterManager;
use hadoop_cluster_config::Settings;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;

pub(crate) async fn run_command(
    cli: Cli,
    settings: &Settings,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut manager = DefaultClusterManager::from_settings(settings).with_context(|| {
        format!(
            "Failed to open named cluster registry under {}",
            settings.metastore_root.display()
        )
    })?;

    match cli.command {
        Commands::Create { name, fields } => {
            commands::clusters::create(&mut manager, name, fields, &cli.output)?;
        }
        Commands::Import { name, from, fields } => {
            commands::clusters::import(&mut manager, name, from, fields, &cli.output, cli.quiet)?;
        }
        Commands::Edit {
            name,
            new_name,
            overwrite,
            from,
            fields,
        } => {
            commands::clusters::edit(
                &mut manager,
                name,
                new_name,
                overwrite,
                from,
                fields,
                &cli.output,
            )?;
        }
        Commands::Delete { name } => {
            commands::clusters::delete(&mut manager, &name, &cli.output)?;
        }
        Commands::List => {
            commands::clusters::list(&manager, &cli.output)?;
        }
        Commands::Show { name } => {
            commands::clusters::show(&manager, &name, &cli.output)?;
        }
        Commands::Shims => {
            commands::shims::run(&manager, &cli.output)?;
        }
        Commands::Test { name } => {
            commands::test::run(&manager, &name, &cli.output, cli.quiet, cancel).await?;
        }
    }

    Ok(())
}
