//! hadoop-cluster - command-line manager for named Hadoop cluster configurations.
//!
//! Responsibilities:
//! - Parse command-line arguments and resolve settings (flags > env > defaults).
//! - Run named cluster operations via the shared `hadoop-cluster` library.
//! - Map outcomes onto structured exit codes.
//!
//! Does NOT handle:
//! - Cluster business rules or persistence (see `crates/cluster`).
//!
//! Invariants:
//! - `load_dotenv()` runs BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - Logs go to STDERR; STDOUT carries only command output.

mod args;
mod cancellation;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod progress;

use std::time::Duration;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use hadoop_cluster_config::{ConfigError, Settings, SettingsLoader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn build_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut loader = SettingsLoader::new().from_env()?;

    if let Some(home) = &cli.home {
        loader = loader.with_home_dir(home.clone());
    }
    if let Some(id) = &cli.internal_shim {
        loader = loader.with_internal_shim_id(id.clone());
    }
    if let Some(path) = &cli.shims_file {
        loader = loader.with_shims_file(path.clone());
    }
    if let Some(secs) = cli.probe_timeout {
        loader = loader.with_probe_timeout(Duration::from_secs(secs));
    }
    if cli.no_keyring {
        loader = loader.with_use_keyring(false);
    }

    loader.build()
}

#[tokio::main]
async fn main() {
    if let Err(e) = SettingsLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match build_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to resolve settings: {}", e);
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };
    tracing::debug!(
        metastore = %settings.metastore_root.display(),
        internal_shim = %settings.internal_shim_id,
        "Resolved settings"
    );

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, &settings, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
