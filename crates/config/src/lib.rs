//! Settings management for the Hadoop cluster manager.
//!
//! This crate provides the settings loader, metastore path helpers and
//! shared constants used by the cluster library and the CLI.

pub mod constants;
mod loader;
pub mod paths;
mod settings;

pub use loader::{ConfigError, SettingsLoader, env_var_or_none};
pub use settings::Settings;
