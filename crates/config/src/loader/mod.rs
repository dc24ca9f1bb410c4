//! Settings loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `SettingsLoader` for hierarchical settings merging.
//! - Load settings from `.env` files and environment variables.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Reading or writing the named cluster registry (see `hadoop-cluster`).
//!
//! Invariants / Assumptions:
//! - Builder methods applied after `from_env()` take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::SettingsLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
