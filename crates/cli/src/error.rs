//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClusterError` and `ConfigError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use hadoop_cluster::ClusterError;
use hadoop_cluster_config::ConfigError;
use thiserror::Error;

use crate::cancellation::SIGINT_EXIT_CODE;

/// Structured exit codes for hadoop-cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Named cluster not found.
    NotFound = 4,

    /// Validation error - bad name, duplicate name, incomplete import source, bad settings.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// At least one connectivity test category failed.
    TestsFailed = 6,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = SIGINT_EXIT_CODE,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClusterError> for ExitCode {
    fn from(err: &ClusterError) -> Self {
        match err {
            ClusterError::NotFound(_) => ExitCode::NotFound,
            e if e.is_validation() => ExitCode::ValidationError,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::HomeDirUnavailable => ExitCode::GeneralError,
            _ => ExitCode::ValidationError,
        }
    }
}

/// Returned by `test` when one or more categories failed.
#[derive(Debug, Error)]
#[error("{failed} of {total} test categories failed for '{cluster}'")]
pub struct TestsFailed {
    pub cluster: String,
    pub failed: usize,
    pub total: usize,
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<ClusterError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(err);
            }
            if cause.is::<TestsFailed>() {
                return ExitCode::TestsFailed;
            }
        }
        ExitCode::GeneralError
    }
}
