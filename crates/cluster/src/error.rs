//! Error types for named cluster operations.
//!
//! The manager's public operations soft-fail (see `ClusterResult`); these
//! errors are what the `try_*` counterparts return and what the soft-fail
//! wrappers log before discarding.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cluster operations.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors that can occur while creating, importing or editing named clusters.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// The cluster name is empty or cannot be used as a directory name.
    #[error("Invalid cluster name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Another cluster is already registered under this name.
    #[error("Named cluster '{0}' already exists")]
    DuplicateName(String),

    /// No cluster is registered under this name.
    #[error("Named cluster '{0}' not found")]
    NotFound(String),

    /// No shim matches the requested vendor and version.
    #[error("No shim matches vendor '{vendor}' version '{version}'")]
    UnknownShim { vendor: String, version: String },

    /// Import was requested without a source directory.
    #[error("Import path is required")]
    ImportPathRequired,

    /// The import source directory does not exist.
    #[error("Import source {} does not exist or is not a directory", .0.display())]
    ImportSourceMissing(PathBuf),

    /// A required site file is absent from the import source.
    #[error("Import source {} is missing required file {file}", .dir.display())]
    MissingConfigFile { dir: PathBuf, file: &'static str },

    /// Filesystem failure while copying or moving site files.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A site file could not be parsed as Hadoop configuration XML.
    #[error("Failed to parse {}: {message}", .path.display())]
    SiteXml { path: PathBuf, message: String },

    /// The registry failed to persist a change.
    #[error("Registry error: {0:#}")]
    Registry(#[source] anyhow::Error),
}

impl ClusterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for business-rule failures (bad or colliding name, missing input).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName { .. }
                | Self::DuplicateName(_)
                | Self::UnknownShim { .. }
                | Self::ImportPathRequired
                | Self::ImportSourceMissing(_)
                | Self::MissingConfigFile { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(ClusterError::DuplicateName("a".to_string()).is_validation());
        assert!(
            ClusterError::MissingConfigFile {
                dir: PathBuf::from("/tmp"),
                file: "core-site.xml",
            }
            .is_validation()
        );
        assert!(!ClusterError::NotFound("a".to_string()).is_validation());
        assert!(
            !ClusterError::io("/tmp/x", std::io::Error::other("disk full")).is_validation()
        );
    }

    #[test]
    fn test_missing_file_message_names_file() {
        let err = ClusterError::MissingConfigFile {
            dir: PathBuf::from("/data/conf"),
            file: "yarn-site.xml",
        };
        let message = err.to_string();
        assert!(message.contains("/data/conf"));
        assert!(message.contains("yarn-site.xml"));
    }
}
