//! Shim identifiers and the sources that enumerate them.
//!
//! Responsibilities:
//! - Define the immutable `{id, vendor, version}` triple.
//! - Enumerate identifiers from the built-in catalog or a JSON catalog file.
//! - Resolve a vendor/version pair from a form model to a shim id.
//!
//! Does NOT handle:
//! - Loading vendor shim code; identifiers are descriptive only.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Identifies a supported Hadoop distribution adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShimIdentifier {
    id: String,
    vendor: String,
    version: String,
}

impl ShimIdentifier {
    pub fn new(id: impl Into<String>, vendor: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vendor: vendor.into(),
            version: version.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn matches(&self, vendor: &str, version: &str) -> bool {
        self.vendor.eq_ignore_ascii_case(vendor.trim()) && self.version == version.trim()
    }
}

/// Source of the shim identifiers available to the manager.
pub trait ShimSource {
    fn shim_identifiers(&self) -> Vec<ShimIdentifier>;
}

/// An in-memory list of shim identifiers.
#[derive(Debug, Clone, Default)]
pub struct StaticShimSource {
    shims: Vec<ShimIdentifier>,
}

impl StaticShimSource {
    pub fn new(shims: Vec<ShimIdentifier>) -> Self {
        Self { shims }
    }

    /// The catalog of distributions known out of the box.
    pub fn builtin() -> Self {
        Self::new(vec![
            ShimIdentifier::new("apache", "apache", "3.1"),
            ShimIdentifier::new("cdh514", "Cloudera", "5.14"),
            ShimIdentifier::new("hdp30", "Hortonworks", "3.0"),
            ShimIdentifier::new("mapr60", "MapR", "6.0"),
            ShimIdentifier::new("emr521", "Amazon", "5.21"),
        ])
    }
}

impl ShimSource for StaticShimSource {
    fn shim_identifiers(&self) -> Vec<ShimIdentifier> {
        self.shims.clone()
    }
}

/// Shim identifiers read once from a JSON array of `{id, vendor, version}`.
#[derive(Debug, Clone)]
pub struct CatalogFileShimSource {
    path: PathBuf,
    shims: Vec<ShimIdentifier>,
}

impl CatalogFileShimSource {
    /// Loads the catalog at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON array of shims.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read shim catalog {}", path.display()))?;
        let shims: Vec<ShimIdentifier> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse shim catalog {}", path.display()))?;

        tracing::debug!(path = %path.display(), count = shims.len(), "Loaded shim catalog");

        Ok(Self {
            path: path.to_path_buf(),
            shims,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShimSource for CatalogFileShimSource {
    fn shim_identifiers(&self) -> Vec<ShimIdentifier> {
        self.shims.clone()
    }
}

impl<T: ShimSource + ?Sized> ShimSource for Box<T> {
    fn shim_identifiers(&self) -> Vec<ShimIdentifier> {
        (**self).shim_identifiers()
    }
}

/// The shim whose vendor (case-insensitive) and version match exactly.
pub fn find_shim<'a>(
    shims: &'a [ShimIdentifier],
    vendor: &str,
    version: &str,
) -> Option<&'a ShimIdentifier> {
    shims.iter().find(|s| s.matches(vendor, version))
}

/// Picks the shim id for a model's vendor/version selection.
///
/// Order of preference: an exact vendor (case-insensitive) and version
/// match; the first identifier that is not the internal shim; the internal
/// shim itself.
pub fn resolve_shim_id(
    shims: &[ShimIdentifier],
    vendor: Option<&str>,
    version: Option<&str>,
    internal_shim_id: &str,
) -> String {
    if let (Some(vendor), Some(version)) = (vendor, version)
        && let Some(shim) = find_shim(shims, vendor, version)
    {
        return shim.id.clone();
    }

    shims
        .iter()
        .find(|s| s.id != internal_shim_id)
        .map(|s| s.id.clone())
        .unwrap_or_else(|| internal_shim_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn shims() -> Vec<ShimIdentifier> {
        vec![
            ShimIdentifier::new("cdh514", "Cloudera", "5.14"),
            ShimIdentifier::new("apache", "apache", "3.1"),
            ShimIdentifier::new("mapr46", "MapR", "4.6"),
        ]
    }

    #[test]
    fn test_resolve_exact_match_ignores_vendor_case() {
        let id = resolve_shim_id(&shims(), Some("mapr"), Some("4.6"), "apache");
        assert_eq!(id, "mapr46");
    }

    #[test]
    fn test_resolve_falls_back_to_first_user_facing_shim() {
        // Misspelled vendor, as a UI might submit.
        let id = resolve_shim_id(&shims(), Some("Claudera"), Some("5.14"), "apache");
        assert_eq!(id, "cdh514");

        let id = resolve_shim_id(&shims(), None, None, "cdh514");
        assert_eq!(id, "apache");
    }

    #[test]
    fn test_find_shim_requires_exact_pair() {
        assert_eq!(find_shim(&shims(), "cloudera", " 5.14 ").map(ShimIdentifier::id), Some("cdh514"));
        assert!(find_shim(&shims(), "Cloudera", "4.6").is_none());
    }

    #[test]
    fn test_resolve_with_only_internal_shim() {
        let only_internal = vec![ShimIdentifier::new("apache", "apache", "3.1")];
        assert_eq!(resolve_shim_id(&only_internal, None, None, "apache"), "apache");
        assert_eq!(resolve_shim_id(&[], None, None, "apache"), "apache");
    }

    #[test]
    fn test_catalog_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"hdp30","vendor":"Hortonworks","version":"3.0"}}]"#
        )
        .unwrap();

        let source = CatalogFileShimSource::load(file.path()).unwrap();
        let ids = source.shim_identifiers();
        assert_eq!(ids, vec![ShimIdentifier::new("hdp30", "Hortonworks", "3.0")]);
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_catalog_file_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = CatalogFileShimSource::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse shim catalog"));
    }

    #[test]
    fn test_builtin_catalog_contains_internal_shim() {
        let builtin = StaticShimSource::builtin().shim_identifiers();
        assert!(builtin.iter().any(|s| s.id() == "apache"));
        assert!(builtin.len() > 1);
    }
}
