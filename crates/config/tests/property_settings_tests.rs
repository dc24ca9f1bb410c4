//! Property-based tests for settings validation and metastore paths.
//!
//! # Test Coverage
//! - Probe timeouts inside `1..=MAX_PROBE_TIMEOUT_SECS` are accepted verbatim
//! - Timeouts above the maximum are rejected
//! - Cluster configuration directories always sit under `NamedCluster/Configs`

use std::path::PathBuf;
use std::time::Duration;

use hadoop_cluster_config::constants::{CONFIGS_DIR, MAX_PROBE_TIMEOUT_SECS, NAMED_CLUSTER_DIR};
use hadoop_cluster_config::{ConfigError, SettingsLoader};
use proptest::prelude::*;

fn loader() -> SettingsLoader {
    SettingsLoader::new().with_home_dir(PathBuf::from("/home/etl"))
}

proptest! {
    #[test]
    fn timeouts_in_range_are_accepted(secs in 1..=MAX_PROBE_TIMEOUT_SECS) {
        let settings = loader()
            .with_probe_timeout(Duration::from_secs(secs))
            .build()
            .unwrap();
        prop_assert_eq!(settings.probe_timeout, Duration::from_secs(secs));
    }

    #[test]
    fn timeouts_above_max_are_rejected(secs in (MAX_PROBE_TIMEOUT_SECS + 1)..100_000u64) {
        let result = loader().with_probe_timeout(Duration::from_secs(secs)).build();
        prop_assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })), "expected InvalidTimeout, got {:?}", result);
    }

    #[test]
    fn cluster_config_dir_is_nested(name in "[A-Za-z0-9_-]{1,20}") {
        let settings = loader().build().unwrap();
        let dir = settings.cluster_config_dir(&name);
        prop_assert!(dir.starts_with(settings.metastore_root.join(NAMED_CLUSTER_DIR).join(CONFIGS_DIR)));
        prop_assert_eq!(dir.file_name().and_then(|n| n.to_str()), Some(name.as_str()));
    }
}
