//! Integration tests for settings loading as used by the CLI entrypoint.
//!
//! These tests verify the precedence chain:
//! builder overrides > environment variables > defaults

use hadoop_cluster_config::{ConfigError, SettingsLoader, env_var_or_none};
use serial_test::serial;
use std::path::PathBuf;
use std::time::Duration;

#[test]
#[serial]
fn test_env_values_are_applied() {
    temp_env::with_vars(
        [
            ("HADOOP_CLUSTER_HOME", Some("/srv/users/etl")),
            ("HADOOP_CLUSTER_INTERNAL_SHIM", Some("hdp30")),
            ("HADOOP_CLUSTER_SHIMS_FILE", Some("/etc/shims.json")),
            ("HADOOP_CLUSTER_PROBE_TIMEOUT", Some("3")),
        ],
        || {
            let settings = SettingsLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(settings.home_dir, PathBuf::from("/srv/users/etl"));
            assert_eq!(settings.internal_shim_id, "hdp30");
            assert_eq!(settings.shims_file, Some(PathBuf::from("/etc/shims.json")));
            assert_eq!(settings.probe_timeout, Duration::from_secs(3));
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    temp_env::with_vars(
        [
            ("HADOOP_CLUSTER_HOME", Some("/srv/users/etl")),
            ("HADOOP_CLUSTER_INTERNAL_SHIM", Some("hdp30")),
        ],
        || {
            let settings = SettingsLoader::new()
                .from_env()
                .unwrap()
                .with_home_dir(PathBuf::from("/tmp/override"))
                .with_internal_shim_id("apache".to_string())
                .build()
                .unwrap();
            assert_eq!(settings.home_dir, PathBuf::from("/tmp/override"));
            assert_eq!(settings.internal_shim_id, "apache");
        },
    );
}

#[test]
#[serial]
fn test_blank_env_values_are_ignored() {
    temp_env::with_vars(
        [
            ("HADOOP_CLUSTER_HOME", Some("/srv/users/etl")),
            ("HADOOP_CLUSTER_INTERNAL_SHIM", Some("   ")),
            ("HADOOP_CLUSTER_PROBE_TIMEOUT", Some("")),
        ],
        || {
            assert!(env_var_or_none("HADOOP_CLUSTER_INTERNAL_SHIM").is_none());
            let settings = SettingsLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(settings.internal_shim_id, "apache");
            assert_eq!(settings.probe_timeout, Duration::from_secs(10));
        },
    );
}

#[test]
#[serial]
fn test_out_of_range_env_timeout_fails_build() {
    temp_env::with_vars(
        [
            ("HADOOP_CLUSTER_HOME", Some("/srv/users/etl")),
            ("HADOOP_CLUSTER_PROBE_TIMEOUT", Some("0")),
        ],
        || {
            let result = SettingsLoader::new().from_env().unwrap().build();
            assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
        },
    );
}

#[test]
fn test_settings_derive_cluster_paths() {
    let settings = SettingsLoader::new()
        .with_home_dir(PathBuf::from("/home/alice"))
        .build()
        .unwrap();

    assert_eq!(
        settings.cluster_config_dir("ncTest"),
        PathBuf::from("/home/alice/.pentaho/metastore/pentaho/NamedCluster/Configs/ncTest")
    );
    assert_eq!(
        settings.registry_path(),
        PathBuf::from("/home/alice/.pentaho/metastore/pentaho/NamedCluster/clusters.json")
    );
}

#[test]
#[serial]
fn test_load_dotenv_respects_disable_flag() {
    temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
        assert!(SettingsLoader::new().load_dotenv().is_ok());
    });
}
