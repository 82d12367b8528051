use std::fs;
use std::path::PathBuf;

use depcollect_core::config::CollectConfig;
use tempfile::TempDir;

#[test]
fn test_empty_config_is_default() {
    let config = CollectConfig::from_str("").unwrap();
    assert_eq!(config, CollectConfig::default());
}

#[test]
fn test_full_config() {
    let config = CollectConfig::from_str(
        r#"
source = "/srv/app/node_modules"
dest = "/out/node_modules"
root = "@scope/cli"
label = "cli-runtime"
manifest = "package.json"
jobs = 4
"#,
    )
    .unwrap();
    assert_eq!(config.source, Some(PathBuf::from("/srv/app/node_modules")));
    assert_eq!(config.dest, Some(PathBuf::from("/out/node_modules")));
    assert_eq!(config.root.as_deref(), Some("@scope/cli"));
    assert_eq!(config.label.as_deref(), Some("cli-runtime"));
    assert_eq!(config.jobs, Some(4));
}

#[test]
fn test_unknown_key_rejected() {
    assert!(CollectConfig::from_str("destination = \"/x\"").is_err());
}

#[test]
fn test_zero_jobs_rejected() {
    let err = CollectConfig::from_str("jobs = 0").unwrap_err();
    assert!(err.contains("jobs"), "got: {err}");
}

#[test]
fn test_from_path_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let err = CollectConfig::from_path(&tmp.path().join("depcollect.toml")).unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}

#[test]
fn test_from_path_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("depcollect.toml");
    fs::write(&path, "root = \"typescript\"\n").unwrap();
    let config = CollectConfig::from_path(&path).unwrap();
    assert_eq!(config.root.as_deref(), Some("typescript"));
}
