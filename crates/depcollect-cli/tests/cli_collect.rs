use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn depcollect_cmd() -> Command {
    let mut cmd = Command::cargo_bin("depcollect").unwrap();
    for var in [
        "DEPCOLLECT_SOURCE",
        "DEPCOLLECT_DEST",
        "DEPCOLLECT_ROOT",
        "DEPCOLLECT_CONFIG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write_manifest(root: &Path, name: &str, deps: &[&str]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let deps: Vec<String> = deps.iter().map(|d| format!(r#""{d}": "^1.0.0""#)).collect();
    fs::write(
        dir.join("package.json"),
        format!(r#"{{"name": "{name}", "dependencies": {{{}}}}}"#, deps.join(", ")),
    )
    .unwrap();
}

/// app -> {libA, libB}, libA -> {libC}, libB -> {libC}; libC's manifest is malformed.
fn diamond(tmp: &TempDir) -> (String, String) {
    let src = tmp.path().join("node_modules");
    write_manifest(&src, "app", &["libA", "libB"]);
    write_manifest(&src, "libA", &["libC"]);
    write_manifest(&src, "libB", &["libC"]);
    fs::create_dir_all(src.join("libC")).unwrap();
    fs::write(src.join("libC").join("package.json"), "{ broken").unwrap();
    let dest = tmp.path().join("out").join("node_modules");
    (
        src.to_string_lossy().into_owned(),
        dest.to_string_lossy().into_owned(),
    )
}

#[test]
fn test_collect_diamond_reports_four_packages() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app"])
        .assert()
        .success()
        .stdout("app-runtime: 4 packages collected\n");

    for name in ["app", "libA", "libB", "libC"] {
        assert!(Path::new(&dest).join(name).join("package.json").is_file());
    }
}

#[test]
fn test_collect_custom_label() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app", "--label", "prisma-runtime"])
        .assert()
        .success()
        .stdout("prisma-runtime: 4 packages collected\n");
}

#[test]
fn test_collect_cycle_terminates() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("nm");
    write_manifest(&src, "x", &["y"]);
    write_manifest(&src, "y", &["x"]);
    let dest = tmp.path().join("out");

    depcollect_cmd()
        .arg(&src)
        .arg(&dest)
        .args(["--root", "x"])
        .assert()
        .success()
        .stdout("x-runtime: 2 packages collected\n");
}

#[test]
fn test_collect_default_root_is_prisma() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("nm");
    write_manifest(&src, "prisma", &["@prisma/engines"]);
    write_manifest(&src, "@prisma/engines", &["@prisma/debug"]);
    write_manifest(&src, "@prisma/debug", &[]);
    let dest = tmp.path().join("out");

    depcollect_cmd()
        .arg(&src)
        .arg(&dest)
        .assert()
        .success()
        .stdout("prisma-runtime: 3 packages collected\n");

    assert!(dest.join("@prisma").join("engines").join("package.json").is_file());
    assert!(dest.join("@prisma").join("debug").is_dir());
}

#[test]
fn test_collect_missing_package_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("nm");
    write_manifest(&src, "app", &["ghost"]);

    depcollect_cmd()
        .arg(&src)
        .arg(tmp.path().join("out"))
        .args(["--root", "app"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("packages collected").not())
        .stderr(predicate::str::contains("Failed to copy package 'ghost'"));
}

#[test]
fn test_collect_twice_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    for _ in 0..2 {
        depcollect_cmd()
            .args([src.as_str(), dest.as_str(), "--root", "app", "-j", "2"])
            .assert()
            .success();
    }
    let entries = fs::read_dir(&dest).unwrap().count();
    assert_eq!(entries, 4);
    assert!(!Path::new(&dest).join("app").join("app").exists());
}

#[test]
fn test_dry_run_copies_nothing() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app", "--dry-run"])
        .assert()
        .success()
        .stdout("app-runtime: 4 packages collected\n")
        .stderr(predicate::str::contains("Would copy").and(predicate::str::contains("libC")));

    assert!(!Path::new(&dest).exists());
}

#[test]
fn test_config_file_supplies_defaults() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);
    let config = tmp.path().join("depcollect.toml");
    fs::write(
        &config,
        format!("source = {src:?}\ndest = {dest:?}\nroot = \"libA\"\nlabel = \"from-config\"\n"),
    )
    .unwrap();

    depcollect_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("from-config: 2 packages collected\n");

    depcollect_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--root", "app", "--dry-run"])
        .assert()
        .success()
        .stdout("from-config: 4 packages collected\n");
}

#[test]
fn test_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("depcollect.toml");
    fs::write(&config, "jobs = \"many\"\n").unwrap();

    depcollect_cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_env_supplies_root() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .env("DEPCOLLECT_ROOT", "libB")
        .args([src.as_str(), dest.as_str(), "--dry-run"])
        .assert()
        .success()
        .stdout("libB-runtime: 2 packages collected\n");
}

#[test]
fn test_tree_output() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app", "--tree"])
        .assert()
        .success()
        .stdout("app\n├── libA\n│   └── libC\n└── libB\n    └── libC\n");

    assert!(!Path::new(&dest).exists());
}

#[test]
fn test_why_shows_chain() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app", "--why", "libC"])
        .assert()
        .success()
        .stdout("Path to libC:\napp\n  libA\n    libC\n");
}

#[test]
fn test_why_unknown_package_fails() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app", "--why", "left-pad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not part of the app closure"));
}

#[test]
fn test_config_huge_job_count_still_copies() {
    let tmp = TempDir::new().unwrap();
    let (src, dest) = diamond(&tmp);
    let config = tmp.path().join("depcollect.toml");
    fs::write(&config, "jobs = 9223372036854775807\n").unwrap();

    depcollect_cmd()
        .args([src.as_str(), dest.as_str(), "--root", "app", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout("app-runtime: 4 packages collected\n");

    assert!(Path::new(&dest).join("libC").is_dir());
}
