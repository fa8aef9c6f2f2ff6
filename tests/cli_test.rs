// tests/cli_test.rs
mod common;

use common::merged_feature_repo;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const INPUT_VARS: &[&str] = &[
    "GITHUB_SHA",
    "GITHUB_OUTPUT",
    "INPUT_REPO_DIR",
    "INPUT_BUMP",
    "INPUT_BASE_VERSION",
    "INPUT_PREFIX",
    "INPUT_PRERELEASE_ID",
    "INPUT_FORCE_PRERELEASE",
    "INPUT_BRANCH_NAME",
    "INPUT_DEBUG",
    "RUST_LOG",
];

/// Runs the binary in `cwd` with an isolated home, so the global git config
/// it registers the repository in is a throwaway one.
fn run(cwd: &Path, home: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_merge-semver"));
    command
        .args(args)
        .current_dir(cwd)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    for key in INPUT_VARS {
        command.env_remove(key);
    }
    command.envs(envs.iter().copied());

    command.output().expect("Failed to execute merge-semver")
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), home.path(), &["--help"], &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("merge-semver"));
    assert!(stdout.contains("--force-prerelease"));
}

#[test]
fn test_invalid_bump_exits_with_config_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), home.path(), &["--bump", "huge"], &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid bump value: huge"));
}

#[test]
fn test_missing_repository_is_not_a_repository() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing");
    let output = run(
        home.path(),
        home.path(),
        &["-C", missing.to_str().unwrap()],
        &[],
    );

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("current folder is not a git repository"));
    assert!(!stderr.contains("failed to make safe"));
}

#[test]
fn test_generates_tag_for_merged_feature() {
    let home = TempDir::new().unwrap();
    let (dir, _repo, _) = merged_feature_repo();
    let outputs = home.path().join("github_output");

    let output = run(
        dir.path(),
        home.path(),
        &["--prerelease-id", "alpha"],
        &[
            ("INPUT_FORCE_PRERELEASE", "true"),
            ("GITHUB_OUTPUT", outputs.to_str().unwrap()),
        ],
    );

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "semver_tag=v0.3.0-alpha.1\n\
         is_prerelease=true\n\
         previous_tag=v0.2.0-alpha.1\n\
         ancestor_tag=v0.2.0-alpha.1\n"
    );
    assert_eq!(fs::read_to_string(&outputs).unwrap(), stdout);

    let gitconfig = fs::read_to_string(home.path().join(".gitconfig")).unwrap();
    assert!(gitconfig.contains("safe"));
}

#[test]
fn test_config_file_and_json_output() {
    let home = TempDir::new().unwrap();
    let (dir, _repo, _) = merged_feature_repo();
    fs::write(
        dir.path().join("merge-semver.toml"),
        "prerelease_id = \"alpha\"\nbump = \"major\"\n",
    )
    .unwrap();

    let output = run(dir.path(), home.path(), &["--json"], &[]);

    assert!(output.status.success(), "{:?}", output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["semver_tag"], "v1.0.0");
    assert_eq!(value["is_prerelease"], false);
    assert_eq!(value["ancestor_tag"], "v0.1.0");
}

#[test]
fn test_debug_logs_configuration_lookup() {
    let home = TempDir::new().unwrap();
    let (dir, _repo, _) = merged_feature_repo();
    fs::write(dir.path().join("merge-semver.toml"), "prerelease_id = \"alpha\"\n").unwrap();

    let output = run(dir.path(), home.path(), &[], &[("INPUT_DEBUG", "true")]);

    assert!(output.status.success(), "{:?}", output);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("loaded configuration file"));
}
