//! End-to-end tests for the yarnpack CLI
//!
//! These tests verify:
//! - Offline parsing of saved listings
//! - Lockfile rebasing to stdout and in place
//! - Real process invocation against a fake `yarn` on PATH (unix only)

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LISTING: &str = r#"{"value":"@scope/a@npm:1.0.0","children":{"Version":"1.0.0","Dependencies":[{"locator":"b@npm:2.0.0"}]}}
{"value":"b@npm:2.0.0","children":{"Version":"2.0.0"}}
"#;

fn yarnpack(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_yarnpack"));
    cmd.arg("--cwd").arg(cwd).env_remove("RUST_LOG");
    cmd
}

fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

mod parse_tree_tests {
    use super::*;

    #[test]
    fn test_parse_tree_json_from_file() {
        let temp_dir = create_test_dir();
        let input = temp_dir.path().join("listing.jsonl");
        fs::write(&input, LISTING).unwrap();

        let output = yarnpack(temp_dir.path())
            .args(["parse-tree", "--json"])
            .arg(&input)
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["problems"], serde_json::json!([]));
        assert_eq!(json["dependencies"]["@scope/a"]["version"], "1.0.0");
        assert_eq!(
            json["dependencies"]["@scope/a"]["dependencies"]["b"]["version"],
            "2.0.0"
        );
    }

    #[test]
    fn test_parse_tree_text_from_stdin() {
        let temp_dir = create_test_dir();
        yarnpack(temp_dir.path())
            .args(["--quiet", "parse-tree", "-"])
            .write_stdin(format!("garbage line\n{}", LISTING))
            .assert()
            .success()
            .stdout(predicate::str::contains("├── @scope/a 1.0.0"))
            .stdout(predicate::str::contains("3 packages (2 top-level)"));
    }

    #[test]
    fn test_parse_tree_missing_file() {
        let temp_dir = create_test_dir();
        yarnpack(temp_dir.path())
            .args(["parse-tree", "does-not-exist.jsonl"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read"));
    }
}

mod rebase_tests {
    use super::*;

    const LOCKFILE: &str = "\"pkg@file:../local-dep\":\n  version \"1.0.0\"\n";

    #[test]
    fn test_rebase_to_stdout_leaves_file() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("yarn.lock"), LOCKFILE).unwrap();

        yarnpack(temp_dir.path())
            .args(["rebase-lockfile", "packages/svc"])
            .assert()
            .success()
            .stdout("\"pkg@file:packages/svc/../local-dep\":\n  version \"1.0.0\"\n");

        let on_disk = fs::read_to_string(temp_dir.path().join("yarn.lock")).unwrap();
        assert_eq!(on_disk, LOCKFILE);
    }

    #[test]
    fn test_rebase_write_in_place() {
        let temp_dir = create_test_dir();
        let lockfile = temp_dir.path().join("other.lock");
        fs::write(&lockfile, LOCKFILE).unwrap();

        yarnpack(temp_dir.path())
            .args(["rebase-lockfile", "up", "--write", "--lockfile"])
            .arg(&lockfile)
            .assert()
            .success()
            .stderr(predicate::str::contains("rebased"));

        let on_disk = fs::read_to_string(&lockfile).unwrap();
        assert!(on_disk.contains("pkg@file:up/../local-dep"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("yarn.lock"), LOCKFILE).unwrap();
        fs::write(temp_dir.path().join("yarnpack.toml"), "unknown_key = 1\n").unwrap();

        yarnpack(temp_dir.path())
            .args(["rebase-lockfile", "up"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }
}

mod process_tests {
    use super::*;

    #[test]
    fn test_version_without_yarn_fails() {
        let temp_dir = create_test_dir();
        yarnpack(temp_dir.path())
            .arg("version")
            .env("PATH", temp_dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to execute"));
    }

    /// Put an executable `yarn` shell script into `dir`
    #[cfg(unix)]
    fn install_fake_yarn(dir: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("yarn");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    #[cfg(unix)]
    fn path_with(dir: &Path) -> String {
        let system = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", dir.display(), system)
    }

    #[cfg(unix)]
    #[test]
    fn test_deps_recovers_failed_listing() {
        let project = create_test_dir();
        let bin = create_test_dir();
        let listing = project.path().join("listing.jsonl");
        fs::write(&listing, LISTING).unwrap();
        install_fake_yarn(
            bin.path(),
            &format!("cat '{}'\nexit 1", listing.display()),
        );

        let output = yarnpack(project.path())
            .args(["--quiet", "deps", "--json"])
            .env("PATH", path_with(bin.path()))
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["dependencies"]["b"]["version"], "2.0.0");
    }

    #[cfg(unix)]
    #[test]
    fn test_deps_fails_on_stderr() {
        let project = create_test_dir();
        let bin = create_test_dir();
        install_fake_yarn(bin.path(), "echo '{}'\necho 'YN0001: boom' >&2\nexit 1");

        yarnpack(project.path())
            .args(["--quiet", "deps"])
            .env("PATH", path_with(bin.path()))
            .assert()
            .failure()
            .stderr(predicate::str::contains("exit code 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_stops_at_failing_script() {
        let project = create_test_dir();
        let bin = create_test_dir();
        let log = project.path().join("calls.log");
        install_fake_yarn(
            bin.path(),
            &format!(
                "echo \"$2\" >> '{}'\nif [ \"$2\" = b ]; then exit 1; fi",
                log.display()
            ),
        );

        yarnpack(project.path())
            .args(["--quiet", "run", "a", "b", "c"])
            .env("PATH", path_with(bin.path()))
            .assert()
            .failure()
            .stderr(predicate::str::contains("script 'b' failed"));

        assert_eq!(fs::read_to_string(&log).unwrap(), "a\nb\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_install_merges_config_and_flags() {
        let project = create_test_dir();
        let bin = create_test_dir();
        let log = project.path().join("args.log");
        fs::write(
            project.path().join("yarnpack.toml"),
            "network_concurrency = 3\n",
        )
        .unwrap();
        install_fake_yarn(bin.path(), &format!("echo \"$@\" > '{}'", log.display()));

        yarnpack(project.path())
            .args(["--quiet", "install", "--ignore-scripts"])
            .env("PATH", path_with(bin.path()))
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "install --frozen-lockfile --ignore-scripts --network-concurrency 3\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_version_prints_yarn_version() {
        let project = create_test_dir();
        let bin = create_test_dir();
        install_fake_yarn(bin.path(), "echo 4.1.0");

        yarnpack(project.path())
            .arg("version")
            .env("PATH", path_with(bin.path()))
            .assert()
            .success()
            .stdout("4.1.0\n");
    }
}
