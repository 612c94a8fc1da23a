// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end tests for the `evm` binary.
//!
//! Every test runs with `HOME` and the working directory pointed at a
//! temporary directory, and the storage file passed via `--env-file`.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn env_file(&self) -> PathBuf {
        self.path().join("store/env.json")
    }

    fn evm(&self) -> Command {
        let mut cmd = Command::cargo_bin("evm").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env_remove("EVM_ENV_FILE")
            .arg("--env-file")
            .arg(self.env_file());
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.evm().args(args).assert().success();
    }
}

// =============================================================================
// Basic lifecycle
// =============================================================================

#[test]
fn cli_version() {
    Command::cargo_bin("evm")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_set_get_delete() {
    let sandbox = Sandbox::new();

    sandbox
        .evm()
        .args(["set", "API_KEY", "abc123"])
        .assert()
        .success()
        .stdout("Set: API_KEY=abc123\n");

    sandbox
        .evm()
        .args(["get", "API_KEY"])
        .assert()
        .success()
        .stdout("abc123\n");

    sandbox
        .evm()
        .args(["delete", "API_KEY"])
        .assert()
        .success()
        .stdout("Deleted: API_KEY\n");

    sandbox
        .evm()
        .args(["get", "API_KEY"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: environment variable 'API_KEY' not found",
        ));
}

#[test]
fn cli_storage_file_format() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "B", "say \"hi\""]);
    sandbox.run(&["set", "A", "1"]);

    let content = std::fs::read_to_string(sandbox.env_file()).unwrap();
    assert_eq!(content, "{\n  \"B\": \"say \\\"hi\\\"\",\n  \"A\": \"1\"\n}\n");
}

#[test]
fn cli_env_file_from_environment() {
    let sandbox = Sandbox::new();
    let file = sandbox.path().join("from-env.json");

    Command::cargo_bin("evm")
        .unwrap()
        .current_dir(sandbox.path())
        .env("HOME", sandbox.path())
        .env("EVM_ENV_FILE", &file)
        .args(["set", "K", "v"])
        .assert()
        .success();

    assert!(file.exists());
}

#[test]
fn cli_list_and_search() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "DB_URL", "postgres://db"]);
    sandbox.run(&["set", "API", "key"]);

    sandbox
        .evm()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("API    = key"))
        .stdout(predicate::str::contains("DB_URL = postgres://db"))
        .stdout(predicate::str::contains("Total: 2 variables"));

    sandbox
        .evm()
        .args(["search", "POSTGRES", "--value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 matches"));

    sandbox
        .evm()
        .args(["list", "nothing"])
        .assert()
        .success()
        .stdout("No environment variables match 'nothing'\n");
}

#[test]
fn cli_rename_copy_clear() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "OLD", "v"]);

    sandbox
        .evm()
        .args(["rename", "OLD", "NEW"])
        .assert()
        .success()
        .stdout("Renamed: OLD -> NEW\n");
    sandbox
        .evm()
        .args(["copy", "NEW", "OTHER"])
        .assert()
        .success()
        .stdout("Copied: NEW -> OTHER\n");
    sandbox
        .evm()
        .args(["rename", "NEW", "OTHER"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .evm()
        .arg("clear")
        .assert()
        .success()
        .stdout("All environment variables cleared\n");
    sandbox
        .evm()
        .arg("clear")
        .assert()
        .success()
        .stdout("No environment variables to clear\n");
}

// =============================================================================
// Groups
// =============================================================================

#[test]
fn cli_group_commands() {
    let sandbox = Sandbox::new();

    sandbox
        .evm()
        .args(["setg", "prod", "DB_HOST", "db1"])
        .assert()
        .success()
        .stdout("Set: prod:DB_HOST=db1\n");
    sandbox.run(&["set", "SHARED", "s"]);

    sandbox
        .evm()
        .args(["getg", "prod", "DB_HOST"])
        .assert()
        .success()
        .stdout("db1\n");
    sandbox
        .evm()
        .args(["getg", "staging", "SHARED"])
        .assert()
        .success()
        .stdout("s\n");

    sandbox
        .evm()
        .arg("groups")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 groups"));

    sandbox
        .evm()
        .args(["move-group", "SHARED", "prod"])
        .assert()
        .success()
        .stdout("Moved: SHARED -> prod:SHARED\n");

    sandbox
        .evm()
        .args(["delete-group", "prod"])
        .assert()
        .success()
        .stdout("Deleted group 'prod' and all its variables (2 total)\n");
}

#[test]
fn cli_delete_default_group_refused() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "A", "1"]);

    sandbox
        .evm()
        .args(["delete-group", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot delete default namespace"));
}

// =============================================================================
// Transfer
// =============================================================================

#[test]
fn cli_export_default_file_names() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "A", "1"]);

    sandbox
        .evm()
        .args(["export", "--format", "env"])
        .assert()
        .success()
        .stdout("Environment variables exported to: .env\n");
    assert_eq!(
        std::fs::read_to_string(sandbox.path().join(".env")).unwrap(),
        "A=1\n"
    );

    sandbox.run(&["export", "-f", "sh"]);
    let script = std::fs::read_to_string(sandbox.path().join("export.sh")).unwrap();
    assert!(script.starts_with("#!/bin/bash\n\n# EVM Environment Variables Export\n"));
    assert!(script.ends_with("export A=1\n"));
}

#[test]
fn cli_export_empty_selection() {
    let sandbox = Sandbox::new();

    sandbox
        .evm()
        .arg("export")
        .assert()
        .success()
        .stdout("No environment variables to export\n");

    sandbox.run(&["set", "A", "1"]);
    sandbox
        .evm()
        .args(["export", "-g", "prod", "-o", "prod.json"])
        .assert()
        .success()
        .stdout("No environment variables in group 'prod'\n");
    assert!(!sandbox.path().join("prod.json").exists());
}

#[test]
fn cli_load_env_into_group() {
    let sandbox = Sandbox::new();
    std::fs::write(
        sandbox.path().join("dev.env"),
        "# settings\nDB=localhost\nPORT=\"5432\"\n",
    )
    .unwrap();

    sandbox
        .evm()
        .args(["load", "dev.env", "--group", "dev"])
        .assert()
        .success()
        .stdout("Loaded 2 environment variables from dev.env\nVariables added to group 'dev'\n");

    sandbox
        .evm()
        .args(["getg", "dev", "PORT"])
        .assert()
        .success()
        .stdout("5432\n");
}

#[test]
fn cli_load_missing_file() {
    let sandbox = Sandbox::new();
    sandbox
        .evm()
        .args(["load", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn cli_backup_and_restore() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "A", "1"]);
    sandbox.run(&["set", "B", "2"]);

    sandbox
        .evm()
        .args(["backup", "-f", "snap.json"])
        .assert()
        .success()
        .stdout("Backup created: snap.json\n");

    sandbox.run(&["set", "C", "3"]);

    sandbox
        .evm()
        .args(["restore", "snap.json", "--merge"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Merged 2 variables from backup\nBackup timestamp: ",
        ));
    sandbox
        .evm()
        .args(["get", "C"])
        .assert()
        .success()
        .stdout("3\n");

    sandbox
        .evm()
        .args(["restore", "snap.json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Restored 2 variables from backup"));
    sandbox.evm().args(["get", "C"]).assert().failure();
}

#[test]
fn cli_backup_default_path() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "A", "1"]);

    sandbox
        .evm()
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("backup_"));

    let backups: Vec<_> = std::fs::read_dir(sandbox.path().join("store"))
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("backup_"))
        .collect();
    assert_eq!(backups.len(), 1);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn cli_capacity_from_environment() {
    let sandbox = Sandbox::new();
    sandbox
        .evm()
        .env("EVM_STORAGE__MAX_VARS", "1")
        .args(["set", "A", "1"])
        .assert()
        .success();

    sandbox
        .evm()
        .env("EVM_STORAGE__MAX_VARS", "1")
        .args(["set", "B", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "maximum number of variables reached (1)",
        ));
}

#[test]
fn cli_invalid_max_vars_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .evm()
        .args(["--set", "storage.max_vars=0", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_vars"));
}

#[test]
fn cli_options_show_storage_path() {
    let sandbox = Sandbox::new();
    let expected = sandbox.env_file().display().to_string();

    sandbox
        .evm()
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn cli_configs_lists_files() {
    let sandbox = Sandbox::new();
    let config = sandbox.path().join("extra.toml");
    std::fs::write(&config, "[storage]\nmax_vars = 20\n").unwrap();

    sandbox
        .evm()
        .arg("configs")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("[file]"));
}

// =============================================================================
// Exec
// =============================================================================

#[cfg(unix)]
#[test]
fn cli_exec_applies_stored_variables() {
    let sandbox = Sandbox::new();
    sandbox.run(&["set", "EVM_TEST_VALUE", "from-store"]);

    sandbox
        .evm()
        .args(["exec", "--", "sh", "-c", "printf %s \"$EVM_TEST_VALUE\""])
        .assert()
        .success()
        .stdout("from-store");
}

#[cfg(unix)]
#[test]
fn cli_exec_propagates_exit_code() {
    let sandbox = Sandbox::new();
    sandbox
        .evm()
        .args(["exec", "--", "sh", "-c", "exit 3"])
        .assert()
        .code(3);
}

#[test]
fn cli_exec_unknown_command() {
    let sandbox = Sandbox::new();
    sandbox
        .evm()
        .args(["exec", "--", "evm-definitely-missing-binary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("command not found"));
}
