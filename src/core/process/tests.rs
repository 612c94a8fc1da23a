// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::ProcessBuilder;
use crate::core::env::{container::Env, current_env};
use crate::error::ProcessError;

fn path_only() -> Env {
    let mut env = Env::new();
    if let Some(path) = current_env().get("PATH") {
        env.set("PATH", path);
    }
    env
}

#[test]
fn test_resolve_found_in_env_path() {
    // cargo should always be available since we're running tests with cargo
    assert!(ProcessBuilder::resolve("cargo", current_env()).is_ok());
}

#[test]
fn test_resolve_not_found() {
    let err = ProcessBuilder::resolve("evm-definitely-not-a-real-program", current_env()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"command not found: 'evm-definitely-not-a-real-program'");
}

#[test]
fn test_resolve_uses_env_path() {
    let mut env = Env::new();
    env.set("PATH", "");

    let err = ProcessBuilder::resolve("cargo", env).unwrap_err();
    assert!(matches!(err, ProcessError::ExecutableNotFound { ref name } if name == "cargo"));
}

#[cfg(unix)]
#[test]
fn test_status_sees_only_given_env() {
    let mut env = path_only();
    env.set("EVM_TEST_VAR", "test_value");

    let code = ProcessBuilder::resolve("sh", env)
        .unwrap()
        .args([
            "-c",
            r#"[ "$EVM_TEST_VAR" = test_value ] && [ -z "${HOME+x}" ] && exit 7"#,
        ])
        .status()
        .unwrap();

    assert_eq!(code, 7);
}

#[cfg(unix)]
#[test]
fn test_status_passes_args_in_order() {
    let code = ProcessBuilder::resolve("sh", path_only())
        .unwrap()
        .args(["-c", r#"[ "$0-$1" = "a-b" ] && exit 4"#, "a", "b"])
        .status()
        .unwrap();

    assert_eq!(code, 4);
}

#[test]
fn test_status_spawn_failure() {
    let err = ProcessBuilder::new("/nonexistent/evm/tool").status().unwrap_err();
    assert!(matches!(err, ProcessError::SpawnFailed { .. }));
}
