// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::current_env;
use crate::core::env::container::Env;

#[test]
fn test_env_basic_operations() {
    let mut env = Env::new();
    env.set("FOO", "bar");

    assert_eq!(env.get("FOO"), Some("bar"));
    assert_eq!(env.get("NOTEXIST"), None);

    env.set("FOO", "baz");
    assert_eq!(env.iter().collect::<Vec<_>>(), [("FOO", "baz")]);
}

#[cfg(windows)]
#[test]
fn test_env_case_insensitive_on_windows() {
    let mut env = Env::new();
    env.set("Path", "C:\\Windows");
    env.set("PATH", "C:\\Tools");

    assert_eq!(env.get("path"), Some("C:\\Tools"));
    assert_eq!(env.iter().collect::<Vec<_>>(), [("PATH", "C:\\Tools")]);
}

#[cfg(not(windows))]
#[test]
fn test_env_case_sensitive_elsewhere() {
    let mut env = Env::new();
    env.set("Path", "/a");
    env.set("PATH", "/b");

    assert_eq!(env.iter().count(), 2);
    assert_eq!(env.get("Path"), Some("/a"));
    assert_eq!(env.get("PATH"), Some("/b"));
}

#[test]
fn test_overlay_stored_values_win() {
    let mut env = Env::new();
    env.set("HOME", "/home/user").set("API_KEY", "old");

    let skipped = env.overlay([("API_KEY", "abc123"), ("prod:DB_HOST", "db1")]);

    assert!(skipped.is_empty());
    assert_eq!(
        env.iter().collect::<Vec<_>>(),
        [
            ("API_KEY", "abc123"),
            ("HOME", "/home/user"),
            ("prod:DB_HOST", "db1")
        ]
    );
}

#[test]
fn test_overlay_skips_unrepresentable() {
    let mut env = Env::new();

    let skipped = env.overlay([
        ("", "empty"),
        ("A=B", "equals"),
        ("NUL\0KEY", "nul"),
        ("NUL_VALUE", "a\0b"),
        ("GOOD", "ok"),
    ]);

    assert_eq!(skipped, ["", "A=B", "NUL\0KEY", "NUL_VALUE"]);
    assert_eq!(env.iter().collect::<Vec<_>>(), [("GOOD", "ok")]);
}

#[test]
fn test_current_env_captures_process() {
    let env = current_env();
    // PATH exists in every test runner environment we support
    assert!(env.get("PATH").is_some());
}
