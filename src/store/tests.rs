// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::backend::MemBackend;
use super::{DEFAULT_MAX_VARS, Store};
use crate::error::ErrorKind;

fn store_with(backend: &MemBackend) -> Store {
    let mut store = Store::new(backend.clone(), DEFAULT_MAX_VARS);
    store.load().unwrap();
    store
}

fn keys(store: &Store) -> Vec<&str> {
    store.records().iter().map(super::Record::key).collect()
}

#[test]
fn test_missing_storage_is_empty() {
    let backend = MemBackend::new();
    let store = store_with(&backend);
    assert!(store.is_empty());
    assert!(backend.content().is_none(), "load must not write");
}

#[test]
fn test_set_get_delete_lifecycle() {
    let backend = MemBackend::new();
    let mut store = store_with(&backend);

    store.set("API_KEY", "abc123").unwrap();
    assert_eq!(store.get("API_KEY").unwrap(), "abc123");

    store.delete("API_KEY").unwrap();
    let err = store.get("API_KEY").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(backend.content().unwrap(), "{\n}\n");
}

#[test]
fn test_set_persists_every_mutation() {
    let backend = MemBackend::new();
    let mut store = store_with(&backend);

    store.set("B", "2").unwrap();
    store.set("A", "1").unwrap();

    // Plain save keeps insertion order
    insta::assert_snapshot!(backend.content().unwrap(), @r#"
    {
      "B": "2",
      "A": "1"
    }
    "#);

    let reloaded = store_with(&backend);
    assert_eq!(keys(&reloaded), ["B", "A"]);
}

#[test]
fn test_set_existing_key_keeps_count() {
    let backend = MemBackend::new();
    let mut store = store_with(&backend);

    store.set("A", "1").unwrap();
    store.set("B", "2").unwrap();
    store.set("A", "3").unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(keys(&store), ["A", "B"]);
    assert_eq!(store.get("A").unwrap(), "3");
}

#[test]
fn test_empty_key_rejected() {
    let mut store = store_with(&MemBackend::new());
    let err = store.set("", "value").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert!(store.is_empty());
}

#[test]
fn test_empty_value_allowed() {
    let mut store = store_with(&MemBackend::new());
    store.set("EMPTY", "").unwrap();
    assert_eq!(store.get("EMPTY").unwrap(), "");
}

#[test]
fn test_delete_absent_does_not_touch_storage() {
    let backend = MemBackend::with_content("{\n  \"A\": \"1\"\n}\n");
    let mut store = store_with(&backend);

    let err = store.delete("MISSING").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.len(), 1);
    assert_eq!(backend.content().unwrap(), "{\n  \"A\": \"1\"\n}\n");
}

#[test]
fn test_delete_preserves_order() {
    let mut store = store_with(&MemBackend::new());
    for key in ["C", "A", "D", "B"] {
        store.set(key, "x").unwrap();
    }

    store.delete("A").unwrap();

    assert_eq!(keys(&store), ["C", "D", "B"]);
    // Index still resolves every remaining key after the shift
    for key in ["C", "D", "B"] {
        assert!(store.exists(key));
    }
    store.set("B", "updated").unwrap();
    assert_eq!(store.len(), 3);
}

#[test]
fn test_rename() {
    let mut store = store_with(&MemBackend::new());
    store.set("OLD", "v").unwrap();
    store.set("OTHER", "o").unwrap();

    store.rename("OLD", "NEW").unwrap();
    assert_eq!(keys(&store), ["NEW", "OTHER"]);
    assert_eq!(store.get("NEW").unwrap(), "v");
    assert!(!store.exists("OLD"));

    assert_eq!(
        store.rename("NEW", "OTHER").unwrap_err().kind(),
        ErrorKind::AlreadyExists
    );
    assert_eq!(
        store.rename("MISSING", "X").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        store.rename("NEW", "").unwrap_err().kind(),
        ErrorKind::EmptyInput
    );
}

#[test]
fn test_self_rename_is_noop() {
    let backend = MemBackend::with_content("{\n  \"A\": \"1\"\n}");
    let mut store = store_with(&backend);

    store.rename("A", "A").unwrap();

    assert_eq!(store.get("A").unwrap(), "1");
    // No save happened, so the original (unterminated newline) text is intact
    assert_eq!(backend.content().unwrap(), "{\n  \"A\": \"1\"\n}");
}

#[test]
fn test_copy_overwrites_destination() {
    let mut store = store_with(&MemBackend::new());
    store.set("SRC", "value").unwrap();
    store.set("DST", "old").unwrap();

    store.copy("SRC", "DST").unwrap();
    store.copy("SRC", "NEW").unwrap();

    assert_eq!(store.get("DST").unwrap(), "value");
    assert_eq!(store.get("NEW").unwrap(), "value");
    assert_eq!(
        store.copy("MISSING", "X").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_clear() {
    let backend = MemBackend::new();
    let mut store = store_with(&backend);
    store.set("A", "1").unwrap();

    store.clear().unwrap();

    assert!(store.is_empty());
    assert!(!store.exists("A"));
    assert!(store_with(&backend).is_empty());
}

#[test]
fn test_capacity_boundary() {
    let mut store = Store::new(MemBackend::new(), 3);
    for key in ["A", "B", "C"] {
        store.set(key, "x").unwrap();
    }

    let err = store.set("D", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
    assert_eq!(store.len(), 3);

    // Updating an existing key is still allowed at capacity
    store.set("A", "y").unwrap();
    assert_eq!(store.get("A").unwrap(), "y");
}

#[test]
fn test_load_over_capacity_keeps_everything() {
    let backend = MemBackend::with_content(r#"{"A": "1", "B": "2", "C": "3"}"#);
    let mut store = Store::new(backend, 2);
    store.load().unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(
        store.set("D", "4").unwrap_err().kind(),
        ErrorKind::CapacityExceeded
    );
}

#[test]
fn test_load_malformed_recovers_entries() {
    let backend = MemBackend::with_content("{\n  \"A\": \"1\",\n  \"B\": broken,\n  \"C\": \"3\"");
    let store = store_with(&backend);
    assert_eq!(keys(&store), ["A", "C"]);
}

#[test]
fn test_control_characters_reload_cleanly() {
    let backend = MemBackend::new();
    let mut store = store_with(&backend);
    store.set("ESC", "a\u{1b}b").unwrap();

    let saved = backend.content().unwrap();
    assert!(super::codec::check_strict(&saved).is_ok(), "{saved:?}");

    let reloaded = store_with(&backend);
    assert_eq!(reloaded.get("ESC").unwrap(), "a\u{1b}b");
}

#[test]
fn test_load_not_object_is_empty() {
    let store = store_with(&MemBackend::with_content("this is not json"));
    assert!(store.is_empty());
}

#[test]
fn test_load_duplicate_keys_last_wins() {
    let store = store_with(&MemBackend::with_content(r#"{"A": "1", "B": "2", "A": "3"}"#));
    assert_eq!(keys(&store), ["A", "B"]);
    assert_eq!(store.get("A").unwrap(), "3");
}

#[test]
fn test_failed_save_is_reported() {
    let backend = MemBackend::new();
    let mut store = store_with(&backend);
    backend.set_simulate_write_error(true);

    let err = store.set("A", "1").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(backend.content().is_none());
}

#[test]
fn test_sorted_is_bytewise() {
    let mut store = store_with(&MemBackend::new());
    for key in ["b", "B", "a:x", "A", "_"] {
        store.set(key, "v").unwrap();
    }
    let sorted: Vec<_> = store.sorted().into_iter().map(super::Record::key).collect();
    assert_eq!(sorted, ["A", "B", "_", "a:x", "b"]);
}

#[test]
fn test_open_file_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join(".evm/env.json");

    let mut store = Store::open(&path, DEFAULT_MAX_VARS).unwrap();
    store.set("QUOTED", "say \"hi\"\n").unwrap();

    let reopened = Store::open(&path, DEFAULT_MAX_VARS).unwrap();
    assert_eq!(reopened.get("QUOTED").unwrap(), "say \"hi\"\n");
    assert_eq!(reopened.location(), path);
}

#[cfg(unix)]
#[test]
fn test_open_unreadable_file_is_error() {
    let temp = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as text
    let path = temp.path().join("env.json");
    std::fs::create_dir(&path).unwrap();

    let err = Store::open(&path, DEFAULT_MAX_VARS).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
