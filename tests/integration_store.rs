// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the variable store against real files.

use std::collections::BTreeMap;
use std::path::Path;

use evm_rs::error::ErrorKind;
use evm_rs::store::codec::{decode, encode};
use evm_rs::store::transfer::{ExportFormat, ImportOptions};
use evm_rs::store::{DEFAULT_MAX_VARS, Group, Store, split_key};

fn open(path: &Path) -> Store {
    Store::open(path, DEFAULT_MAX_VARS).unwrap()
}

fn snapshot(store: &Store) -> BTreeMap<String, String> {
    store
        .records()
        .iter()
        .map(|r| (r.key().to_string(), r.value().to_string()))
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn store_codec_round_trip_with_escapes() {
    let pairs = [
        ("QUOTE", "say \"hi\""),
        ("BACKSLASH", r"C:\Users\evm"),
        ("CONTROL", "line1\nline2\r\n\tindented"),
        ("prod:URL", "https://example.com/?a=1&b=2"),
        ("EMPTY", ""),
    ];

    let doc = decode(&encode(pairs));

    let decoded: BTreeMap<&str, &str> = doc
        .entries()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(decoded, pairs.into_iter().collect::<BTreeMap<_, _>>());
}

#[test]
fn store_group_partition_reconstructs_keys() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = open(&temp.path().join("env.json"));
    for key in ["PLAIN", "prod:DB", "a:b:c", "default:LITERAL"] {
        store.set(key, "v").unwrap();
    }

    for record in store.records() {
        let (group, name) = split_key(record.key());
        assert_eq!(group.compose(name), record.key());
    }
    assert_eq!(Group::parse("default").compose("X"), "X");
}

#[test]
fn store_persists_across_reopen() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nested/dir/env.json");

    let mut store = open(&path);
    store.set("A", "1").unwrap();
    store.set_grouped("prod", "B", "2").unwrap();
    store.set("A", "3").unwrap();

    let reopened = open(&path);
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.get("A").unwrap(), "3");
    assert_eq!(reopened.get("prod:B").unwrap(), "2");
}

#[test]
fn store_delete_absent_leaves_file_untouched() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("env.json");
    let mut store = open(&path);
    store.set("A", "1").unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = store.delete("MISSING").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn store_recovers_from_corrupt_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("env.json");
    std::fs::write(&path, "{\n  \"A\": \"1\",\n  \"B\": \"unterminated\n").unwrap();

    let mut store = open(&path);
    assert_eq!(store.get("A").unwrap(), "1");

    // The next save rewrites a clean document
    store.set("C", "3").unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(evm_rs::store::codec::check_strict(&text).is_ok(), "{text}");
}

#[test]
fn store_reads_utf16_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("env.json");
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "{\"GREETING\": \"héllo\"}".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    std::fs::write(&path, bytes).unwrap();

    assert_eq!(open(&path).get("GREETING").unwrap(), "héllo");
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn store_export_import_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let mut source = open(&temp.path().join("source.json"));
    source.set("A", "1").unwrap();
    source.set("prod:B", "two words").unwrap();
    source.set("C", "x=y").unwrap();

    let export = temp.path().join("out.env");
    assert_eq!(source.export_to(&export, ExportFormat::Env, None).unwrap(), 3);

    let mut target = open(&temp.path().join("target.json"));
    target.set("STALE", "s").unwrap();
    let options = ImportOptions::builder().replace(true).build();
    let report = target.import_file(&export, &options).unwrap();

    assert_eq!(report.loaded, 3);
    assert_eq!(snapshot(&target), snapshot(&source));
}

#[test]
fn store_json_export_import_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let mut source = open(&temp.path().join("source.json"));
    source.set("QUOTED", "say \"hi\"\n").unwrap();
    source.set("dev:PATH", r"C:\bin").unwrap();

    let export = temp.path().join("env-export.json");
    source.export_to(&export, ExportFormat::Json, None).unwrap();

    let mut target = open(&temp.path().join("target.json"));
    target.import_file(&export, &ImportOptions::default()).unwrap();
    assert_eq!(snapshot(&target), snapshot(&source));
}

#[test]
fn store_backup_restore_merge() {
    let temp = tempfile::tempdir().unwrap();
    let mut store = open(&temp.path().join("env.json"));
    store.set("A", "1").unwrap();
    store.set("B", "2").unwrap();

    let backup = temp.path().join("backup.json");
    assert_eq!(store.backup_to(&backup).unwrap(), 2);

    store.set("C", "3").unwrap();
    let report = store.restore_file(&backup, true).unwrap();

    assert_eq!(report.restored, 2);
    assert!(report.timestamp.is_some_and(|t| t != "unknown"));
    assert_eq!(
        snapshot(&store),
        BTreeMap::from([
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string()),
            ("C".to_string(), "3".to_string()),
        ])
    );
}

#[test]
fn store_load_backup_file_with_group() {
    let temp = tempfile::tempdir().unwrap();
    let mut source = open(&temp.path().join("source.json"));
    source.set("TOKEN", "t").unwrap();
    let backup = temp.path().join("snap.backup");
    source.backup_to(&backup).unwrap();

    let mut target = open(&temp.path().join("target.json"));
    let options = ImportOptions::builder().group("ci".to_string()).build();
    let report = target.import_file(&backup, &options).unwrap();

    assert!(report.backup_timestamp.is_some());
    assert_eq!(target.get("ci:TOKEN").unwrap(), "t");
}
