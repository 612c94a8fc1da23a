// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Variable store engine.
//!
//! ```text
//!            Store
//!   records: Vec<Record>        insertion order (file order)
//!   index:   HashMap<key, pos>  uniqueness + O(1) lookup
//!   backend: StorageBackend     FileBackend / MemBackend
//!   max_vars                    soft capacity
//!       |
//!   +---+--------+---------+----------+
//!   |            |         |          |
//! codec        group     query     transfer
//! encode/      setg/     list/     import/export
//! decode       getg/..   search    backup/restore
//! ```
//!
//! Every public mutation persists the whole store before returning. Bulk
//! operations mutate through [`Store::insert`] and save once at the end.

pub mod backend;
pub mod codec;
pub mod group;
pub mod query;
pub mod transfer;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{EvmResult, StoreError};
use backend::{FileBackend, StorageBackend};

pub use group::{DEFAULT_GROUP, Group, split_key};

/// Default soft capacity of a store.
pub const DEFAULT_MAX_VARS: usize = 10_000;

/// A stored variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Group this record belongs to.
    #[must_use]
    pub fn group(&self) -> Group<'_> {
        split_key(&self.key).0
    }

    /// Key without its group prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        split_key(&self.key).1
    }

    /// Name shown inside a group listing. Raw `default:` keys keep their
    /// prefix so they stay apart from the bare key of the same name.
    #[must_use]
    pub fn label(&self) -> &str {
        match split_key(&self.key) {
            (Group::Named(DEFAULT_GROUP), _) => &self.key,
            (_, name) => name,
        }
    }
}

/// The unique-keyed collection of records and its storage location.
#[derive(Debug)]
pub struct Store {
    records: Vec<Record>,
    index: HashMap<String, usize>,
    backend: Box<dyn StorageBackend>,
    max_vars: usize,
}

impl Store {
    /// Creates an empty store over `backend` without reading it.
    pub fn new(backend: impl StorageBackend + 'static, max_vars: usize) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            backend: Box::new(backend),
            max_vars,
        }
    }

    /// Opens the store file at `path`.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub fn open(path: impl AsRef<Path>, max_vars: usize) -> EvmResult<Self> {
        let mut store = Self::new(FileBackend::new(path.as_ref()), max_vars);
        store.load()?;
        Ok(store)
    }

    /// Replaces the in-memory records with the backend's content.
    ///
    /// Malformed content is recovered entry by entry. Content over capacity
    /// is kept in full.
    ///
    /// # Errors
    ///
    /// Returns an error if existing content cannot be read.
    pub fn load(&mut self) -> EvmResult<()> {
        self.records.clear();
        self.index.clear();

        let Some(text) = self.backend.read()? else {
            tracing::debug!(path = %self.location().display(), "no storage file yet, starting empty");
            return Ok(());
        };

        let doc = codec::decode(&text);
        if !text.trim().is_empty()
            && let Err(e) = codec::check_strict(&text)
        {
            tracing::warn!(
                path = %self.location().display(),
                "storage file is malformed ({e}), recovered {} entries",
                doc.entries().len()
            );
        }
        if !doc.objects().is_empty() || doc.skipped() > 0 {
            tracing::warn!(
                path = %self.location().display(),
                ignored = doc.objects().len() + doc.skipped(),
                "ignoring non-string members in storage file"
            );
        }

        for (key, value) in doc.entries() {
            if key.is_empty() {
                tracing::warn!("ignoring entry with empty key in storage file");
                continue;
            }
            self.upsert(key, value.clone());
        }

        if self.records.len() > self.max_vars {
            tracing::warn!(
                count = self.records.len(),
                max = self.max_vars,
                "store holds more variables than the configured maximum"
            );
        }

        tracing::debug!(
            path = %self.location().display(),
            count = self.records.len(),
            "store loaded"
        );
        Ok(())
    }

    /// Persists every record, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn save(&self) -> EvmResult<()> {
        let text = codec::encode(self.records.iter().map(|r| (r.key(), r.value())));
        self.backend.write(&text)?;
        tracing::debug!(
            path = %self.location().display(),
            count = self.records.len(),
            "store saved"
        );
        Ok(())
    }

    /// Sets `key` to `value`, then saves.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty key, `CapacityExceeded` when adding
    /// a new key to a full store, or the save error.
    pub fn set(&mut self, key: &str, value: &str) -> EvmResult<()> {
        self.insert(key, value)?;
        self.save()
    }

    /// Returns the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has that exact key.
    pub fn get(&self, key: &str) -> EvmResult<&str> {
        self.index
            .get(key)
            .map(|&i| self.records[i].value())
            .ok_or_else(|| not_found(key))
    }

    /// Removes `key`, then saves. Other records keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or the save error.
    pub fn delete(&mut self, key: &str) -> EvmResult<()> {
        let pos = self.index.remove(key).ok_or_else(|| not_found(key))?;
        self.records.remove(pos);
        self.reindex_from(pos);
        self.save()
    }

    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Renames `old` to `new` in place, keeping its value, then saves.
    ///
    /// Renaming a key to itself succeeds without touching storage.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `old` is absent, `EmptyInput` for an empty
    /// `new`, `AlreadyExists` if `new` is another record, or the save error.
    pub fn rename(&mut self, old: &str, new: &str) -> EvmResult<()> {
        let pos = *self.index.get(old).ok_or_else(|| not_found(old))?;
        if old == new {
            return Ok(());
        }
        if new.is_empty() {
            return Err(StoreError::EmptyInput { what: "key" }.into());
        }
        if self.exists(new) {
            return Err(StoreError::AlreadyExists {
                key: new.to_string(),
            }
            .into());
        }

        self.index.remove(old);
        self.index.insert(new.to_string(), pos);
        new.clone_into(&mut self.records[pos].key);
        self.save()
    }

    /// Sets `dst` to the value of `src`, overwriting any existing `dst`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `src` is absent, or any `set` error.
    pub fn copy(&mut self, src: &str, dst: &str) -> EvmResult<()> {
        let value = self.get(src)?.to_string();
        self.set(dst, &value)
    }

    /// Removes every record, then saves.
    ///
    /// # Errors
    ///
    /// Returns the save error.
    pub fn clear(&mut self) -> EvmResult<()> {
        self.clear_records();
        self.save()
    }

    /// Records in store order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records sorted by key (byte-wise).
    #[must_use]
    pub fn sorted(&self) -> Vec<&Record> {
        let mut sorted: Vec<_> = self.records.iter().collect();
        sorted.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        sorted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn max_vars(&self) -> usize {
        self.max_vars
    }

    /// Storage location.
    #[must_use]
    pub fn location(&self) -> &Path {
        self.backend.location()
    }

    /// Sets `key` without saving. Returns true if a record was added.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` or `CapacityExceeded`.
    pub(crate) fn insert(&mut self, key: &str, value: &str) -> EvmResult<bool> {
        if key.is_empty() {
            return Err(StoreError::EmptyInput { what: "key" }.into());
        }
        if !self.exists(key) && self.records.len() >= self.max_vars {
            return Err(StoreError::CapacityExceeded { max: self.max_vars }.into());
        }
        Ok(self.upsert(key, value.to_string()))
    }

    /// Removes every record matching `predicate` without saving.
    /// Returns how many were removed.
    pub(crate) fn remove_where(&mut self, predicate: impl Fn(&Record) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !predicate(r));
        let removed = before - self.records.len();
        if removed > 0 {
            self.index.clear();
            self.reindex_from(0);
        }
        removed
    }

    pub(crate) fn clear_records(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    fn upsert(&mut self, key: &str, value: String) -> bool {
        if let Some(&pos) = self.index.get(key) {
            self.records[pos].value = value;
            false
        } else {
            self.index.insert(key.to_string(), self.records.len());
            self.records.push(Record {
                key: key.to_string(),
                value,
            });
            true
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (pos, record) in self.records.iter().enumerate().skip(start) {
            self.index.insert(record.key.clone(), pos);
        }
    }
}

fn not_found(key: &str) -> crate::error::EvmError {
    StoreError::NotFound {
        key: key.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests;
