// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable container.
//!
//! ```text
//! Env
//! vars: BTreeMap<EnvKey, String>   deterministic order
//! EnvKey: case-insensitive on Windows, exact elsewhere
//! ```

use std::collections::BTreeMap;

/// An environment variable name.
///
/// Windows treats `PATH` and `Path` as the same variable, so comparison
/// folds ASCII case there.
#[derive(Debug, Clone, Eq)]
struct EnvKey(String);

impl EnvKey {
    fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if cfg!(windows) {
            self.0
                .bytes()
                .map(|b| b.to_ascii_lowercase())
                .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()))
        } else {
            self.0.cmp(&other.0)
        }
    }
}

/// A set of environment variables handed to a child process.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: BTreeMap<EnvKey, String>,
}

impl Env {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Returns true if `key` can be passed to a child process.
    ///
    /// Names must be non-empty and free of `=` and NUL.
    #[must_use]
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(['=', '\0'])
    }

    /// Sets an environment variable, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = EnvKey::new(key);
        // Keep the newest spelling of the name on case-folding platforms
        self.vars.remove(&key);
        self.vars.insert(key, value.into());
        self
    }

    /// Gets an environment variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Applies `records` on top of this environment.
    ///
    /// Incoming values win over inherited ones. Names that cannot exist in
    /// a process environment, and values containing NUL, are left out and
    /// returned so the caller can report them.
    pub fn overlay<'a, I>(&mut self, records: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut skipped = Vec::new();
        for (key, value) in records {
            if Self::is_valid_key(key) && !value.contains('\0') {
                self.set(key, value);
            } else {
                skipped.push(key.to_string());
            }
        }
        skipped
    }

    /// Returns an iterator over environment variables.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
