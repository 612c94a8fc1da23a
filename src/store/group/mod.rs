// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Colon-prefixed groups layered on plain keys.
//!
//! ```text
//! "prod:DB_HOST"  --split_key-->  (Named("prod"), "DB_HOST")
//! "API_KEY"       --split_key-->  (Default,       "API_KEY")
//! "a:b:c"         --split_key-->  (Named("a"),    "b:c")
//!
//! Group::parse("")        --> Default   (user input)
//! Group::parse("default") --> Default
//! Default.compose("K")    --> "K"       (never "default:K")
//!
//! "default:X" (raw key)   --split_key-->  (Named("default"), "X")
//!                         listed under [default] by its full key
//! ```
//!
//! Groups are derived from keys and have no registry of their own.

use std::fmt;

use super::Store;
use crate::error::{EvmResult, StoreError};

/// Name of the implicit group of keys without a colon.
pub const DEFAULT_GROUP: &str = "default";

const SEPARATOR: char = ':';

/// A key's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group<'a> {
    /// Keys without a separator.
    Default,
    /// Keys starting with `<name>:`.
    Named(&'a str),
}

impl<'a> Group<'a> {
    /// Interprets a group name given by the user. Empty and `"default"`
    /// both address the ungrouped namespace.
    #[must_use]
    pub fn parse(name: &'a str) -> Self {
        if name.is_empty() || name == DEFAULT_GROUP {
            Self::Default
        } else {
            Self::Named(name)
        }
    }

    /// Display name of the group.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        match self {
            Self::Default => DEFAULT_GROUP,
            Self::Named(name) => *name,
        }
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Builds the full key for `name` in this group.
    #[must_use]
    pub fn compose(&self, name: &str) -> String {
        match self {
            Self::Default => name.to_string(),
            Self::Named(group) => format!("{group}{SEPARATOR}{name}"),
        }
    }

    /// True if `key` belongs to this group.
    ///
    /// The default group also owns raw `default:` keys, matching the
    /// group name they display under.
    #[must_use]
    pub fn owns(&self, key: &str) -> bool {
        match self {
            Self::Default => !key.contains(SEPARATOR) || has_prefix(key, DEFAULT_GROUP),
            Self::Named(group) => has_prefix(key, group),
        }
    }
}

impl fmt::Display for Group<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn has_prefix(key: &str, group: &str) -> bool {
    key.strip_prefix(group)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

/// Splits `key` on its first colon into group and name.
///
/// `split_key(k).0.compose(split_key(k).1) == k` for every key, including
/// ones literally starting with `default:`.
#[must_use]
pub fn split_key(key: &str) -> (Group<'_>, &str) {
    key.split_once(SEPARATOR)
        .map_or((Group::Default, key), |(group, name)| {
            (Group::Named(group), name)
        })
}

impl Store {
    /// Sets `key` inside `group`, then saves.
    ///
    /// # Errors
    ///
    /// Same as [`Store::set`].
    pub fn set_grouped(&mut self, group: &str, key: &str, value: &str) -> EvmResult<String> {
        if key.is_empty() {
            return Err(StoreError::EmptyInput { what: "key" }.into());
        }
        let full = Group::parse(group).compose(key);
        self.set(&full, value)?;
        Ok(full)
    }

    /// Looks up `key` inside `group`, falling back to the bare `key`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when neither key exists.
    pub fn get_grouped(&self, group: &str, key: &str) -> EvmResult<&str> {
        let group = Group::parse(group);
        let full = group.compose(key);
        if let Ok(value) = self.get(&full) {
            return Ok(value);
        }
        if group.is_default() {
            return Err(StoreError::NotFound { key: full }.into());
        }
        tracing::trace!(key = %full, fallback = key, "grouped key missing, trying bare key");
        self.get(key)
            .map_err(|_| StoreError::NotFound { key: full }.into())
    }

    /// Deletes `key` inside `group`, then saves. No fallback.
    ///
    /// # Errors
    ///
    /// Same as [`Store::delete`].
    pub fn delete_grouped(&mut self, group: &str, key: &str) -> EvmResult<String> {
        let full = Group::parse(group).compose(key);
        self.delete(&full)?;
        Ok(full)
    }

    /// Deletes every record of `group`, then saves. Returns the count.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty name, `ProtectedGroup` for the
    /// default group, `GroupNotFound` when nothing matches, or the save
    /// error.
    pub fn delete_group(&mut self, group: &str) -> EvmResult<usize> {
        if group.is_empty() {
            return Err(StoreError::EmptyInput { what: "group name" }.into());
        }
        let target = Group::parse(group);
        if target.is_default() {
            return Err(StoreError::ProtectedGroup.into());
        }

        let removed = self.remove_where(|r| target.owns(r.key()));
        if removed == 0 {
            return Err(StoreError::GroupNotFound {
                group: group.to_string(),
            }
            .into());
        }
        self.save()?;
        tracing::debug!(group, removed, "group deleted");
        Ok(removed)
    }

    /// Moves `key` into `group` (empty or `"default"` ungroups it), then
    /// saves. Returns the new key.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `key` is absent, `AlreadyExists` if the target
    /// key is another record, or the save error.
    pub fn move_to_group(&mut self, key: &str, group: &str) -> EvmResult<String> {
        if !self.exists(key) {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            }
            .into());
        }
        let (_, name) = split_key(key);
        let target = Group::parse(group).compose(name);
        self.rename(key, &target)?;
        Ok(target)
    }
}
