// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable sets for child processes.
//!
//! ```text
//! Env (BTreeMap<EnvKey, String>)
//! Sources: current_env(), Env::new()
//! Ops: set/get/remove/overlay
//! ```
//!
//! - **Case-insensitive on Windows** (`PATH == Path`), exact elsewhere
//! - **UTF-8 only**: inherited entries that are not valid UTF-8 are skipped

pub mod container;

#[cfg(test)]
mod tests;

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> container::Env {
    let mut env = container::Env::new();
    for (key, value) in std::env::vars_os() {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                env.set(key, value);
            }
            (key, _) => {
                tracing::debug!(key = ?key, "skipping non-UTF-8 inherited variable");
            }
        }
    }
    env
}
