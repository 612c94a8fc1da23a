// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> Store --> stdout
//!   config, vars, group, transfer, exec
//! ```
//!
//! Handlers print confirmations on stdout and return errors to `main`,
//! which reports them on stderr.

pub mod config;
pub mod exec;
pub mod group;
pub mod transfer;
pub mod vars;

use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// Opens the configured store.
///
/// # Errors
///
/// Returns an error if an existing storage file cannot be read.
pub fn open_store(config: &Config) -> Result<Store> {
    let path = config.storage_path();
    let store = Store::open(&path, config.storage.max_vars)?;
    tracing::debug!(path = %path.display(), count = store.len(), "store opened");
    Ok(store)
}
