// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! [global]   output_log_level, file_log_level, log_file
//! [storage]  path, max_vars, backup_dir
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::store::DEFAULT_MAX_VARS;

/// Storage location used when none is configured.
pub const DEFAULT_STORAGE_PATH: &str = "~/.evm/env.json";

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console (stderr) output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. No file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Storage file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage file; a leading `~` is expanded.
    pub path: String,
    /// Maximum number of records accepted by inserts.
    pub max_vars: usize,
    /// Directory for default backup files (default: storage file's directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORAGE_PATH.to_string(),
            max_vars: DEFAULT_MAX_VARS,
            backup_dir: None,
        }
    }
}
