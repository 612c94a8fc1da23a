// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for evm-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ~/.evm/config.toml (optional)
//! 3. --config FILE (repeatable)
//! 4. EVM_* env vars
//! 5. --set section.key=value
//! 6. dedicated flags (--env-file, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! EVM_STORAGE__MAX_VARS=500           → storage.max_vars = 500
//! EVM_STORAGE__PATH=/tmp/env.json     → storage.path = "/tmp/env.json"
//! EVM_GLOBAL__OUTPUT_LOG_LEVEL=3      → global.output_log_level = 3
//! ```

pub mod loader;
pub mod types;


use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::utility::fs::expand_path;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_STORAGE_PATH, GlobalConfig, StorageConfig};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "EVM";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Storage options.
    pub storage: StorageConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use evm_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("~/.evm/config.toml")
    ///     .with_env_prefix("EVM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Rejects values that deserialize but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero `max_vars` or an empty
    /// storage path.
    pub fn validate(&self) -> Result<()> {
        if self.storage.max_vars == 0 {
            return Err(ConfigError::InvalidValue {
                section: "storage".to_string(),
                key: "max_vars".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "storage".to_string(),
                key: "path".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Expanded storage file location.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        expand_path(&self.storage.path)
    }

    /// Directory for default backup files: `backup_dir` if set, otherwise
    /// the storage file's directory.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.backup_dir {
            return expand_path(dir);
        }
        match self.storage_path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Format configuration options for display, sorted by key and aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_storage_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_storage_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "storage.path".into(),
            self.storage_path().display().to_string(),
        );
        options.insert(
            "storage.max_vars".into(),
            self.storage.max_vars.to_string(),
        );
        options.insert(
            "storage.backup_dir".into(),
            self.backup_dir().display().to_string(),
        );
    }
}

/// User-level configuration file, `~/.evm/config.toml`.
#[must_use]
pub fn user_config_file() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".evm").join("config.toml"))
}
