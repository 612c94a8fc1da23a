// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for export, load, backup, and restore.
//!
//! ```text
//! export [-f json|env|sh] [-o FILE] [-g GROUP]
//! load FILE [-f json|env|backup] [-r] [-g GROUP] [-n]
//! backup [-f FILE]
//! restore FILE [-m]
//! ```

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::store::transfer::{ExportFormat, ImportFormat};

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormatArg {
    /// JSON object (same shape as the storage file).
    #[default]
    Json,
    /// KEY=VALUE lines.
    Env,
    /// Executable bash script of export statements.
    Sh,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Json => Self::Json,
            ExportFormatArg::Env => Self::Env,
            ExportFormatArg::Sh => Self::Sh,
        }
    }
}

/// Import file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormatArg {
    /// JSON object, backup document, or nested groups.
    Json,
    /// KEY=VALUE lines.
    Env,
    /// Backup document.
    Backup,
}

impl From<ImportFormatArg> for ImportFormat {
    fn from(value: ImportFormatArg) -> Self {
        match value {
            ImportFormatArg::Json => Self::Json,
            ImportFormatArg::Env => Self::Env,
            ImportFormatArg::Backup => Self::Backup,
        }
    }
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = ExportFormatArg::Json)]
    pub format: ExportFormatArg,

    /// Output file (default: env.json, .env, or export.sh).
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only export variables of this group.
    #[arg(short = 'g', long)]
    pub group: Option<String>,
}

/// Arguments for the `load` command.
#[derive(Debug, Clone, Args)]
pub struct LoadArgs {
    /// File to import.
    pub file: PathBuf,

    /// Input format (detected from extension or content if omitted).
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<ImportFormatArg>,

    /// Replace all existing variables instead of merging.
    #[arg(short = 'r', long)]
    pub replace: bool,

    /// Add imported variables to this group.
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Treat top-level JSON objects as groups.
    #[arg(short = 'n', long)]
    pub nest: bool,
}

/// Arguments for the `backup` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BackupArgs {
    /// Backup file (default: backup_<timestamp>.json in the backup directory).
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for the `restore` command.
#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    /// Backup file to restore.
    pub file: PathBuf,

    /// Merge into the current variables instead of replacing them.
    #[arg(short = 'm', long)]
    pub merge: bool,
}
