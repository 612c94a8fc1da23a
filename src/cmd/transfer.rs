// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export, load, backup, and restore commands.

use std::path::PathBuf;

use chrono::Local;

use crate::cli::transfer::{BackupArgs, ExportArgs, LoadArgs, RestoreArgs};
use crate::config::Config;
use crate::error::Result;
use crate::store::Store;
use crate::store::transfer::{ExportFormat, ImportOptions, default_backup_path};

/// Handler for `export`.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn run_export_command(args: &ExportArgs, store: &Store) -> Result<()> {
    let format = ExportFormat::from(args.format);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    if store.export_to(&path, format, args.group.as_deref())? == 0 {
        match &args.group {
            Some(group) => println!("No environment variables in group '{group}'"),
            None => println!("No environment variables to export"),
        }
        return Ok(());
    }

    println!("Environment variables exported to: {}", path.display());
    Ok(())
}

/// Handler for `load`.
///
/// # Errors
///
/// Returns an error if the file is missing, holds no JSON object when read
/// as JSON, or the save fails.
pub fn run_load_command(args: &LoadArgs, store: &mut Store) -> Result<()> {
    let options = ImportOptions::builder()
        .maybe_format(args.format.map(Into::into))
        .replace(args.replace)
        .maybe_group(args.group.clone())
        .nest(args.nest)
        .build();

    let report = store.import_file(&args.file, &options)?;

    if let Some(timestamp) = &report.backup_timestamp {
        println!("Backup timestamp: {timestamp}");
    }
    println!(
        "Loaded {} environment variables from {}",
        report.loaded,
        args.file.display()
    );
    if let Some(group) = &report.group {
        println!("Variables added to group '{group}'");
    }
    if report.nested_groups > 0 {
        println!("Imported {} groups", report.nested_groups);
    }
    if report.skipped > 0 {
        tracing::warn!(
            file = %args.file.display(),
            "skipped {} entries that could not be imported",
            report.skipped
        );
    }
    Ok(())
}

/// Handler for `backup`.
///
/// # Errors
///
/// Returns an error if the backup file cannot be written.
pub fn run_backup_command(args: &BackupArgs, store: &Store, config: &Config) -> Result<()> {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| default_backup_path(&config.backup_dir(), Local::now()));

    store.backup_to(&path)?;
    println!("Backup created: {}", path.display());
    Ok(())
}

/// Handler for `restore`.
///
/// # Errors
///
/// Returns an error if the file is missing, holds no JSON object, or the
/// save fails.
pub fn run_restore_command(args: &RestoreArgs, store: &mut Store) -> Result<()> {
    let report = store.restore_file(&args.file, args.merge)?;

    let verb = if report.merged { "Merged" } else { "Restored" };
    println!("{verb} {} variables from backup", report.restored);
    if let Some(timestamp) = &report.timestamp {
        println!("Backup timestamp: {timestamp}");
    }
    if report.skipped > 0 {
        tracing::warn!(
            file = %args.file.display(),
            "skipped {} entries that could not be restored",
            report.skipped
        );
    }
    Ok(())
}
