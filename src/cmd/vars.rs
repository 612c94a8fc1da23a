// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Plain variable commands.

use crate::cli::vars::{CopyArgs, KeyArgs, ListArgs, RenameArgs, SearchArgs, SetArgs};
use crate::error::Result;
use crate::store::Store;

/// Handler for `set`.
///
/// # Errors
///
/// Returns an error for an empty key, a full store, or a failed save.
pub fn run_set_command(args: &SetArgs, store: &mut Store) -> Result<()> {
    store.set(&args.key, &args.value)?;
    println!("Set: {}={}", args.key, args.value);
    Ok(())
}

/// Handler for `get`. Prints the bare value.
///
/// # Errors
///
/// Returns an error if the key does not exist.
pub fn run_get_command(args: &KeyArgs, store: &Store) -> Result<()> {
    println!("{}", store.get(&args.key)?);
    Ok(())
}

/// Handler for `delete`.
///
/// # Errors
///
/// Returns an error if the key does not exist or the save fails.
pub fn run_delete_command(args: &KeyArgs, store: &mut Store) -> Result<()> {
    store.delete(&args.key)?;
    println!("Deleted: {}", args.key);
    Ok(())
}

/// Handler for `list`.
pub fn run_list_command(args: &ListArgs, store: &Store) {
    if args.show_groups {
        print!("{}", store.list_grouped());
    } else if let Some(group) = &args.group {
        print!("{}", store.list_group(group, args.no_prefix));
    } else {
        print!("{}", store.list(args.pattern.as_deref()));
    }
}

/// Handler for `clear`.
///
/// # Errors
///
/// Returns an error if the save fails.
pub fn run_clear_command(store: &mut Store) -> Result<()> {
    if store.is_empty() {
        println!("No environment variables to clear");
        return Ok(());
    }
    store.clear()?;
    println!("All environment variables cleared");
    Ok(())
}

/// Handler for `rename`.
///
/// # Errors
///
/// Returns an error if the source is missing, the target exists, or the
/// save fails.
pub fn run_rename_command(args: &RenameArgs, store: &mut Store) -> Result<()> {
    store.rename(&args.old, &args.new)?;
    println!("Renamed: {} -> {}", args.old, args.new);
    Ok(())
}

/// Handler for `copy`.
///
/// # Errors
///
/// Returns an error if the source is missing or the save fails.
pub fn run_copy_command(args: &CopyArgs, store: &mut Store) -> Result<()> {
    store.copy(&args.src, &args.dst)?;
    println!("Copied: {} -> {}", args.src, args.dst);
    Ok(())
}

/// Handler for `search`.
pub fn run_search_command(args: &SearchArgs, store: &Store) {
    match store.search(&args.pattern, args.include_values) {
        Some(table) => print!("{table}"),
        None => println!("No search pattern specified"),
    }
}
