// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Group commands.

use crate::cli::group::{GroupArgs, GroupedKeyArgs, ListGroupArgs, MoveGroupArgs, SetGroupedArgs};
use crate::error::Result;
use crate::store::Store;

/// Handler for `setg`.
///
/// # Errors
///
/// Returns an error for an empty key, a full store, or a failed save.
pub fn run_setg_command(args: &SetGroupedArgs, store: &mut Store) -> Result<()> {
    let key = store.set_grouped(&args.group, &args.key, &args.value)?;
    println!("Set: {key}={}", args.value);
    Ok(())
}

/// Handler for `getg`.
///
/// # Errors
///
/// Returns an error if neither the grouped nor the bare key exists.
pub fn run_getg_command(args: &GroupedKeyArgs, store: &Store) -> Result<()> {
    println!("{}", store.get_grouped(&args.group, &args.key)?);
    Ok(())
}

/// Handler for `deleteg`.
///
/// # Errors
///
/// Returns an error if the grouped key does not exist or the save fails.
pub fn run_deleteg_command(args: &GroupedKeyArgs, store: &mut Store) -> Result<()> {
    let key = store.delete_grouped(&args.group, &args.key)?;
    println!("Deleted: {key}");
    Ok(())
}

/// Handler for `listg`.
pub fn run_listg_command(args: &ListGroupArgs, store: &Store) {
    print!("{}", store.list_group(&args.group, args.no_prefix));
}

/// Handler for `groups`.
pub fn run_groups_command(store: &Store) {
    print!("{}", store.list_groups());
}

/// Handler for `delete-group`.
///
/// # Errors
///
/// Returns an error for an empty or default group, a group without
/// variables, or a failed save.
pub fn run_delete_group_command(args: &GroupArgs, store: &mut Store) -> Result<()> {
    let removed = store.delete_group(&args.group)?;
    println!(
        "Deleted group '{}' and all its variables ({removed} total)",
        args.group
    );
    Ok(())
}

/// Handler for `move-group`.
///
/// # Errors
///
/// Returns an error if the key is missing, the target key exists, or the
/// save fails.
pub fn run_move_group_command(args: &MoveGroupArgs, store: &mut Store) -> Result<()> {
    let new_key = store.move_to_group(&args.key, &args.group)?;
    println!("Moved: {} -> {new_key}", args.key);
    Ok(())
}
