// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for evm-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! evm [global options] <command>
//! version | options | configs
//! set | get | delete | list | clear | rename | copy | search
//! setg | getg | deleteg | listg | groups | delete-group | move-group
//! export | load | backup | restore
//! exec -- CMD [ARGS...]
//! ```

pub mod exec;
pub mod global;
pub mod group;
pub mod transfer;
pub mod vars;


use crate::cli::exec::ExecArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::group::{GroupArgs, GroupedKeyArgs, ListGroupArgs, MoveGroupArgs, SetGroupedArgs};
use crate::cli::transfer::{BackupArgs, ExportArgs, LoadArgs, RestoreArgs};
use crate::cli::vars::{CopyArgs, KeyArgs, ListArgs, RenameArgs, SearchArgs, SetArgs};
use clap::{Parser, Subcommand};

/// Environment Variable Manager
///
/// A portable store for named environment variable sets.
#[derive(Debug, Parser)]
#[command(
    name = "evm",
    author,
    version,
    about = "Environment Variable Manager",
    long_about = "evm-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Stores named environment variables in a JSON file and applies\n\
                  them to commands. Keys may carry a `group:` prefix; the group\n\
                  commands (setg, getg, listg, ...) address them by group name.",
    after_help = "EXAMPLES:\n\n\
                  evm set API_KEY abc123\n\
                  evm setg prod DATABASE_URL postgres://db\n\
                  evm list --show-groups\n\
                  evm export --format sh --group prod\n\
                  evm load .env --group dev\n\
                  evm backup && evm restore backup_20260101_120000.json --merge\n\
                  evm exec -- printenv API_KEY"
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their resolved values.
    Options,

    /// Lists the configuration files that were loaded.
    Configs,

    /// Sets an environment variable.
    Set(SetArgs),

    /// Gets an environment variable.
    Get(KeyArgs),

    /// Deletes an environment variable.
    Delete(KeyArgs),

    /// Lists environment variables.
    List(ListArgs),

    /// Deletes all environment variables.
    Clear,

    /// Lists all groups with their variable counts.
    Groups,

    /// Sets a variable in a group.
    Setg(SetGroupedArgs),

    /// Gets a variable from a group, falling back to the ungrouped key.
    Getg(GroupedKeyArgs),

    /// Deletes a variable from a group.
    Deleteg(GroupedKeyArgs),

    /// Lists the variables of a group.
    Listg(ListGroupArgs),

    /// Deletes a group and all its variables.
    #[command(name = "delete-group")]
    DeleteGroup(GroupArgs),

    /// Moves a variable to another group.
    #[command(name = "move-group")]
    MoveGroup(MoveGroupArgs),

    /// Renames a variable.
    Rename(RenameArgs),

    /// Copies a variable.
    Copy(CopyArgs),

    /// Searches keys (and optionally values).
    Search(SearchArgs),

    /// Exports variables to a file.
    Export(ExportArgs),

    /// Loads variables from a file.
    Load(LoadArgs),

    /// Writes a timestamped backup.
    Backup(BackupArgs),

    /// Restores variables from a backup.
    Restore(RestoreArgs),

    /// Runs a command with the stored variables applied.
    Exec(ExecArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
