// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for plain variable commands.
//!
//! ```text
//! set KEY VALUE        get KEY          delete KEY
//! rename OLD NEW       copy SRC DST
//! list [PATTERN] [-g GROUP] [--show-groups] [--no-prefix]
//! search PATTERN [-v]
//! ```

use clap::Args;

/// Arguments for the `set` command.
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Variable name (may include a `group:` prefix).
    pub key: String,

    /// Variable value.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for commands taking a single key.
#[derive(Debug, Clone, Args)]
pub struct KeyArgs {
    /// Variable name.
    pub key: String,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Only show keys containing this text (case-sensitive).
    pub pattern: Option<String>,

    /// List variables in a specific group.
    #[arg(short = 'g', long)]
    pub group: Option<String>,

    /// Display variables grouped by namespace.
    #[arg(long = "show-groups", conflicts_with = "group")]
    pub show_groups: bool,

    /// Show names without the group prefix (with --group).
    #[arg(long = "no-prefix")]
    pub no_prefix: bool,
}

/// Arguments for the `rename` command.
#[derive(Debug, Clone, Args)]
pub struct RenameArgs {
    /// Current name.
    pub old: String,

    /// New name.
    pub new: String,
}

/// Arguments for the `copy` command.
#[derive(Debug, Clone, Args)]
pub struct CopyArgs {
    /// Source name.
    pub src: String,

    /// Destination name; overwritten if it exists.
    pub dst: String,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Text to search for (case-insensitive).
    pub pattern: String,

    /// Also search in values.
    #[arg(short = 'v', long = "value")]
    pub include_values: bool,
}
