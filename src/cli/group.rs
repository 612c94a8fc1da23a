// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for group commands.
//!
//! ```text
//! setg GROUP KEY VALUE     getg GROUP KEY     deleteg GROUP KEY
//! listg GROUP [--no-prefix]
//! delete-group GROUP       move-group KEY GROUP
//! ```
//!
//! `default` (or an empty name) addresses ungrouped keys.

use clap::Args;

/// Arguments for the `setg` command.
#[derive(Debug, Clone, Args)]
pub struct SetGroupedArgs {
    /// Group name.
    pub group: String,

    /// Variable name inside the group.
    pub key: String,

    /// Variable value.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for `getg` and `deleteg`.
#[derive(Debug, Clone, Args)]
pub struct GroupedKeyArgs {
    /// Group name.
    pub group: String,

    /// Variable name inside the group.
    pub key: String,
}

/// Arguments for the `listg` command.
#[derive(Debug, Clone, Args)]
pub struct ListGroupArgs {
    /// Group name.
    pub group: String,

    /// Show names without the group prefix.
    #[arg(long = "no-prefix")]
    pub no_prefix: bool,
}

/// Arguments for the `delete-group` command.
#[derive(Debug, Clone, Args)]
pub struct GroupArgs {
    /// Group name.
    pub group: String,
}

/// Arguments for the `move-group` command.
#[derive(Debug, Clone, Args)]
pub struct MoveGroupArgs {
    /// Full key of the variable to move.
    pub key: String,

    /// Target group (`default` removes the prefix).
    pub group: String,
}
