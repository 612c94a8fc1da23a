// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the `exec` command.

use clap::Args;

/// Arguments for the `exec` command.
#[derive(Debug, Clone, Args)]
pub struct ExecArgs {
    /// Command and arguments, run with the stored variables applied.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true
    )]
    pub command: Vec<String>,
}
