// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `exec` command.
//!
//! ```text
//! current_env() --overlay(records)--> Env --> which_in(PATH of Env)
//!                                              --> exec / spawn+wait
//! ```

use std::process::ExitCode;

use crate::cli::exec::ExecArgs;
use crate::core::env::current_env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{ProcessError, Result};
use crate::store::Store;

/// Handler for `exec`.
///
/// On Unix the process image is replaced and this only returns on
/// failure. Elsewhere the child's exit code is returned.
///
/// # Errors
///
/// Returns an error if no command is given, the program cannot be found,
/// or it cannot be started.
pub fn run_exec_command(args: &ExecArgs, store: &Store) -> Result<ExitCode> {
    let Some((program, rest)) = args.command.split_first() else {
        return Err(ProcessError::NoCommand.into());
    };

    let mut env = current_env();
    let skipped = env.overlay(store.records().iter().map(|r| (r.key(), r.value())));
    for key in &skipped {
        tracing::warn!(key = %key, "variable cannot be set in a process environment, skipping");
    }

    let code = ProcessBuilder::resolve(program, env)?.args(rest).exec()?;
    tracing::debug!(program = %program, code, "command finished");
    Ok(exit_code(code))
}

/// Maps a child exit code onto the range a process can return.
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
