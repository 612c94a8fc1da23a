// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder with configuration options.
//!
//! ```text
//! ProcessBuilder
//!  • new/resolve
//!  • args/env
//!  • status/exec
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::env::container::Env;
use crate::error::ProcessError;

/// Builder for configuring and launching a process.
#[derive(Debug)]
pub struct ProcessBuilder {
    /// Path to the executable
    program: PathBuf,
    /// Command-line arguments
    args: Vec<OsString>,
    /// Complete child environment; inherited when unset
    env: Option<Env>,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program path.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: None,
        }
    }

    /// Creates a `ProcessBuilder` after resolving the program via the
    /// `PATH` of `env`, which becomes the child's environment.
    ///
    /// Stored variables may override `PATH`, so lookup must use the
    /// environment the child will actually see.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if the executable cannot be resolved.
    pub fn resolve(program: &str, env: Env) -> Result<Self, ProcessError> {
        let not_found = || ProcessError::ExecutableNotFound {
            name: program.to_string(),
        };
        let cwd = std::env::current_dir().map_err(|_| not_found())?;
        let path = which::which_in(program, env.get("PATH"), cwd).map_err(|_| not_found())?;
        tracing::debug!(program, resolved = %path.display(), "resolved executable");
        Ok(Self::new(path).env(env))
    }

    /// Adds multiple arguments to the command.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets the complete environment for the process.
    #[must_use]
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(env) = &self.env {
            cmd.env_clear().envs(env.iter());
        }
        cmd
    }

    fn spawn_failed(&self, source: std::io::Error) -> ProcessError {
        ProcessError::SpawnFailed {
            command: self.program.display().to_string(),
            source,
        }
    }

    /// Spawns the process, waits for it, and returns its exit code.
    ///
    /// A process killed by a signal reports exit code 1.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the process cannot be started.
    pub fn status(&self) -> Result<i32, ProcessError> {
        tracing::debug!(program = %self.program.display(), args = ?self.args, "spawning");
        let status = self
            .command()
            .status()
            .map_err(|e| self.spawn_failed(e))?;
        Ok(status.code().unwrap_or(1))
    }

    /// Replaces the current process with the configured command.
    ///
    /// Only returns on failure.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the image cannot be replaced.
    #[cfg(unix)]
    pub fn exec(&self) -> Result<i32, ProcessError> {
        use std::os::unix::process::CommandExt;

        tracing::debug!(program = %self.program.display(), args = ?self.args, "exec");
        let err = self.command().exec();
        Err(self.spawn_failed(err))
    }

    /// Runs the configured command and returns its exit code.
    ///
    /// Platforms without image replacement spawn and wait instead.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the process cannot be started.
    #[cfg(not(unix))]
    pub fn exec(&self) -> Result<i32, ProcessError> {
        self.status()
    }
}
