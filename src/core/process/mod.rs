// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Child process launch with an explicit environment.
//!
//! ```text
//! ProcessBuilder::resolve("make", &env)   which_in(PATH from env)
//!   .args() .env()
//!   .exec()    unix: execvp-style image replacement
//!              other: spawn, wait, return exit code
//!   .status()  spawn, wait, return exit code
//! ```

pub mod builder;
#[cfg(test)]
mod tests;
