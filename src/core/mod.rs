// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process environment assembly and launch for `evm exec`.
//!
//! ```text
//!   current_env()  +  store records
//!          |              |
//!          v              v
//!         Env::overlay(records)  --> skipped keys (warn)
//!                 |
//!                 v
//!   ProcessBuilder::resolve(cmd, &env)   which_in(PATH from env)
//!     .args() .env()
//!     .exec()   unix: replace image / other: spawn + wait
//! ```

pub mod env;
pub mod process;
