// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Store --> Command Dispatch
//! ```

use std::process::ExitCode;

use evm_rs::cli::global::GlobalOptions;
use evm_rs::cli::{self, Command};
use evm_rs::cmd::config::{run_configs_command, run_options_command};
use evm_rs::cmd::exec::run_exec_command;
use evm_rs::cmd::group::{
    run_delete_group_command, run_deleteg_command, run_getg_command, run_groups_command,
    run_listg_command, run_move_group_command, run_setg_command,
};
use evm_rs::cmd::open_store;
use evm_rs::cmd::transfer::{
    run_backup_command, run_export_command, run_load_command, run_restore_command,
};
use evm_rs::cmd::vars::{
    run_clear_command, run_copy_command, run_delete_command, run_get_command, run_list_command,
    run_rename_command, run_search_command, run_set_command,
};
use evm_rs::config::{Config, ConfigLoader, ENV_PREFIX, user_config_file};
use evm_rs::error::Result;
use evm_rs::logging::init_logging;
use evm_rs::logging::{LogConfig, LogLevel};
use evm_rs::store::Store;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli.global);

    let log_config = build_log_config(&cli.global, config.as_ref().ok());
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    if let Some(config) = config {
        return LogConfig::builder()
            .with_console_level(config.global.output_log_level)
            .with_file_level(config.global.file_log_level)
            .maybe_with_log_file(config.global.log_file.clone())
            .build();
    }

    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::TRACE);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> Result<ExitCode> {
    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return Ok(ExitCode::FAILURE);
    };

    match command {
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Command::Options => run_options_command(&config?),
        Command::Configs => {
            run_configs_command(&build_config_loader(&cli.global)?.format_loaded_files());
        }
        Command::Exec(args) => {
            let store = open_store(&config?)?;
            return run_exec_command(args, &store);
        }
        Command::Backup(args) => {
            let config = config?;
            run_backup_command(args, &open_store(&config)?, &config)?;
        }
        _ => {
            let mut store = open_store(&config?)?;
            run_store_command(command, &mut store)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_store_command(command: &Command, store: &mut Store) -> Result<()> {
    match command {
        Command::Set(args) => run_set_command(args, store)?,
        Command::Get(args) => run_get_command(args, store)?,
        Command::Delete(args) => run_delete_command(args, store)?,
        Command::List(args) => run_list_command(args, store),
        Command::Clear => run_clear_command(store)?,
        Command::Groups => run_groups_command(store),
        Command::Setg(args) => run_setg_command(args, store)?,
        Command::Getg(args) => run_getg_command(args, store)?,
        Command::Deleteg(args) => run_deleteg_command(args, store)?,
        Command::Listg(args) => run_listg_command(args, store),
        Command::DeleteGroup(args) => run_delete_group_command(args, store)?,
        Command::MoveGroup(args) => run_move_group_command(args, store)?,
        Command::Rename(args) => run_rename_command(args, store)?,
        Command::Copy(args) => run_copy_command(args, store)?,
        Command::Search(args) => run_search_command(args, store),
        Command::Export(args) => run_export_command(args, store)?,
        Command::Load(args) => run_load_command(args, store)?,
        Command::Restore(args) => run_restore_command(args, store)?,
        Command::Version
        | Command::Options
        | Command::Configs
        | Command::Exec(_)
        | Command::Backup(_) => {}
    }
    Ok(())
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if let Some(user) = user_config_file() {
        loader = loader.add_toml_file_optional(user);
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}
