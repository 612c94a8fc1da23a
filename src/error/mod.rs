// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              EvmError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+
//!   |        |        |        |        |
//!   v        v        v        v        v
//! Store     Fs      Config  Process  Io/Other
//!  Box      Box      Box      Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Store   NotFound, AlreadyExists, EmptyInput, CapacityExceeded,
//!           GroupNotFound, ProtectedGroup, MalformedInput
//!   Fs      NotFound, PermissionDenied, IoError, OutOfMemory
//!   Config  ParseError, InvalidValue
//!   Process NoCommand, ExecutableNotFound, SpawnFailed
//! ```
//!
//! Every variant maps onto an [`ErrorKind`] so callers can branch on the
//! failure category without matching nested enums.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EvmError`].
pub type EvmResult<T> = std::result::Result<T, EvmError>;

/// Failure category shared by every error in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Key, group, or file absent.
    NotFound,
    /// Rename/move target collision.
    AlreadyExists,
    /// Blank key or group where one is required.
    EmptyInput,
    /// Store at maximum size.
    CapacityExceeded,
    /// File unreadable/unwritable, directory uncreatable.
    Io,
    /// Import/restore payload without recoverable structure.
    MalformedInput,
    /// Allocation failure while reading a large file.
    OutOfMemory,
    /// Operation refused on the default namespace.
    Protected,
    /// Invalid configuration.
    Config,
    /// Child process could not be launched.
    Process,
}

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EvmError {
    /// Variable store error.
    #[error("{0}")]
    Store(#[from] Box<StoreError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process launch error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl EvmError {
    /// Returns the failure category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(e) => e.kind(),
            Self::Fs(e) => e.kind(),
            Self::Config(_) => ErrorKind::Config,
            Self::Process(_) => ErrorKind::Process,
            Self::Io(_) => ErrorKind::Io,
            Self::Other(_) => ErrorKind::MalformedInput,
        }
    }
}

/// Create a generic [`EvmError::Other`].
pub fn other(message: impl Into<String>) -> EvmError {
    EvmError::Other(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EvmError {
                fn from(err: $error) -> Self {
                    EvmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    StoreError => Store,
    FsError => Fs,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Store Errors ---

/// Variable store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record has the given key.
    #[error("environment variable '{key}' not found")]
    NotFound { key: String },

    /// Target key already exists as a different record.
    #[error("environment variable '{key}' already exists")]
    AlreadyExists { key: String },

    /// A required key or group name was blank.
    #[error("{what} cannot be empty")]
    EmptyInput { what: &'static str },

    /// The store is at its configured maximum.
    #[error("maximum number of variables reached ({max})")]
    CapacityExceeded { max: usize },

    /// No key carries the group prefix.
    #[error("group '{group}' not found or has no variables")]
    GroupNotFound { group: String },

    /// The default namespace cannot be bulk-deleted.
    #[error("cannot delete default namespace, use 'clear' to remove all variables")]
    ProtectedGroup,

    /// Input carried no recoverable structure.
    #[error("invalid {what} in {source_name}: {message}")]
    MalformedInput {
        what: &'static str,
        source_name: String,
        message: String,
    },
}

impl StoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::GroupNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::EmptyInput { .. } => ErrorKind::EmptyInput,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::ProtectedGroup => ErrorKind::Protected,
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
        }
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process launch errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// No command was given.
    #[error("no command specified")]
    NoCommand,

    /// Executable not found in PATH.
    #[error("command not found: '{name}'")]
    ExecutableNotFound { name: String },

    /// Failed to spawn or replace the process.
    #[error("failed to execute '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("file not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Buffer for a file could not be allocated.
    #[error("out of memory reading '{path}' ({size} bytes)")]
    OutOfMemory { path: String, size: u64 },
}

impl FsError {
    /// Classifies an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::IoError { path, source },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) | Self::IoError { .. } => ErrorKind::Io,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
        }
    }
}
