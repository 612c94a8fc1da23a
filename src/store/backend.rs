// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Raw storage I/O behind the variable store.
//!
//! ```text
//! StorageBackend
//!   FileBackend  read_text() / write_atomic()   real file
//!   MemBackend   Rc<RefCell<Option<String>>>    tests, write failure sim
//! ```

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{EvmResult, FsError};
use crate::utility::fs::{read_text, write_atomic};

/// Where a serialized store lives.
///
/// The backend handles the "how" of storage. [`super::Store`] handles the
/// records and their rules.
pub trait StorageBackend: std::fmt::Debug {
    /// Reads the serialized document.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error only when existing content cannot be read.
    fn read(&self) -> EvmResult<Option<String>>;

    /// Replaces the serialized document. Must not leave partial content
    /// behind on failure.
    ///
    /// # Errors
    ///
    /// Returns an error when the content cannot be written.
    fn write(&self, content: &str) -> EvmResult<()>;

    /// Location shown in messages and used to place default backups.
    fn location(&self) -> &Path;
}

/// File-backed storage.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> EvmResult<Option<String>> {
        match read_text(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(FsError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, content: &str) -> EvmResult<()> {
        write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// In-memory storage for tests.
///
/// Clones share the same buffer, so a test can keep a handle and inspect
/// what the store persisted.
#[derive(Debug, Clone)]
pub struct MemBackend {
    content: Rc<RefCell<Option<String>>>,
    simulate_write_error: Rc<Cell<bool>>,
    location: PathBuf,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            content: Rc::default(),
            simulate_write_error: Rc::default(),
            location: PathBuf::from("memory://env.json"),
        }
    }
}

impl MemBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `content`.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.content.borrow_mut() = Some(content.into());
        backend
    }

    /// Returns the last persisted document.
    #[must_use]
    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl StorageBackend for MemBackend {
    fn read(&self) -> EvmResult<Option<String>> {
        Ok(self.content())
    }

    fn write(&self, content: &str) -> EvmResult<()> {
        if self.simulate_write_error.get() {
            return Err(FsError::IoError {
                path: self.location.display().to_string(),
                source: std::io::Error::other("simulated write error"),
            }
            .into());
        }
        *self.content.borrow_mut() = Some(content.to_string());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.location
    }
}
