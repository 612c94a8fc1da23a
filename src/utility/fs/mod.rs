// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers for the storage file and transfer targets.
//!
//! ```text
//! expand_path()       "~/.evm/env.json" --> /home/u/.evm/env.json
//! ensure_parent_dir() create_dir_all(parent)
//! read_text()         metadata len --> try_reserve_exact --> decode_text
//! write_atomic()      NamedTempFile::new_in(parent) --> persist(target)
//! set_executable()    0o755 (unix only)
//! ```

use std::io::{Read, Write};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use directories::BaseDirs;

use crate::error::FsError;
use crate::utility::encoding::decode_text;

/// Expands a leading `~` to the user's home directory and normalizes
/// separators for the host platform.
///
/// Paths without a home marker are returned unchanged apart from
/// separator conversion. If the home directory cannot be determined the
/// marker is left in place.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            match BaseDirs::new() {
                Some(dirs) => {
                    let mut home = dirs.home_dir().to_string_lossy().into_owned();
                    home.push_str(rest);
                    home
                }
                None => {
                    tracing::warn!("cannot determine home directory, using '{path}' as-is");
                    path.to_string()
                }
            }
        }
        _ => path.to_string(),
    };

    PathBuf::from(normalize_separators(&expanded))
}

/// Converts `/` and `\` to the host separator.
fn normalize_separators(path: &str) -> String {
    if MAIN_SEPARATOR == '\\' {
        path.replace('/', "\\")
    } else {
        path.to_string()
    }
}

/// Creates every missing parent directory of `path`.
///
/// # Errors
///
/// Returns `FsError` if a directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), FsError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| FsError::from_io(parent.display().to_string(), e)),
        _ => Ok(()),
    }
}

/// Reads a whole file and decodes it to UTF-8.
///
/// The buffer is reserved up front with a fallible allocation so a huge
/// file surfaces as [`FsError::OutOfMemory`] instead of aborting.
///
/// # Errors
///
/// Returns [`FsError::NotFound`] when the file is missing, and other
/// `FsError` variants when it cannot be opened, sized, or read.
pub fn read_text(path: &Path) -> Result<String, FsError> {
    let display = path.display().to_string();
    let mut file = std::fs::File::open(path).map_err(|e| FsError::from_io(display.clone(), e))?;
    let size = file
        .metadata()
        .map_err(|e| FsError::from_io(display.clone(), e))?
        .len();

    let mut bytes = Vec::new();
    let capacity = usize::try_from(size).map_err(|_| FsError::OutOfMemory {
        path: display.clone(),
        size,
    })?;
    bytes
        .try_reserve_exact(capacity)
        .map_err(|_| FsError::OutOfMemory {
            path: display.clone(),
            size,
        })?;
    file.read_to_end(&mut bytes)
        .map_err(|e| FsError::from_io(display, e))?;

    Ok(decode_text(&bytes).into_owned())
}

/// Writes `contents` to `path` through a temporary sibling file.
///
/// The previous file content survives intact if the process dies before
/// the final rename. Parent directories are created as needed.
///
/// # Errors
///
/// Returns `FsError` if the directory, temporary file, or rename fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    ensure_parent_dir(path)?;
    let display = path.display().to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(display.clone(), e))?;
    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| FsError::from_io(display.clone(), e))?;
    temp.persist(path)
        .map_err(|e| FsError::from_io(display, e.error))?;

    tracing::trace!(path = %path.display(), bytes = contents.len(), "file written");
    Ok(())
}

/// Marks a file executable (`rwxr-xr-x`). No-op on non-Unix platforms.
///
/// # Errors
///
/// Returns `FsError` if the permissions cannot be changed.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<(), FsError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| FsError::from_io(path.display().to_string(), e))
}

/// Marks a file executable (`rwxr-xr-x`). No-op on non-Unix platforms.
///
/// # Errors
///
/// Never fails on this platform.
#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<(), FsError> {
    Ok(())
}
