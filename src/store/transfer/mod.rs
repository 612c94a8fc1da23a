// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Import, export, backup, and restore.
//!
//! ```text
//! export   sorted [group filter] --> json | env | sh (+x)
//! import   file --> decode_text --> format (flag > extension > sniff)
//!            env:    KEY=VALUE lines, '#' comments, one quote layer stripped
//!            json:   flat object
//!                    {"variables": {..}} backup shape  (timestamp reported)
//!                    --nest: {"grp": {..}} --> grp:KEY
//!          --> [group prefix] --> [replace: clear] --> upsert --> save
//! backup   {"timestamp": .., "variables": {sorted}}
//! restore  "variables" present --> raw keys, merge or replace
//!          otherwise           --> json import, replace = !merge
//! ```
//!
//! Individual bad lines or members are skipped and counted; only input
//! with no object structure at all is rejected.

use std::fmt;
use std::path::{Path, PathBuf};

use bon::Builder;
use chrono::{DateTime, Local};

use super::codec::{self, Document};
use super::group::Group;
use super::{Record, Store};
use crate::error::{EvmResult, StoreError};
use crate::utility::fs::{read_text, set_executable, write_atomic};

/// Timestamp stored in backup documents.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const BACKUP_FILE_FORMAT: &str = "backup_%Y%m%d_%H%M%S.json";
const SH_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const UNKNOWN_TIMESTAMP: &str = "unknown";

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty JSON object, same shape as the storage file.
    #[default]
    Json,
    /// `KEY=VALUE` lines.
    Env,
    /// Bash script of `export KEY=VALUE` lines.
    Sh,
}

impl ExportFormat {
    /// File name used when no output path is given.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "env.json",
            Self::Env => ".env",
            Self::Sh => "export.sh",
        }
    }

    /// Renders sorted records. `generated` is stamped into the `sh` header.
    #[must_use]
    pub fn render(self, records: &[&Record], generated: DateTime<Local>) -> String {
        let pairs = records.iter().map(|r| (r.key(), r.value()));
        match self {
            Self::Json => codec::encode(pairs),
            Self::Env => pairs.map(|(k, v)| format!("{k}={v}\n")).collect(),
            Self::Sh => {
                let mut out = format!(
                    "#!/bin/bash\n\n# EVM Environment Variables Export\n# Generated on: {}\n\n",
                    generated.format(SH_TIMESTAMP_FORMAT)
                );
                out.extend(pairs.map(|(k, v)| format!("export {k}={v}\n")));
                out
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Env => "env",
            Self::Sh => "sh",
        })
    }
}

/// Import file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Flat, backup-shaped, or (with nesting) grouped JSON object.
    Json,
    /// `KEY=VALUE` lines.
    Env,
    /// Backup document. Parsed like `Json`.
    Backup,
}

impl ImportFormat {
    /// Guesses the format from the file extension, then from content.
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json" | "backup") => Self::Json,
            Some("env") => Self::Env,
            _ if path.file_name().is_some_and(|n| n == ".env") => Self::Env,
            _ if content
                .trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
                .starts_with('{') =>
            {
                Self::Json
            }
            _ => Self::Env,
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Env => "env",
            Self::Backup => "backup",
        })
    }
}

/// How an import is applied.
#[derive(Debug, Clone, Default, Builder)]
pub struct ImportOptions {
    /// Forced format; detected when unset.
    format: Option<ImportFormat>,
    /// Clear the store before loading.
    #[builder(default)]
    replace: bool,
    /// Group prefix added to keys that do not already carry it.
    group: Option<String>,
    /// Treat top-level objects as groups.
    #[builder(default)]
    nest: bool,
}

impl ImportOptions {
    #[must_use]
    pub const fn format(&self) -> Option<ImportFormat> {
        self.format
    }

    #[must_use]
    pub const fn replace(&self) -> bool {
        self.replace
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[must_use]
    pub const fn nest(&self) -> bool {
        self.nest
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Format the input was read as.
    pub format: ImportFormat,
    /// Entries written to the store.
    pub loaded: usize,
    /// Lines or members that could not be imported.
    pub skipped: usize,
    /// Group prefix applied, if any.
    pub group: Option<String>,
    /// Backup timestamp when the input was backup-shaped.
    pub backup_timestamp: Option<String>,
    /// Top-level objects imported as groups in nest mode.
    pub nested_groups: usize,
    /// Whether the store was cleared first.
    pub replaced: bool,
}

/// Outcome of a restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// Entries written to the store.
    pub restored: usize,
    /// Members that could not be restored.
    pub skipped: usize,
    /// Merged into (true) or replaced (false) the store.
    pub merged: bool,
    /// Backup timestamp, `"unknown"` when missing. `None` for plain exports.
    pub timestamp: Option<String>,
}

/// Entries extracted from an input, before group/replace handling.
#[derive(Debug, Default)]
struct Extracted {
    entries: Vec<(String, String)>,
    skipped: usize,
    backup_timestamp: Option<String>,
    nested_groups: usize,
}

/// Splits `KEY=VALUE` text into entries. Blank and `#` lines are ignored,
/// lines without `=` or with an empty key are counted as skipped.
#[must_use]
pub fn parse_env_lines(text: &str) -> (Vec<(String, String)>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!(line, "skipping line without '='");
            skipped += 1;
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            skipped += 1;
            continue;
        }
        entries.push((key.to_string(), strip_quotes(value.trim()).to_string()));
    }

    (entries, skipped)
}

/// Removes one layer of matching single or double quotes.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Default backup location inside `dir`, stamped with `now`.
#[must_use]
pub fn default_backup_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(now.format(BACKUP_FILE_FORMAT).to_string())
}

fn malformed(what: &'static str, source: &Path) -> StoreError {
    StoreError::MalformedInput {
        what,
        source_name: source.display().to_string(),
        message: "no JSON object found".to_string(),
    }
}

fn warn_if_not_strict(text: &str, source: &Path) {
    if let Err(e) = codec::check_strict(text) {
        tracing::warn!(
            source = %source.display(),
            "input is not valid JSON ({e}), importing recoverable entries"
        );
    }
}

fn extract_json(doc: &Document, nest: bool) -> Extracted {
    let mut out = Extracted {
        skipped: doc.skipped(),
        ..Extracted::default()
    };

    if nest {
        out.entries.extend(doc.entries().iter().cloned());
        for (group, child) in doc.objects() {
            let group = Group::parse(group);
            out.entries.extend(
                child
                    .entries()
                    .iter()
                    .map(|(k, v)| (group.compose(k), v.clone())),
            );
            out.skipped += child.skipped() + child.objects().len();
            out.nested_groups += 1;
        }
    } else if let Some(vars) = doc.object("variables") {
        out.entries.extend(vars.entries().iter().cloned());
        out.skipped += vars.skipped() + vars.objects().len();
        out.backup_timestamp = Some(
            doc.entry("timestamp")
                .unwrap_or(UNKNOWN_TIMESTAMP)
                .to_string(),
        );
    } else {
        out.entries.extend(doc.entries().iter().cloned());
        out.skipped += doc.objects().len();
    }

    out
}

impl Store {
    /// Sorted records, limited to `group` when given.
    #[must_use]
    pub fn export_records(&self, group: Option<&str>) -> Vec<&Record> {
        let target = group.map(Group::parse);
        self.sorted()
            .into_iter()
            .filter(|r| target.is_none_or(|g| g.owns(r.key())))
            .collect()
    }

    /// Writes an export to `path`. Returns the number of records written;
    /// nothing is written when the selection is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export_to(
        &self,
        path: &Path,
        format: ExportFormat,
        group: Option<&str>,
    ) -> EvmResult<usize> {
        let records = self.export_records(group);
        if records.is_empty() {
            return Ok(0);
        }

        let text = format.render(&records, Local::now());
        write_atomic(path, text.as_bytes())?;
        if format == ExportFormat::Sh {
            set_executable(path)?;
        }

        tracing::info!(path = %path.display(), %format, count = records.len(), "exported");
        Ok(records.len())
    }

    /// Reads and imports `path`, then saves.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing file, `MalformedInput` for JSON input
    /// without any object, or a read/save error.
    pub fn import_file(&mut self, path: &Path, options: &ImportOptions) -> EvmResult<ImportReport> {
        let text = read_text(path)?;
        self.import_text(&text, path, options)
    }

    /// Imports already-read `text`, then saves. `source` names the input
    /// for format detection and messages.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for JSON input without any object, or the
    /// save error.
    pub fn import_text(
        &mut self,
        text: &str,
        source: &Path,
        options: &ImportOptions,
    ) -> EvmResult<ImportReport> {
        let format = options
            .format()
            .unwrap_or_else(|| ImportFormat::detect(source, text));
        tracing::debug!(source = %source.display(), %format, "importing");

        let mut extracted = match format {
            ImportFormat::Env => {
                let (entries, skipped) = parse_env_lines(text);
                Extracted {
                    entries,
                    skipped,
                    ..Extracted::default()
                }
            }
            ImportFormat::Json | ImportFormat::Backup => {
                let doc = codec::decode(text);
                if !doc.is_shaped() {
                    return Err(malformed("JSON", source).into());
                }
                warn_if_not_strict(text, source);
                extract_json(&doc, options.nest())
            }
        };

        let group = options
            .group()
            .filter(|_| !options.nest())
            .map(Group::parse)
            .filter(|g| !g.is_default());
        if let Some(group) = group {
            for (key, _) in &mut extracted.entries {
                if !group.owns(key) {
                    *key = group.compose(key);
                }
            }
        }

        if options.replace() {
            self.clear_records();
        }
        let (loaded, rejected) = self.insert_all(&extracted.entries);
        self.save()?;

        Ok(ImportReport {
            format,
            loaded,
            skipped: extracted.skipped + rejected,
            group: group.map(|g| g.name().to_string()),
            backup_timestamp: extracted.backup_timestamp,
            nested_groups: extracted.nested_groups,
            replaced: options.replace(),
        })
    }

    /// Renders a backup document of every record, sorted by key.
    #[must_use]
    pub fn render_backup(&self, timestamp: DateTime<Local>) -> String {
        let mut out = String::from("{\n  \"timestamp\": \"");
        codec::escape_into(
            &mut out,
            &timestamp.format(BACKUP_TIMESTAMP_FORMAT).to_string(),
        );
        out.push_str("\",\n  \"variables\": ");
        codec::write_object(
            &mut out,
            self.sorted().into_iter().map(|r| (r.key(), r.value())),
            1,
        );
        out.push_str("\n}\n");
        out
    }

    /// Writes a backup to `path`. Returns the number of records saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn backup_to(&self, path: &Path) -> EvmResult<usize> {
        write_atomic(path, self.render_backup(Local::now()).as_bytes())?;
        tracing::info!(path = %path.display(), count = self.len(), "backup written");
        Ok(self.len())
    }

    /// Reads and restores `path`, then saves.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing file, `MalformedInput` when no
    /// object is found, or a read/save error.
    pub fn restore_file(&mut self, path: &Path, merge: bool) -> EvmResult<RestoreReport> {
        let text = read_text(path)?;
        self.restore_text(&text, path, merge)
    }

    /// Restores from already-read `text`, then saves.
    ///
    /// Backup records keep their raw keys. Input without a `variables`
    /// object is imported as a plain JSON export.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` when no object is found, or the save error.
    pub fn restore_text(
        &mut self,
        text: &str,
        source: &Path,
        merge: bool,
    ) -> EvmResult<RestoreReport> {
        let doc = codec::decode(text);
        if !doc.is_shaped() {
            return Err(malformed("backup", source).into());
        }

        let Some(vars) = doc.object("variables") else {
            tracing::info!(
                source = %source.display(),
                "no 'variables' object, restoring as plain JSON export"
            );
            let options = ImportOptions::builder()
                .format(ImportFormat::Json)
                .replace(!merge)
                .build();
            let report = self.import_text(text, source, &options)?;
            return Ok(RestoreReport {
                restored: report.loaded,
                skipped: report.skipped,
                merged: merge,
                timestamp: None,
            });
        };

        warn_if_not_strict(text, source);
        let timestamp = doc
            .entry("timestamp")
            .unwrap_or(UNKNOWN_TIMESTAMP)
            .to_string();

        if !merge {
            self.clear_records();
        }
        let (restored, rejected) = self.insert_all(vars.entries());
        self.save()?;

        Ok(RestoreReport {
            restored,
            skipped: vars.skipped() + vars.objects().len() + rejected,
            merged: merge,
            timestamp: Some(timestamp),
        })
    }

    /// Upserts entries without saving. Returns (loaded, rejected).
    fn insert_all(&mut self, entries: &[(String, String)]) -> (usize, usize) {
        let mut loaded = 0;
        let mut rejected = 0;
        for (key, value) in entries {
            match self.insert(key, value) {
                Ok(_) => loaded += 1,
                Err(e) => {
                    tracing::warn!(key = %key, "skipping entry: {e}");
                    rejected += 1;
                }
            }
        }
        (loaded, rejected)
    }
}
