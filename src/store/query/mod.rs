// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Listing, search, and group reports.
//!
//! ```text
//! list(pattern, false)       --> Table         sorted by key, substring filter
//! list(None, true)           --> GroupedList   sorted by (group, name)
//! list_group(g, strip)       --> Table         one group, full or bare keys
//! list_groups()              --> GroupSummary  first-seen order + counts
//! search(p, values)          --> Option<Table> case-insensitive, None if p empty
//! ```
//!
//! Reports borrow from the store and render through `Display`.

use std::collections::HashMap;
use std::fmt;

use super::group::{Group, split_key};
use super::{Record, Store};

const SECTION_RULE: usize = 70;
const SUMMARY_RULE: usize = 50;
const GROUP_COLUMN: usize = 30;

/// Aligned `KEY = value` rows between two rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    title: String,
    rows: Vec<(&'a str, &'a str)>,
    unit: &'static str,
    empty: String,
}

impl<'a> Table<'a> {
    #[must_use]
    pub fn rows(&self) -> &[(&'a str, &'a str)] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "{}", self.empty);
        }

        let width = self
            .rows
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);
        let rule = "-".repeat(width + SUMMARY_RULE);

        writeln!(f, "\n{}:", self.title)?;
        writeln!(f, "{rule}")?;
        for (key, value) in &self.rows {
            writeln!(f, "{key:<width$} = {value}")?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "Total: {} {}", self.rows.len(), self.unit)
    }
}

/// Every record, sectioned by group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedList<'a> {
    sections: Vec<(Group<'a>, Vec<&'a Record>)>,
}

impl<'a> GroupedList<'a> {
    /// Sections in display order with their records.
    #[must_use]
    pub fn sections(&self) -> &[(Group<'a>, Vec<&'a Record>)] {
        &self.sections
    }

    fn total(&self) -> usize {
        self.sections.iter().map(|(_, records)| records.len()).sum()
    }
}

impl fmt::Display for GroupedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sections.is_empty() {
            return writeln!(f, "No environment variables set");
        }

        let heavy = "=".repeat(SECTION_RULE);
        let light = "-".repeat(SECTION_RULE);

        writeln!(f, "\nEnvironment Variables (by group):")?;
        writeln!(f, "{heavy}")?;
        for (group, records) in &self.sections {
            writeln!(f, "\n[{group}]")?;
            writeln!(f, "{light}")?;
            for record in records {
                writeln!(f, "{} = {}", record.label(), record.value())?;
            }
        }
        writeln!(f, "\n{heavy}")?;
        writeln!(f, "Total: {} variables", self.total())
    }
}

/// Distinct groups with their record counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary<'a> {
    groups: Vec<(Group<'a>, usize)>,
}

impl<'a> GroupSummary<'a> {
    #[must_use]
    pub fn groups(&self) -> &[(Group<'a>, usize)] {
        &self.groups
    }
}

impl fmt::Display for GroupSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return writeln!(
                f,
                "No groups found. All variables are in the default namespace."
            );
        }

        let rule = "-".repeat(SUMMARY_RULE);
        writeln!(f, "\nAvailable Groups:")?;
        writeln!(f, "{rule}")?;
        for (group, count) in &self.groups {
            writeln!(
                f,
                "{:<GROUP_COLUMN$} ({count} variables)",
                group.name()
            )?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "Total: {} groups", self.groups.len())
    }
}

impl Store {
    /// Lists every record sorted by key, optionally filtered by a
    /// case-sensitive substring of the key.
    #[must_use]
    pub fn list<'a>(&'a self, pattern: Option<&str>) -> Table<'a> {
        let pattern = pattern.filter(|p| !p.is_empty());
        let rows = self
            .sorted()
            .into_iter()
            .filter(|r| pattern.is_none_or(|p| r.key().contains(p)))
            .map(|r| (r.key(), r.value()))
            .collect();

        let empty = match pattern {
            Some(p) if !self.is_empty() => format!("No environment variables match '{p}'"),
            _ => "No environment variables set".to_string(),
        };

        Table {
            title: "Environment Variables".to_string(),
            rows,
            unit: "variables",
            empty,
        }
    }

    /// Lists every record sectioned by group, sorted by group name and
    /// then by name within each group.
    #[must_use]
    pub fn list_grouped(&self) -> GroupedList<'_> {
        let mut sorted: Vec<_> = self
            .records()
            .iter()
            .map(|r| {
                let (group, name) = split_key(r.key());
                (group.name(), name, r)
            })
            .collect();
        sorted.sort_unstable_by(|a, b| (a.0, a.1, a.2.key()).cmp(&(b.0, b.1, b.2.key())));

        let mut sections: Vec<(Group<'_>, Vec<&Record>)> = Vec::new();
        for (_, _, record) in sorted {
            let group = record.group();
            if let Some((current, records)) = sections.last_mut()
                && current.name() == group.name()
            {
                records.push(record);
            } else {
                sections.push((group, vec![record]));
            }
        }

        GroupedList { sections }
    }

    /// Lists the records of one group. `strip_prefix` shows bare names.
    #[must_use]
    pub fn list_group<'a>(&'a self, group: &str, strip_prefix: bool) -> Table<'a> {
        let target = Group::parse(group);
        let rows = self
            .sorted()
            .into_iter()
            .filter(|r| target.owns(r.key()))
            .map(|r| {
                let shown = if strip_prefix { r.label() } else { r.key() };
                (shown, r.value())
            })
            .collect();

        Table {
            title: format!("Environment Variables in group '{}'", target.name()),
            rows,
            unit: "variables",
            empty: format!("No environment variables in group '{}'", target.name()),
        }
    }

    /// Counts records per group in first-seen order.
    #[must_use]
    pub fn list_groups(&self) -> GroupSummary<'_> {
        let mut groups: Vec<(Group<'_>, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in self.records() {
            let group = record.group();
            match positions.get(group.name()) {
                Some(&pos) => groups[pos].1 += 1,
                None => {
                    positions.insert(group.name(), groups.len());
                    groups.push((group, 1));
                }
            }
        }

        GroupSummary { groups }
    }

    /// Case-insensitive substring search over keys, and values when
    /// `include_values` is set.
    ///
    /// Returns `None` for an empty pattern.
    #[must_use]
    pub fn search<'a>(&'a self, pattern: &str, include_values: bool) -> Option<Table<'a>> {
        if pattern.is_empty() {
            return None;
        }

        let needle = pattern.to_lowercase();
        let rows = self
            .sorted()
            .into_iter()
            .filter(|r| {
                r.key().to_lowercase().contains(&needle)
                    || (include_values && r.value().to_lowercase().contains(&needle))
            })
            .map(|r| (r.key(), r.value()))
            .collect();

        let scope = if include_values { "key and value" } else { "key" };
        Some(Table {
            title: format!("Search results for '{pattern}'"),
            rows,
            unit: "matches",
            empty: format!("No environment variables match '{pattern}' in {scope}"),
        })
    }
}
