// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tolerant codec for flat string-to-string JSON objects.
//!
//! ```text
//! encode:  [(k, v)] --> {\n  "k": "v",\n  "k2": "v2"\n}\n
//!
//! decode:  text --> first '{' --> Parser::object()
//!            "k": "v"        entries
//!            "k": { .. }     objects (recursive, depth-limited)
//!            "k": 12 / true  entries (literal text)
//!            "k": null / []  skipped
//!            stray bytes     ignored
//!          stops at the matching '}' (trailing content ignored)
//! ```
//!
//! Escapes: `\"` `\\` `\n` `\r` `\t`. Any other escaped character decodes
//! to itself, so `é` reads back as `u00e9`.
//!
//! The decoder never fails. Input without a `{` yields an empty,
//! unshaped [`Document`]; callers decide whether that is worth a warning.

use std::borrow::Cow;
use std::fmt::Write as _;

const INDENT: &str = "  ";
const MAX_DEPTH: usize = 32;

/// Appends `raw` to `out` with the five supported escapes applied.
pub fn escape_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
}

/// Returns `raw` with the five supported escapes applied.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    escape_into(&mut out, raw);
    out
}

/// Writes an object literal whose closing brace sits at `depth` levels
/// of indentation. No trailing newline.
pub fn write_object<'a, I>(out: &mut String, entries: I, depth: usize)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    out.push_str("{\n");
    let mut first = true;
    for (key, value) in entries {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        for _ in 0..=depth {
            out.push_str(INDENT);
        }
        out.push('"');
        escape_into(out, key);
        out.push_str("\": \"");
        escape_into(out, value);
        out.push('"');
    }
    if !first {
        out.push('\n');
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push('}');
}

/// Encodes entries as a pretty, two-space indented JSON object, in the
/// order given.
///
/// # Example
/// ```
/// use evm_rs::store::codec::encode;
///
/// let text = encode([("A", "1"), ("B", "say \"hi\"")]);
/// assert_eq!(text, "{\n  \"A\": \"1\",\n  \"B\": \"say \\\"hi\\\"\"\n}\n");
/// ```
#[must_use]
pub fn encode<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    write_object(&mut out, entries, 0);
    out.push('\n');
    out
}

/// Result of decoding an object literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<(String, String)>,
    objects: Vec<(String, Self)>,
    skipped: usize,
    shaped: bool,
}

impl Document {
    /// String (and scalar) members in document order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Nested object members in document order.
    #[must_use]
    pub fn objects(&self) -> &[(String, Self)] {
        &self.objects
    }

    /// Last nested object named `key`.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<&Self> {
        self.objects
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, doc)| doc)
    }

    /// Last string member named `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Members that could not be represented as strings.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// True when an opening brace was found.
    #[must_use]
    pub const fn is_shaped(&self) -> bool {
        self.shaped
    }

    /// True when the document has neither entries nor nested objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.objects.is_empty()
    }
}

/// Decodes the first object literal found in `text`.
#[must_use]
pub fn decode(text: &str) -> Document {
    let bytes = text.as_bytes();
    let Some(start) = bytes.iter().position(|&b| b == b'{') else {
        return Document::default();
    };
    let mut parser = Parser {
        bytes,
        pos: start + 1,
    };
    parser.object(0)
}

/// Checks `text` against strict JSON.
///
/// Control characters other than `\n`, `\r` and `\t` are written raw by
/// [`encode`], so they are read as their `\u00XX` escapes here. The
/// encoder's own output therefore always passes.
///
/// # Errors
///
/// Returns the `serde_json` error describing the first violation.
pub fn check_strict(text: &str) -> Result<(), serde_json::Error> {
    let text = escape_raw_controls(text);
    serde_json::from_str::<serde::de::IgnoredAny>(&text).map(|_| ())
}

fn is_raw_control(c: char) -> bool {
    c < ' ' && !matches!(c, '\n' | '\r' | '\t')
}

fn escape_raw_controls(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_raw_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        if is_raw_control(c) {
            let _ = write!(out, "\\u{:04x}", u32::from(c));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_whitespace() || b == b',')
        {
            self.pos += 1;
        }
    }

    /// Parses members until the closing brace of the current object.
    /// Called with `pos` just past the opening brace.
    fn object(&mut self, depth: usize) -> Document {
        let mut doc = Document {
            shaped: true,
            ..Document::default()
        };

        loop {
            self.skip_separators();
            match self.peek() {
                None => {
                    tracing::trace!("object not terminated, keeping {} entries", doc.entries.len());
                    break;
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b'"') => self.member(&mut doc, depth),
                Some(_) => self.pos += 1,
            }
        }

        doc
    }

    fn member(&mut self, doc: &mut Document, depth: usize) {
        let key = self.string();
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            doc.skipped += 1;
            return;
        }
        self.pos += 1;
        self.skip_whitespace();

        match self.peek() {
            Some(b'"') => {
                let value = self.string();
                doc.entries.push((key, value));
            }
            Some(b'{') if depth < MAX_DEPTH => {
                self.pos += 1;
                let child = self.object(depth + 1);
                doc.objects.push((key, child));
            }
            Some(b'{' | b'[') => {
                self.skip_container();
                doc.skipped += 1;
            }
            Some(_) => match self.literal() {
                Some(text) => doc.entries.push((key, text)),
                None => doc.skipped += 1,
            },
            None => doc.skipped += 1,
        }
    }

    /// Reads a quoted string. Called with `pos` on the opening quote.
    /// An unterminated string runs to end of input.
    fn string(&mut self) -> String {
        self.pos += 1;
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'"' => break,
                b'\\' => {
                    let Some(escaped) = self.peek() else { break };
                    self.pos += 1;
                    out.push(match escaped {
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        other => other,
                    });
                }
                _ => out.push(b),
            }
        }
        // Splits only happen at ASCII bytes, so the input's UTF-8 survives
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Reads a bare scalar. Numbers and booleans keep their literal text,
    /// anything else (including `null`) is rejected.
    fn literal(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !(b.is_ascii_whitespace() || matches!(b, b',' | b'}' | b']')))
        {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        let is_number = text
            .bytes()
            .next()
            .is_some_and(|b| b == b'-' || b.is_ascii_digit())
            && text.parse::<f64>().is_ok();
        if is_number || text == "true" || text == "false" {
            Some(text.to_string())
        } else {
            None
        }
    }

    /// Skips a balanced `{..}` or `[..]`, honoring strings.
    fn skip_container(&mut self) {
        let mut level = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'"' => {
                    self.string();
                    continue;
                }
                b'{' | b'[' => level += 1,
                b'}' | b']' => {
                    level = level.saturating_sub(1);
                    if level == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
    }
}
