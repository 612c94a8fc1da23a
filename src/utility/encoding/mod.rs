// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text decoding for storage and import files.
//!
//! ```text
//! bytes --(BOM?)--> UTF-8 / UTF-16LE / UTF-16BE
//!       --(valid UTF-8?)--> passthrough
//!       --(otherwise)--> Windows-1252
//! ```
//!
//! Files written by Windows editors frequently carry a BOM or a legacy
//! code page. Everything is normalized to UTF-8 before parsing.

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use std::borrow::Cow;

/// Source encoding of a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 (code page 65001)
    #[default]
    Utf8,
    /// UTF-16 Little Endian (code page 1200)
    Utf16Le,
    /// UTF-16 Big Endian (code page 1201)
    Utf16Be,
    /// Active Code Page - Windows-1252
    Acp,
}

impl Encoding {
    /// Guesses the encoding of `bytes` and returns it with the BOM length.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> (Self, usize) {
        match encoding_rs::Encoding::for_bom(bytes) {
            Some((enc, bom_len)) if enc == UTF_16LE => (Self::Utf16Le, bom_len),
            Some((enc, bom_len)) if enc == UTF_16BE => (Self::Utf16Be, bom_len),
            Some((enc, bom_len)) if enc == UTF_8 => (Self::Utf8, bom_len),
            _ if std::str::from_utf8(bytes).is_ok() => (Self::Utf8, 0),
            _ => (Self::Acp, 0),
        }
    }
}

/// Converts bytes from the given encoding to UTF-8.
///
/// Invalid sequences are replaced with U+FFFD.
///
/// # Example
/// ```
/// use evm_rs::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9"; // "café" in Windows-1252
/// let utf8 = bytes_to_utf8(Encoding::Acp, cp1252_bytes);
/// assert_eq!(utf8, "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    let codec = match encoding {
        Encoding::Utf8 => return String::from_utf8_lossy(bytes),
        Encoding::Utf16Le => UTF_16LE,
        Encoding::Utf16Be => UTF_16BE,
        Encoding::Acp => WINDOWS_1252,
    };
    let (result, _had_errors) = codec.decode_without_bom_handling(bytes);
    result
}

/// Decodes file content to UTF-8, stripping any BOM.
///
/// # Example
/// ```
/// use evm_rs::utility::encoding::decode_text;
///
/// assert_eq!(decode_text(b"\xEF\xBB\xBF{}"), "{}");
/// ```
#[must_use]
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (encoding, bom_len) = Encoding::detect(bytes);
    if encoding == Encoding::Acp {
        tracing::warn!(
            "content is not valid UTF-8, decoding as Windows-1252 (it is written back as UTF-8)"
        );
    }
    bytes_to_utf8(encoding, &bytes[bom_len..])
}
