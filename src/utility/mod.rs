// evm-rs: Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_text()   BOM sniff --> UTF-8 --> CP1252 fallback
//!   bytes_to_utf8() UTF-8/UTF-16/CP1252 --> UTF-8
//! fs
//!   expand_path()   ~ and separator normalization
//!   read_text()     fallible allocation + decode_text()
//!   write_atomic()  temp file in target dir + rename
//! ```

pub mod encoding;
pub mod fs;
