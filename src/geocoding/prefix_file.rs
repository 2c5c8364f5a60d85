// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Reader for geocoding prefix files. Each line holds `prefix|description`;
//! blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! # Italy
//! 3902|Milan
//! 3906|Rome
//! ```

use std::{collections::BTreeMap, io::BufRead, num::ParseIntError};

use thiserror::Error;

const MAX_LINE_LENGTH: usize = 2 * 1024;

#[derive(Debug, Error)]
pub enum PrefixFileError {
    #[error("IO error occurred: {0}")]
    IO(#[from] std::io::Error),

    #[error("Line {line_num} is too long (max is {max_len} bytes)")]
    LineTooLong { line_num: usize, max_len: usize },

    #[error("Failed to parse prefix '{prefix}' on line {line_num}: {source}")]
    PrefixParseError {
        line_num: usize,
        prefix: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Prefix '{prefix}' on line {line_num} is negative")]
    NegativePrefix { line_num: usize, prefix: String },
}

/// Reads a prefix table from `reader`. Later lines override earlier ones with
/// the same prefix.
pub fn parse_prefixes<R: BufRead>(mut reader: R) -> Result<BTreeMap<i32, String>, PrefixFileError> {
    let mut prefixes = BTreeMap::new();
    let mut line_buffer = String::with_capacity(MAX_LINE_LENGTH);
    let mut line_number = 0;

    loop {
        line_number += 1;
        line_buffer.clear();

        let bytes_read = reader.read_line(&mut line_buffer)?;
        if bytes_read == 0 {
            break;
        }
        if line_buffer.len() > MAX_LINE_LENGTH {
            return Err(PrefixFileError::LineTooLong {
                line_num: line_number,
                max_len: MAX_LINE_LENGTH,
            });
        }

        let line = line_buffer.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((prefix_str, desc)) = line.split_once('|') {
            if prefix_str.is_empty() {
                continue;
            }
            let prefix_code: i32 = prefix_str.parse().map_err(|e| PrefixFileError::PrefixParseError {
                line_num: line_number,
                prefix: prefix_str.to_string(),
                source: e,
            })?;
            if prefix_code < 0 {
                return Err(PrefixFileError::NegativePrefix {
                    line_num: line_number,
                    prefix: prefix_str.to_string(),
                });
            }
            prefixes.insert(prefix_code, desc.to_string());
        }
    }

    Ok(prefixes)
}
