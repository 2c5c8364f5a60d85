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

use std::collections::{BTreeMap, BTreeSet};

use super::map_storage::{AreaCodeMapStorage, StorageKind, possible_lengths_of, serialized_string_size};

const BYTE_NUM_BYTES: usize = 1;
const SHORT_NUM_BYTES: usize = 2;
const INT_NUM_BYTES: usize = 4;

/// Flyweight area code map storage strategy that uses a table to store unique
/// strings and shorts to store the prefix and description indexes when
/// possible. It is particularly space-efficient when the provided area code
/// map contains a lot of redundant descriptions.
pub(super) struct FlyweightMapStorage {
    num_of_entries: usize,
    /// Size of the stored prefixes, either 2 or 4 bytes.
    prefix_size_in_bytes: usize,
    /// Size of the stored description indexes, 1, 2 or 4 bytes.
    desc_index_size_in_bytes: usize,
    phone_number_prefixes: Vec<u8>,
    description_indexes: Vec<u8>,
    /// Sorted, unique descriptions.
    description_pool: Vec<String>,
    possible_lengths: BTreeSet<usize>,
}

/// Bytes needed to store every prefix of `area_codes`.
fn optimal_prefix_size(area_codes: &BTreeMap<i32, String>) -> usize {
    let fits_in_short = |prefix: Option<&i32>| prefix.is_none_or(|&prefix| i16::try_from(prefix).is_ok());
    if fits_in_short(area_codes.keys().next()) && fits_in_short(area_codes.keys().next_back()) {
        SHORT_NUM_BYTES
    } else {
        INT_NUM_BYTES
    }
}

/// Bytes needed to store an index into a pool of `pool_size` strings.
fn optimal_index_size(pool_size: usize) -> usize {
    let max_index = pool_size.saturating_sub(1);
    if max_index <= i8::MAX as usize {
        BYTE_NUM_BYTES
    } else if max_index <= i16::MAX as usize {
        SHORT_NUM_BYTES
    } else {
        INT_NUM_BYTES
    }
}

fn store_word_in_buffer(buffer: &mut Vec<u8>, word_size: usize, value: i32) {
    match word_size {
        BYTE_NUM_BYTES => buffer.extend_from_slice(&(value as i8).to_le_bytes()),
        SHORT_NUM_BYTES => buffer.extend_from_slice(&(value as i16).to_le_bytes()),
        _ => buffer.extend_from_slice(&value.to_le_bytes()),
    }
}

fn read_word_from_buffer(buffer: &[u8], word_size: usize, index: usize) -> i32 {
    let offset = index * word_size;
    match word_size {
        BYTE_NUM_BYTES => i8::from_le_bytes([buffer[offset]]) as i32,
        SHORT_NUM_BYTES => i16::from_le_bytes([buffer[offset], buffer[offset + 1]]) as i32,
        _ => i32::from_le_bytes([
            buffer[offset],
            buffer[offset + 1],
            buffer[offset + 2],
            buffer[offset + 3],
        ]),
    }
}

fn description_pool_of(area_codes: &BTreeMap<i32, String>) -> BTreeSet<&str> {
    area_codes.values().map(String::as_str).collect()
}

impl FlyweightMapStorage {
    pub(super) fn from_sorted_map(area_codes: &BTreeMap<i32, String>) -> Self {
        let description_pool: Vec<String> = description_pool_of(area_codes)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let num_of_entries = area_codes.len();
        let prefix_size_in_bytes = optimal_prefix_size(area_codes);
        let desc_index_size_in_bytes = optimal_index_size(description_pool.len());

        let mut phone_number_prefixes = Vec::with_capacity(num_of_entries * prefix_size_in_bytes);
        let mut description_indexes = Vec::with_capacity(num_of_entries * desc_index_size_in_bytes);
        for (&prefix, description) in area_codes {
            store_word_in_buffer(&mut phone_number_prefixes, prefix_size_in_bytes, prefix);
            // The pool was built from these very values.
            let index = description_pool
                .binary_search_by(|pooled| pooled.as_str().cmp(description))
                .unwrap_or_default();
            store_word_in_buffer(&mut description_indexes, desc_index_size_in_bytes, index as i32);
        }

        Self {
            num_of_entries,
            prefix_size_in_bytes,
            desc_index_size_in_bytes,
            phone_number_prefixes,
            description_indexes,
            description_pool,
            possible_lengths: possible_lengths_of(area_codes),
        }
    }

    /// Bytes needed to serialize the table in this layout: both word sizes,
    /// the lengths, the pool of unique descriptions, then every entry as a
    /// packed prefix and pool index.
    pub(super) fn estimated_size(area_codes: &BTreeMap<i32, String>) -> usize {
        let description_pool = description_pool_of(area_codes);
        let prefix_size = optimal_prefix_size(area_codes);
        let index_size = optimal_index_size(description_pool.len());
        let pool_size: usize = description_pool
            .iter()
            .map(|description| serialized_string_size(description))
            .sum();
        16 + 4 * possible_lengths_of(area_codes).len()
            + 4
            + pool_size
            + area_codes.len() * (prefix_size + index_size)
    }
}

impl AreaCodeMapStorage for FlyweightMapStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Flyweight
    }

    fn num_of_entries(&self) -> usize {
        self.num_of_entries
    }

    fn possible_lengths(&self) -> &BTreeSet<usize> {
        &self.possible_lengths
    }

    fn prefix(&self, index: usize) -> i32 {
        read_word_from_buffer(&self.phone_number_prefixes, self.prefix_size_in_bytes, index)
    }

    fn description(&self, index: usize) -> &str {
        let index_in_pool =
            read_word_from_buffer(&self.description_indexes, self.desc_index_size_in_bytes, index);
        &self.description_pool[index_in_pool as usize]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{AreaCodeMapStorage, FlyweightMapStorage};

    fn flyweight_candidate() -> BTreeMap<i32, String> {
        BTreeMap::from([
            (1212, "New York".to_string()),
            (1213, "New York".to_string()),
            (1214, "New York".to_string()),
            (1480, "Arizona".to_string()),
        ])
    }

    #[test]
    fn shares_repeated_descriptions() {
        let storage = FlyweightMapStorage::from_sorted_map(&flyweight_candidate());
        assert_eq!(storage.num_of_entries(), 4);
        assert_eq!(storage.description_pool.len(), 2);
        assert_eq!(storage.prefix_size_in_bytes, 2);
        assert_eq!(storage.desc_index_size_in_bytes, 1);
        assert_eq!(storage.prefix(1), 1213);
        assert_eq!(storage.description(1), "New York");
        assert_eq!(storage.prefix(3), 1480);
        assert_eq!(storage.description(3), "Arizona");
    }

    #[test]
    fn wide_prefixes_use_four_bytes() {
        let area_codes = BTreeMap::from([(33, "France".to_string()), (1650345, "San Mateo, CA".to_string())]);
        let storage = FlyweightMapStorage::from_sorted_map(&area_codes);
        assert_eq!(storage.prefix_size_in_bytes, 4);
        assert_eq!(storage.prefix(0), 33);
        assert_eq!(storage.prefix(1), 1650345);
        assert_eq!(storage.description(1), "San Mateo, CA");
    }

    #[test]
    fn size_estimate_counts_unique_descriptions_once() {
        // 16 + 4 + 4 + (2 + 7) + (2 + 8) + 4 * (2 + 1)
        assert_eq!(FlyweightMapStorage::estimated_size(&flyweight_candidate()), 55);
    }
}
