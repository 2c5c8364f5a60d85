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

/// Default area code map storage strategy that is used for data not containing
/// any repetitions of descriptions.
pub(super) struct DefaultMapStorage {
    phone_number_prefixes: Vec<i32>,
    descriptions: Vec<String>,
    possible_lengths: BTreeSet<usize>,
}

impl DefaultMapStorage {
    pub(super) fn from_sorted_map(area_codes: &BTreeMap<i32, String>) -> Self {
        Self {
            phone_number_prefixes: area_codes.keys().copied().collect(),
            descriptions: area_codes.values().cloned().collect(),
            possible_lengths: possible_lengths_of(area_codes),
        }
    }

    /// Bytes needed to serialize the table in this layout: the entry count,
    /// every prefix as an int with its description, then the lengths.
    pub(super) fn estimated_size(area_codes: &BTreeMap<i32, String>) -> usize {
        let entries: usize = area_codes
            .values()
            .map(|description| 4 + serialized_string_size(description))
            .sum();
        4 + entries + 4 + 4 * possible_lengths_of(area_codes).len()
    }
}

impl AreaCodeMapStorage for DefaultMapStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Default
    }

    fn num_of_entries(&self) -> usize {
        self.phone_number_prefixes.len()
    }

    fn possible_lengths(&self) -> &BTreeSet<usize> {
        &self.possible_lengths
    }

    fn prefix(&self, index: usize) -> i32 {
        self.phone_number_prefixes[index]
    }

    fn description(&self, index: usize) -> &str {
        &self.descriptions[index]
    }
}
