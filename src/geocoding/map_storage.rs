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

/// Which storage strategy an [`super::AreaCodeMap`] picked for its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Parallel arrays of prefixes and descriptions.
    Default,
    /// Byte-packed prefixes with indexes into a pool of unique descriptions.
    Flyweight,
}

/// Read access to a sorted prefix table. Entries are indexed in ascending
/// prefix order.
pub(super) trait AreaCodeMapStorage: Send + Sync {
    fn kind(&self) -> StorageKind;

    fn num_of_entries(&self) -> usize;

    /// Distinct prefix lengths (in digits) present in the table.
    fn possible_lengths(&self) -> &BTreeSet<usize>;

    fn prefix(&self, index: usize) -> i32;

    fn description(&self, index: usize) -> &str;
}

/// Number of decimal digits of a prefix. Prefixes are never negative.
pub(super) fn prefix_length(prefix: i32) -> usize {
    let mut buf = itoa::Buffer::new();
    buf.format(prefix).len()
}

pub(super) fn possible_lengths_of(area_codes: &BTreeMap<i32, String>) -> BTreeSet<usize> {
    area_codes.keys().map(|&prefix| prefix_length(prefix)).collect()
}

/// Length of a description when written as a length-prefixed UTF string.
pub(super) fn serialized_string_size(description: &str) -> usize {
    2 + description.len()
}
