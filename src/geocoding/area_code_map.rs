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

use std::collections::BTreeMap;

use log::trace;

use super::{
    default_map_storage::DefaultMapStorage,
    flyweight_map_storage::FlyweightMapStorage,
    map_storage::{AreaCodeMapStorage, StorageKind},
};
use crate::{phonenumber::PhoneNumber, phonenumberutil::helper_functions::national_significant_number};

/// A utility that maps phone number prefixes to a description string, which
/// may be, for example, the geographical area the prefix covers.
///
/// Prefixes include the country calling code: `1650` stands for numbers of
/// the form +1 650.... Lookups return the description of the longest stored
/// prefix of the number.
pub struct AreaCodeMap {
    storage: Box<dyn AreaCodeMapStorage>,
}

impl AreaCodeMap {
    /// Builds the map, keeping whichever storage strategy takes less space for
    /// this table.
    pub fn new(area_codes: &BTreeMap<i32, String>) -> Self {
        let flyweight_size = FlyweightMapStorage::estimated_size(area_codes);
        let default_size = DefaultMapStorage::estimated_size(area_codes);
        let storage: Box<dyn AreaCodeMapStorage> = if flyweight_size < default_size {
            Box::new(FlyweightMapStorage::from_sorted_map(area_codes))
        } else {
            Box::new(DefaultMapStorage::from_sorted_map(area_codes))
        };
        trace!(
            "Area code map of {} entries stored as {:?} ({} bytes, the other strategy needs {})",
            area_codes.len(),
            storage.kind(),
            flyweight_size.min(default_size),
            flyweight_size.max(default_size),
        );
        Self { storage }
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    pub fn len(&self) -> usize {
        self.storage.num_of_entries()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the description of the geographical area the number corresponds
    /// to. Italian leading zeros of the number are part of the looked up digits.
    pub fn lookup(&self, number: &PhoneNumber) -> Option<&str> {
        let num_of_entries = self.storage.num_of_entries();
        if num_of_entries == 0 {
            return None;
        }
        let mut buf = itoa::Buffer::new();
        let national_number = national_significant_number(number);
        let phone_prefix = fast_cat::concat_str!(buf.format(number.country_code()), national_number.as_str());

        let mut current_index = num_of_entries - 1;
        for &possible_length in self.storage.possible_lengths().iter().rev() {
            if possible_length > phone_prefix.len() {
                continue;
            }
            // Prefixes are at most ten digits long, so they fit an i64 easily.
            let Ok(truncated_prefix) = phone_prefix[..possible_length].parse::<i64>() else {
                return None;
            };
            current_index = self.binary_search(0, current_index, truncated_prefix)?;
            if i64::from(self.storage.prefix(current_index)) == truncated_prefix {
                return Some(self.storage.description(current_index));
            }
        }
        None
    }

    /// Does a binary search for `value` in the prefixes between `start` and
    /// `end` (inclusive). Returns the position of `value` if found; otherwise,
    /// returns the position of the largest prefix smaller than it, or `None`
    /// if every prefix in range is bigger.
    fn binary_search(&self, start: usize, end: usize, value: i64) -> Option<usize> {
        let (mut low, mut high) = (start, end + 1);
        while low < high {
            let mid = low + (high - low) / 2;
            let current_value = i64::from(self.storage.prefix(mid));
            if current_value == value {
                return Some(mid);
            } else if current_value > value {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
        low.checked_sub(1)
    }
}
