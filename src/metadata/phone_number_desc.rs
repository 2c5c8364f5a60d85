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

/// Describes one category of numbers (fixed line, mobile, toll free, ...)
/// inside a region.
///
/// A description without a national number pattern matches no number at
/// all, which is how "this region has no numbers of this type" is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumberDesc {
    pub(crate) national_number_pattern: Option<String>,
    /// Sorted and deduplicated. Empty means "same as the general description".
    pub(crate) possible_lengths: Vec<usize>,
    pub(crate) example_number: Option<String>,
}

impl PhoneNumberDesc {
    pub fn builder() -> PhoneNumberDescBuilder {
        PhoneNumberDescBuilder::default()
    }

    pub fn national_number_pattern(&self) -> &str {
        self.national_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    pub fn possible_lengths(&self) -> &[usize] {
        &self.possible_lengths
    }

    pub fn example_number(&self) -> &str {
        self.example_number.as_deref().unwrap_or("")
    }

    pub fn has_example_number(&self) -> bool {
        self.example_number.is_some()
    }

    /// Returns `true` if there is any data set for this description.
    pub(crate) fn has_data(&self) -> bool {
        self.has_example_number()
            || !self.possible_lengths.is_empty()
            || self.has_national_number_pattern()
    }
}

#[derive(Debug, Default)]
pub struct PhoneNumberDescBuilder {
    desc: PhoneNumberDesc,
}

impl PhoneNumberDescBuilder {
    pub fn national_number_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.desc.national_number_pattern = Some(pattern.into());
        self
    }

    pub fn possible_lengths(mut self, lengths: impl IntoIterator<Item = usize>) -> Self {
        self.desc.possible_lengths.extend(lengths);
        self
    }

    pub fn example_number(mut self, example: impl Into<String>) -> Self {
        self.desc.example_number = Some(example.into());
        self
    }

    pub fn build(mut self) -> PhoneNumberDesc {
        self.desc.possible_lengths.sort_unstable();
        self.desc.possible_lengths.dedup();
        self.desc
    }
}
