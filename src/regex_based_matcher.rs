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

use std::sync::Arc;

use log::error;

use crate::{
    interfaces,
    metadata::{MetadataRegistry, PhoneNumberDesc},
    regexp_cache::InvalidRegexError,
};

/// Matches national numbers against description patterns through the
/// registry's compiled-pattern cache.
pub struct RegexBasedMatcher {
    registry: Arc<MetadataRegistry>,
}

impl RegexBasedMatcher {
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self { registry }
    }

    fn match_number(
        &self,
        phone_number: &str,
        number_pattern: &str,
        allow_prefix_match: bool,
    ) -> Result<bool, InvalidRegexError> {
        let cache = self.registry.regex_cache();
        if allow_prefix_match {
            cache.matches_start(number_pattern, phone_number)
        } else {
            cache.full_match(number_pattern, phone_number)
        }
    }
}

impl interfaces::MatcherApi for RegexBasedMatcher {
    fn match_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool,
    ) -> bool {
        let national_number_pattern = number_desc.national_number_pattern();
        // We don't want to consider it a prefix match when matching non-empty input
        // against an empty pattern.
        if national_number_pattern.is_empty() {
            return false;
        }
        match self.match_number(number, national_number_pattern, allow_prefix_match) {
            Ok(res) => res,
            Err(err) => {
                error!("Invalid regex! {}: {}", national_number_pattern, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        interfaces::MatcherApi,
        metadata::{MetadataRegistry, PhoneNumberDesc},
    };

    use super::RegexBasedMatcher;

    #[test]
    fn full_and_prefix_matching() {
        let matcher = RegexBasedMatcher::new(Arc::new(MetadataRegistry::from_metadata([]).unwrap()));
        let desc = PhoneNumberDesc::builder().national_number_pattern("4\\d{5}|4").build();
        assert!(matcher.match_national_number("412345", &desc, false));
        assert!(matcher.match_national_number("4", &desc, false));
        assert!(!matcher.match_national_number("41234", &desc, false));
        assert!(matcher.match_national_number("41234", &desc, true));

        // An empty pattern matches nothing, not even as a prefix.
        assert!(!matcher.match_national_number("", &PhoneNumberDesc::default(), true));
    }
}
