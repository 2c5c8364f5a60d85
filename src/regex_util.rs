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

//! Match helpers for the precompiled, crate-owned patterns. Metadata
//! patterns go through [`crate::regexp_cache::RegexCache`] instead, which
//! anchors them properly.

use regex::{Match, Regex};

pub trait RegexConsume {
    fn matches_start(&self, s: &str) -> bool {
        self.find_start(s).is_some()
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;

    /// Returns the rest of `s` after a match at its start.
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.find_start(s).map(|found| &s[found.end()..])
    }
}

impl RegexConsume for Regex {
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        // leftmost match starts at 0 whenever any match does
        self.find(s).filter(|found| found.start() == 0)
    }
}
