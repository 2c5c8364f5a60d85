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

use dashmap::DashMap;
use regex::{Captures, Match, Regex};
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// How a cached pattern is anchored when it is compiled.
#[derive(Debug, Clone, Copy)]
enum Anchoring {
    None,
    /// Java's `lookingAt`: the match must begin at the first byte.
    Start,
    /// Java's `matches`: the whole haystack must be consumed.
    Full,
}

/// Thread-safe cache of compiled patterns, keyed by the pattern text as it
/// appears in metadata.
///
/// Metadata patterns are alternations such as `\d{7}|\d{10}`; `regex` picks
/// the leftmost-first branch, so a full match can only be tested reliably
/// against a pattern that carries its own `^...$` anchors. Each anchoring
/// therefore gets a separate map.
pub struct RegexCache {
    cache: DashMap<String, Arc<Regex>>,
    start_anchored: DashMap<String, Arc<Regex>>,
    fully_anchored: DashMap<String, Arc<Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
            start_anchored: DashMap::with_capacity(capacity),
            fully_anchored: DashMap::with_capacity(capacity),
        }
    }

    fn get_anchored(&self, pattern: &str, anchoring: Anchoring) -> Result<Arc<Regex>, InvalidRegexError> {
        let map = match anchoring {
            Anchoring::None => &self.cache,
            Anchoring::Start => &self.start_anchored,
            Anchoring::Full => &self.fully_anchored,
        };
        if let Some(regex) = map.get(pattern) {
            return Ok(regex.value().clone());
        }
        // Two threads may compile the same pattern; `or_try_insert_with` keeps
        // whichever lands first and both callers see the same entry.
        let entry = map.entry(pattern.to_string()).or_try_insert_with(|| {
            let source = match anchoring {
                Anchoring::None => Regex::new(pattern),
                Anchoring::Start => Regex::new(&fast_cat::concat_str!("^(?:", pattern, ")")),
                Anchoring::Full => Regex::new(&fast_cat::concat_str!("^(?:", pattern, ")$")),
            };
            source.map(Arc::new)
        })?;
        Ok(entry.value().clone())
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        self.get_anchored(pattern, Anchoring::None)
    }

    /// Compiles the pattern in every anchoring form so later lookups are
    /// cache hits.
    pub fn warm_up(&self, pattern: &str) -> Result<(), InvalidRegexError> {
        self.get_anchored(pattern, Anchoring::None)?;
        self.get_anchored(pattern, Anchoring::Start)?;
        self.get_anchored(pattern, Anchoring::Full)?;
        Ok(())
    }

    pub fn full_match(&self, pattern: &str, s: &str) -> Result<bool, InvalidRegexError> {
        Ok(self.get_anchored(pattern, Anchoring::Full)?.is_match(s))
    }

    pub fn matches_start(&self, pattern: &str, s: &str) -> Result<bool, InvalidRegexError> {
        Ok(self.get_anchored(pattern, Anchoring::Start)?.is_match(s))
    }

    pub fn find_start<'h>(&self, pattern: &str, s: &'h str) -> Result<Option<Match<'h>>, InvalidRegexError> {
        Ok(self.get_anchored(pattern, Anchoring::Start)?.find(s))
    }

    pub fn captures_start<'h>(&self, pattern: &str, s: &'h str) -> Result<Option<Captures<'h>>, InvalidRegexError> {
        Ok(self.get_anchored(pattern, Anchoring::Start)?.captures(s))
    }

    /// Like [`Self::get_regex`], anchored at the start. Used when the caller
    /// needs `replace` semantics on a prefix match.
    pub fn get_start_anchored_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        self.get_anchored(pattern, Anchoring::Start)
    }

    pub fn get_fully_anchored_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        self.get_anchored(pattern, Anchoring::Full)
    }
}
