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

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// Reasons a set of [`super::PhoneMetadata`] records is refused by
/// [`super::MetadataRegistry::from_metadata`].
#[derive(Debug, PartialEq, Error)]
pub enum MetadataError {
    #[error("Region {0} is defined more than once")]
    DuplicateRegion(String),

    #[error("Non-geographical calling code {0} is defined more than once")]
    DuplicateNonGeographicalEntity(i32),

    #[error("Calling code {country_code} has more than one main region ({first}, {second})")]
    SeveralMainRegions {
        country_code: i32,
        first: String,
        second: String,
    },

    #[error("Calling code {country_code} is shared by {regions:?} but none is the main region")]
    NoMainRegion {
        country_code: i32,
        regions: Vec<String>,
    },

    #[error("Region {region} carries an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        region: String,
        pattern: String,
        #[source]
        source: InvalidRegexError,
    },
}
