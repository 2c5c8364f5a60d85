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

use std::collections::{HashMap, HashSet, VecDeque};

use log::{trace, warn};

use crate::{
    i18n,
    phonenumberutil::helper_constants::{NANPA_COUNTRY_CODE, REGION_CODE_FOR_NON_GEO_ENTITY},
    regexp_cache::RegexCache,
};

use super::{MetadataError, PhoneMetadata};

/// Immutable store of every region's dialing rules.
///
/// Built once from a list of [`PhoneMetadata`] records and then shared
/// (usually behind an `Arc`) by the phone number utility and any other
/// component that needs it. It also owns the compiled-pattern cache; every
/// metadata pattern is compiled while the registry is built, so lookups
/// during parsing and formatting never fail on a bad regex.
pub struct MetadataRegistry {
    /// A mapping from a country calling code to the region codes which denote
    /// the regions represented by that country calling code. The main region
    /// for a shared code comes first (regions under NANPA share 1 and "US" is
    /// listed first). Sorted by calling code for binary search.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,

    /// A mapping from a region code to a PhoneMetadata for that region.
    region_to_metadata_map: HashMap<String, PhoneMetadata>,

    /// A mapping from a country calling code for a non-geographical entity to the
    /// PhoneMetadata for that country calling code. Examples of the country
    /// calling codes include 800 (International Toll Free Service) and 808
    /// (International Shared Cost Service).
    country_code_to_non_geographical_metadata_map: HashMap<i32, PhoneMetadata>,

    regex_cache: RegexCache,
}

impl MetadataRegistry {
    pub fn from_metadata(
        metadata_collection: impl IntoIterator<Item = PhoneMetadata>,
    ) -> Result<Self, MetadataError> {
        let mut registry = Self {
            country_calling_code_to_region_code_map: Vec::new(),
            nanpa_regions: HashSet::new(),
            region_to_metadata_map: HashMap::new(),
            country_code_to_non_geographical_metadata_map: HashMap::new(),
            regex_cache: RegexCache::with_capacity(512),
        };
        // Storing data in a temporary map to make it easier to find other regions
        // that share a country calling code when inserting data.
        let mut country_calling_code_to_region_map = HashMap::<i32, VecDeque<String>>::new();
        let mut main_regions = HashMap::<i32, String>::new();

        for metadata in metadata_collection {
            let region_code = metadata.id().to_owned();
            if i18n::RegionCode::get_unknown() == region_code {
                warn!("Skipping metadata for the unknown region");
                continue;
            }
            registry.warm_up_patterns(&metadata)?;

            let country_calling_code = metadata.country_code();
            let main_country_for_code = metadata.main_country_for_code();
            if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
                if registry
                    .country_code_to_non_geographical_metadata_map
                    .insert(country_calling_code, metadata)
                    .is_some()
                {
                    return Err(MetadataError::DuplicateNonGeographicalEntity(country_calling_code));
                }
            } else if registry
                .region_to_metadata_map
                .insert(region_code.clone(), metadata)
                .is_some()
            {
                return Err(MetadataError::DuplicateRegion(region_code));
            }

            if main_country_for_code {
                if let Some(first) = main_regions.insert(country_calling_code, region_code.clone()) {
                    return Err(MetadataError::SeveralMainRegions {
                        country_code: country_calling_code,
                        first,
                        second: region_code,
                    });
                }
            }

            if country_calling_code == NANPA_COUNTRY_CODE {
                registry.nanpa_regions.insert(region_code.clone());
            }

            let regions = country_calling_code_to_region_map
                .entry(country_calling_code)
                .or_default();
            // A non-geographical entity never shares its code with a region.
            if main_country_for_code {
                regions.push_front(region_code);
            } else {
                regions.push_back(region_code);
            }
        }

        if let Some((&country_code, regions)) = country_calling_code_to_region_map
            .iter()
            .find(|(code, regions)| regions.len() > 1 && !main_regions.contains_key(*code))
        {
            return Err(MetadataError::NoMainRegion {
                country_code,
                regions: Vec::from(regions.clone()),
            });
        }

        registry.country_calling_code_to_region_code_map.extend(
            country_calling_code_to_region_map
                .into_iter()
                .map(|(code, regions)| (code, Vec::from(regions))),
        );
        // Sort all the pairs in ascending order according to country calling code.
        registry
            .country_calling_code_to_region_code_map
            .sort_by_key(|(code, _)| *code);
        trace!(
            "Metadata registry built for {} regions and {} non-geographical entities",
            registry.region_to_metadata_map.len(),
            registry.country_code_to_non_geographical_metadata_map.len()
        );
        Ok(registry)
    }

    fn warm_up_patterns(&self, metadata: &PhoneMetadata) -> Result<(), MetadataError> {
        for pattern in metadata.patterns() {
            self.regex_cache
                .warm_up(pattern)
                .map_err(|source| MetadataError::InvalidPattern {
                    region: metadata.id().to_owned(),
                    pattern: pattern.to_owned(),
                    source,
                })?;
        }
        Ok(())
    }

    pub(crate) fn regex_cache(&self) -> &RegexCache {
        &self.regex_cache
    }

    pub fn supported_regions(&self) -> impl Iterator<Item = &str> {
        self.region_to_metadata_map.keys().map(String::as_str)
    }

    pub fn supported_global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_code_to_non_geographical_metadata_map.keys().copied()
    }

    pub fn supported_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
    }

    pub fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.region_to_metadata_map.get(region_code)
    }

    pub fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<&PhoneMetadata> {
        self.country_code_to_non_geographical_metadata_map
            .get(&country_calling_code)
    }

    pub fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<&PhoneMetadata> {
        if REGION_CODE_FOR_NON_GEO_ENTITY == region_code {
            self.get_metadata_for_non_geographical_region(country_calling_code)
        } else {
            self.get_metadata_for_region(region_code)
        }
    }

    /// Returns the region codes that match the specific country calling code,
    /// main region first. Empty if the code is unknown.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the main region code for the calling code, or `ZZ`.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .first()
            .map(String::as_str)
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    pub fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    pub fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.region_to_metadata_map.contains_key(region_code)
    }

    pub fn is_nanpa_region(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }
}
