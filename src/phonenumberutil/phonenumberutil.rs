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

use std::{collections::HashSet, sync::Arc};

use log::{trace, warn};

use super::{
    PhoneNumberFormat, PhoneNumberType,
    errors::{GetExampleNumberError, GetExampleNumberErrorInternal, RegexResultExt, ValidationError},
    helper_constants::{MIN_LENGTH_FOR_NSN, PLUS_SIGN, REGION_CODE_FOR_NON_GEO_ENTITY},
    helper_functions::{
        get_number_desc_by_type, get_supported_types_for_metadata, national_significant_number,
        test_number_length,
    },
    phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
};
use crate::{
    i18n,
    interfaces::MatcherApi,
    metadata::{MetadataRegistry, PhoneMetadata, PhoneNumberDesc},
    phonenumber::PhoneNumber,
    regex_based_matcher::RegexBasedMatcher,
    regexp_cache::InvalidRegexError,
};

/// Parses, formats, validates and compares phone numbers against the rules of
/// a [`MetadataRegistry`].
///
/// The utility is cheap to share: wrap it in an `Arc` or keep one per
/// registry. All operations take `&self`.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    pub(super) matcher_api: Box<dyn MatcherApi>,

    /// Helper class holding useful regular expressions and character mappings.
    pub(super) reg_exps: PhoneNumberRegExpsAndMappings,

    /// Dialing rules of every supported region, together with the cache of
    /// compiled metadata patterns.
    pub(super) registry: Arc<MetadataRegistry>,
}

impl PhoneNumberUtil {
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new(registry.clone())),
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<MetadataRegistry> {
        &self.registry
    }

    /// Returns all regions the library has metadata for.
    pub fn get_supported_regions(&self) -> impl Iterator<Item = &str> {
        self.registry.supported_regions()
    }

    /// Returns all global network calling codes the library has metadata for.
    pub fn get_supported_global_network_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.registry.supported_global_network_calling_codes()
    }

    /// Returns all country calling codes the library has metadata for, covering
    /// both non-geographical entities (global network calling codes) and those
    /// used for geographical entities.
    pub fn get_supported_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.registry.supported_calling_codes()
    }

    /// Returns the types for a given region which the library has metadata for.
    /// Will not include FixedLineOrMobile (if numbers for this non-geographical
    /// entity could be classified as FixedLineOrMobile, both FixedLine and
    /// Mobile would be present) and Unknown.
    ///
    /// No types will be returned for invalid or unknown region codes.
    pub fn get_supported_types_for_region(&self, region_code: &str) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code provided: {}", region_code);
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    /// Returns the types for a country-code belonging to a non-geographical
    /// entity which the library has metadata for.
    ///
    /// No types will be returned for country calling codes that do not map to a
    /// known non-geographical entity.
    pub fn get_supported_types_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self
            .registry
            .get_metadata_for_non_geographical_region(country_calling_code)
        else {
            warn!("Unknown country calling code for a non-geographical entity provided: {}", country_calling_code);
            return None;
        };
        Some(get_supported_types_for_metadata(metadata))
    }

    pub fn get_metadata_for_region(&self, region_code: &str) -> Option<&PhoneMetadata> {
        self.registry.get_metadata_for_region(region_code)
    }

    pub fn get_metadata_for_non_geographical_region(&self, country_calling_code: i32) -> Option<&PhoneMetadata> {
        self.registry.get_metadata_for_non_geographical_region(country_calling_code)
    }

    /// Returns the country calling code for a specific region. For example,
    /// this would be 1 for the United States, and 64 for New Zealand. Returns 0
    /// for an invalid region code.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            warn!("Invalid or missing region code ({}) provided", region_code);
            return 0;
        };
        metadata.country_code()
    }

    /// Returns the region code that matches the specific country calling code. In
    /// the case of no region code being found, the unknown region code will be
    /// returned. Where several regions share the code, the main one is returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.registry.get_region_code_for_country_code(country_calling_code)
    }

    /// Returns the region codes that matches the specific country calling code.
    /// In the case of no region code being found, the list is empty.
    pub fn get_region_codes_for_country_calling_code(&self, country_calling_code: i32) -> &[String] {
        self.registry.get_region_codes_for_country_calling_code(country_calling_code)
    }

    /// Checks if this region is a NANPA region. Returns false if it is not, or
    /// if the region code is invalid or unknown.
    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.registry.is_nanpa_region(region_code)
    }

    /// Checks whether the country calling code is from a region whose national
    /// significant number could contain a leading zero. An example of such a
    /// region is Italy. Returns false if no metadata for the country is found.
    pub fn is_leading_zero_possible(&self, country_calling_code: i32) -> bool {
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        self.registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
            .is_some_and(PhoneMetadata::leading_zero_possible)
    }

    /// Returns the national dialling prefix for a specific region. For example,
    /// this would be 1 for the United States, and 0 for New Zealand. Set
    /// `strip_non_digits` to true to strip symbols like "~" (which indicates a
    /// wait for a dialling tone) from the prefix returned. If no national prefix
    /// is present, `None` is returned.
    pub fn get_ndd_prefix_for_region(&self, region_code: &str, strip_non_digits: bool) -> Option<String> {
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            warn!("Invalid or missing region code ({}) provided", region_code);
            return None;
        };
        let national_prefix = metadata.national_prefix();
        // If no national prefix was found, we return None.
        if national_prefix.is_empty() {
            return None;
        }
        if strip_non_digits {
            // Note: if any other non-numeric symbols are ever used in national
            // prefixes, these would have to be removed here as well.
            return Some(national_prefix.replace('~', ""));
        }
        Some(national_prefix.to_owned())
    }

    /// Gets the national significant number of a phone number. Note a national
    /// significant number doesn't contain a national prefix or any formatting.
    pub fn get_national_significant_number(&self, phone_number: &PhoneNumber) -> String {
        national_significant_number(phone_number)
    }

    /// Gets the type of a valid phone number.
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata)
    }

    /// Tests whether a phone number matches a valid pattern. Note this doesn't
    /// verify the number is actually in use, which is impossible to tell by just
    /// looking at a number itself.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. Note this
    /// doesn't verify the number is actually in use, which is impossible to tell
    /// by just looking at a number itself. If the country calling code is not the
    /// same as the country calling code for the region, this immediately exits
    /// with false. After this, the specific number pattern rules for the region
    /// are examined.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code && country_code != metadata.country_code() {
            // Either the region code was invalid, or the country calling code for
            // this number does not match that of the region code.
            return false;
        }
        let national_significant_number = national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, metadata) != PhoneNumberType::Unknown
    }

    /// Returns the region where a phone number is from. This could be used for
    /// geocoding at the region level. Only guarantees correct results for valid,
    /// full numbers (not short-codes, or invalid numbers).
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> &str {
        let country_calling_code = phone_number.country_code();
        let region_codes = self
            .registry
            .get_region_codes_for_country_calling_code(country_calling_code);
        match region_codes {
            [] => {
                trace!("Missing/invalid country calling code ({})", country_calling_code);
                i18n::RegionCode::get_unknown()
            }
            [region_code] => region_code,
            _ => self
                .get_region_code_for_number_from_region_list(phone_number, region_codes)
                .into_public(),
        }
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &'b [String],
    ) -> Result<&'b str, InvalidRegexError> {
        let national_number = national_significant_number(phone_number);
        for region_code in region_codes {
            // Metadata cannot be missing because the region codes come from the
            // country calling code map.
            let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
                continue;
            };
            if let Some(leading_digits) = metadata.leading_digits() {
                if self
                    .registry
                    .regex_cache()
                    .matches_start(leading_digits, &national_number)?
                {
                    return Ok(region_code);
                }
            } else if self.get_number_type_helper(&national_number, metadata) != PhoneNumberType::Unknown {
                return Ok(region_code);
            }
        }
        Ok(i18n::RegionCode::get_unknown())
    }

    pub(super) fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!("Number '{national_number}' type unknown - doesn't match general national number pattern");
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!("Number '{national_number}': fixed-line and mobile patterns equal, number is fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, &metadata.mobile) {
                trace!("Number '{national_number}': Fixed-line and mobile patterns differ, but number is still fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if certain
        // that the patterns for mobile and fixed line aren't the same.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!("Number '{national_number}' type unknown - doesn't match any specific number type pattern.");
        PhoneNumberType::Unknown
    }

    pub(super) fn is_number_matching_desc(&self, national_number: &str, number_desc: &PhoneNumberDesc) -> bool {
        // Check if any possible number lengths are present; if so, we use them to
        // avoid checking the validation pattern if they don't match. If they are
        // absent, this means they match the general description, which we have
        // already checked before checking a specific number type.
        let possible_lengths = number_desc.possible_lengths();
        if !possible_lengths.is_empty() && !possible_lengths.contains(&national_number.len()) {
            return false;
        }
        self.matcher_api
            .match_national_number(national_number, number_desc, false)
    }

    /// Convenience wrapper around [`Self::is_possible_number_with_reason`].
    /// Instead of returning the reason for failure, this method returns true if
    /// the number is either a possible fully-qualified number (containing the
    /// area code and country code), or if the number could be a possible local
    /// number (with a country code, but missing an area code).
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Check whether a phone number is a possible number. It provides a more
    /// lenient check than [`Self::is_valid_number`] in the following sense:
    ///   1. It only checks the length of phone numbers. In particular, it doesn't
    ///      check starting digits of the number.
    ///   2. It doesn't attempt to figure out the type of the number, but uses
    ///      general rules which applies to all types of phone numbers in a
    ///      region. Therefore, it is much faster than is_valid_number.
    ///   3. For fixed line numbers, many regions have the concept of area code,
    ///      which together with subscriber number constitute the national
    ///      significant number. It is sometimes okay to dial the subscriber
    ///      number only when dialing in the same area. This function will return
    ///      Ok if the subscriber-number-only version is passed in. On the other
    ///      hand, because is_valid_number validates using information on both
    ///      starting digits (for fixed line numbers, that would most likely be
    ///      area codes) and length (obviously includes the length of area codes
    ///      for fixed line numbers), it will return false for the
    ///      subscriber-number-only version.
    pub fn is_possible_number_with_reason(&self, phone_number: &PhoneNumber) -> Result<(), ValidationError> {
        let national_number = national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: For regions that share a country calling code, like NANPA numbers,
        // we just use the rules from the default region (US in this case) since the
        // get_region_code_for_number will not work if the number is possible but
        // not valid. This would need to be revisited if the possible number pattern
        // ever differed between various regions within those plans.
        if !self.registry.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.registry.get_region_code_for_country_code(country_code);
        // Metadata cannot be missing because the country calling code is valid.
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length(&national_number, metadata)
    }

    /// Checks whether a phone number is a possible number given a number in the
    /// form of a string, and the region where the number could be dialed from.
    /// It provides a more lenient check than [`Self::is_valid_number`]. See
    /// [`Self::is_possible_number_with_reason`] for details.
    ///
    /// This method first parses the number, then invokes is_possible_number with
    /// the resultant PhoneNumber object. Returns false if parsing fails.
    pub fn is_possible_number_for_string(&self, number: &str, region_dialing_from: &str) -> bool {
        match self.parse(number, region_dialing_from) {
            Ok(phone_number) => self.is_possible_number(&phone_number),
            Err(err) => {
                trace!("Could not parse '{}' for a possibility check: {}", number, err);
                false
            }
        }
    }

    /// Attempts to extract a valid number from a phone number that is too long
    /// to be valid, and resets the PhoneNumber object passed in to that valid
    /// version. If no valid number could be extracted, the PhoneNumber object
    /// passed in will not be modified. Returns true if a valid phone number can
    /// be successfully extracted.
    pub fn truncate_too_long_number(&self, phone_number: &mut PhoneNumber) -> bool {
        if self.is_valid_number(phone_number) {
            return true;
        }
        let mut number_copy = phone_number.clone();
        let mut national_number = phone_number.national_number();
        loop {
            national_number /= 10;
            number_copy = number_copy.to_builder().national_number(national_number).build();
            if national_number == 0
                || self.is_possible_number_with_reason(&number_copy) == Err(ValidationError::TooShort)
            {
                return false;
            }
            if self.is_valid_number(&number_copy) {
                break;
            }
        }
        *phone_number = phone_number.to_builder().national_number(national_number).build();
        true
    }

    /// Returns the mobile token for the provided country calling code if it has
    /// one, otherwise returns `None`. A mobile token is a number inserted before
    /// the area code when dialing a mobile number from that country from abroad.
    pub fn get_country_mobile_token(&self, country_calling_code: i32) -> Option<char> {
        self.reg_exps
            .mobile_token_mappings
            .get(&country_calling_code)
            .copied()
    }

    /// Tests whether a phone number has a geographical association. It checks if
    /// the number is associated with a certain region in the country to which it
    /// belongs. Note that this doesn't verify if the number is actually in use.
    pub fn is_number_geographical(&self, phone_number: &PhoneNumber) -> bool {
        self.is_number_type_geographical(self.get_number_type(phone_number), phone_number.country_code())
    }

    /// Overload of is_number_geographical(PhoneNumber), since calculating the
    /// phone number type is expensive; if we have already done this, we don't
    /// want to do it again.
    pub fn is_number_type_geographical(&self, phone_number_type: PhoneNumberType, country_calling_code: i32) -> bool {
        matches!(
            phone_number_type,
            PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile
        ) || (self.reg_exps.geo_mobile_countries.contains(&country_calling_code)
            && phone_number_type == PhoneNumberType::Mobile)
    }

    /// Gets the length of the geographical area code from the national_number
    /// field of the PhoneNumber object passed in, so that clients could use it to
    /// split a national significant number into geographical area code and
    /// subscriber number. It works in such a way that the resultant subscriber
    /// number should be diallable, at least on some devices.
    ///
    /// Returns 0 if the number has no area code: it is not geographical, it
    /// belongs to a non-geographical entity, or its region has no national
    /// prefix and the number has no italian leading zero.
    pub fn get_length_of_geographical_area_code(&self, phone_number: &PhoneNumber) -> usize {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            return 0;
        };
        let phone_number_type = self.get_number_type(phone_number);
        let country_calling_code = phone_number.country_code();
        if phone_number_type == PhoneNumberType::Mobile
            // Note this is a rough heuristic; it doesn't cover Indonesia well, for
            // example, where area codes are present for some mobile phones but not
            // for others. We have no better way of representing this in the
            // metadata at this point.
            && self
                .reg_exps
                .geo_mobile_countries_without_mobile_area_codes
                .contains(&country_calling_code)
        {
            return 0;
        }
        // If a country doesn't use a national prefix, and this number doesn't have
        // an Italian leading zero, we assume it is a closed dialling plan with no
        // area codes.
        if metadata.national_prefix.is_none() && !phone_number.italian_leading_zero() {
            return 0;
        }
        if !self.is_number_type_geographical(phone_number_type, country_calling_code) {
            return 0;
        }
        self.get_length_of_national_destination_code(phone_number)
    }

    /// Gets the length of the national destination code (NDC) from the
    /// PhoneNumber object passed in, so that clients could use it to split a
    /// national significant number into NDC and subscriber number. The NDC of a
    /// phone number is normally the first group of digit(s) right after the
    /// country calling code when the number is formatted in the international
    /// format, if there is a subscriber number part that follows.
    ///
    /// Mobile numbers of countries with a mobile token count the token as part
    /// of the NDC. Returns 0 if the international format has no separate
    /// subscriber number group.
    pub fn get_length_of_national_destination_code(&self, phone_number: &PhoneNumber) -> usize {
        let copied_proto = if phone_number.has_extension() {
            // Clear the extension so it's not included when formatting.
            phone_number.to_builder().clear_extension().build()
        } else {
            phone_number.clone()
        };
        let formatted_number = self.format(&copied_proto, PhoneNumberFormat::International);
        // The pattern will start with "+COUNTRY_CODE " so the first group will
        // always be the empty string (before the + symbol) and the second group
        // will be the country calling code. The third group will be area code if
        // it is not the last group.
        let digit_groups: Vec<&str> = self
            .reg_exps
            .non_digits_pattern
            .split(&formatted_number)
            .collect();
        if digit_groups.len() <= 3 {
            return 0;
        }
        if self.get_number_type(phone_number) == PhoneNumberType::Mobile
            && self
                .get_country_mobile_token(phone_number.country_code())
                .is_some()
        {
            // For example Argentinian mobile numbers, when formatted in the
            // international format, are in the form of +54 9 NDC XXXX.... As a
            // result, we take the length of the third group (NDC) and add the length
            // of the second group (which is the mobile token), which also forms part
            // of the national significant number. This assumes that the mobile token
            // is always formatted separately from the rest of the phone number.
            return digit_groups[2].len() + digit_groups[3].len();
        }
        digit_groups[2].len()
    }

    /// Returns true if the number can be dialled from outside the region, or
    /// unknown. If the number can only be dialled from within the region, returns
    /// false. Does not check the number is a valid number. Note that, at the
    /// moment, this method does not handle short numbers (which are currently all
    /// presumed to not be diallable from outside their country).
    pub fn can_be_internationally_dialled(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            // Note numbers belonging to non-geographical entities (e.g. +800 numbers)
            // are always internationally diallable, and will be caught here.
            return true;
        };
        let national_significant_number = national_significant_number(phone_number);
        !self.is_number_matching_desc(&national_significant_number, &metadata.no_international_dialling)
    }

    /// Gets a valid fixed-line number for the specified region.
    pub fn get_example_number(&self, region_code: &str) -> Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type(region_code, PhoneNumberType::FixedLine)
    }

    /// Gets an invalid number for the specified region. This is useful for
    /// unit-testing purposes, where you want to test what will happen with an
    /// invalid number. Note that the number that is returned will always be able
    /// to be parsed and will have the correct country code. It may also be a valid
    /// *short* number/code for this region. Validity checking such
    /// numbers is handled with ShortNumberInfo.
    pub fn get_invalid_example_number(&self, region_code: &str) -> Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided", region_code);
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        // We start off with a valid fixed-line number since every country
        // supports this. Alternatively we could start with a different number
        // type, since fixed-line numbers typically have a wide breadth of valid
        // number lengths and we may have to make it very short before we get an
        // invalid number.
        let desc = get_number_desc_by_type(metadata, PhoneNumberType::FixedLine);
        if !desc.has_example_number() {
            // This shouldn't happen; we have a test for this.
            return Err(GetExampleNumberError::NoExampleNumber);
        }
        let example_number = desc.example_number();
        // Try and make the number invalid. We do this by changing the length. We
        // try reducing the length of the number, since currently no region has a
        // number that is the same length as MIN_LENGTH_FOR_NSN. This is probably
        // quicker than making the number longer, which is another alternative. We
        // could also use the possible number pattern to extract the possible
        // lengths of the number to make this faster, but this method is only for
        // unit-testing so simplicity is preferred to performance.  We don't want to
        // return a number that can't be parsed, so we check the number is long
        // enough. We try all possible lengths because phone number plans often have
        // overlapping prefixes so the number 123456 might be valid as a fixed-line
        // number, and 12345 as a mobile number. It would be faster to loop in a
        // different order, but we prefer numbers that look closer to real numbers
        // (and it gives us a variety of different lengths for the resulting phone
        // numbers - otherwise they would all be MIN_LENGTH_FOR_NSN digits long.)
        for phone_number_length in (MIN_LENGTH_FOR_NSN..example_number.len()).rev() {
            let Some(number_to_try) = example_number.get(..phone_number_length) else {
                continue;
            };
            if let Ok(possibly_valid_number) = self.parse(number_to_try, region_code) {
                if !self.is_valid_number(&possibly_valid_number) {
                    return Ok(possibly_valid_number);
                }
            }
        }
        // We have a test to check that this doesn't happen for any of our
        // supported regions.
        Err(GetExampleNumberError::CouldNotGetNumber)
    }

    /// Gets a valid number for the specified region and number type.
    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        phone_number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        self.get_example_number_for_type_internal(region_code, phone_number_type)
            .map_err(GetExampleNumberErrorInternal::into_public)
    }

    fn get_example_number_for_type_internal(
        &self,
        region_code: &str,
        phone_number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberErrorInternal> {
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({}) provided", region_code);
            return Err(GetExampleNumberError::InvalidRegionCode.into());
        };
        let desc = get_number_desc_by_type(metadata, phone_number_type);
        if !desc.has_example_number() {
            return Err(GetExampleNumberError::NoExampleNumber.into());
        }
        Ok(self.parse_helper(desc.example_number(), region_code, false, true)?)
    }

    /// Gets a valid number for the specified number type (it may belong to any
    /// country). Regions are tried first, then non-geographical entities.
    pub fn get_example_number_for_type_in_any_region(
        &self,
        phone_number_type: PhoneNumberType,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        for region_code in self.registry.supported_regions() {
            if let Ok(example_number) = self.get_example_number_for_type(region_code, phone_number_type) {
                return Ok(example_number);
            }
        }
        // If there wasn't an example number for a region, try the non-geographical
        // entities.
        for country_calling_code in self.registry.supported_global_network_calling_codes() {
            let Some(metadata) = self
                .registry
                .get_metadata_for_non_geographical_region(country_calling_code)
            else {
                continue;
            };
            let desc = get_number_desc_by_type(metadata, phone_number_type);
            if desc.has_example_number() {
                if let Ok(example_number) =
                    self.parse_non_geo_example(country_calling_code, desc.example_number())
                {
                    return Ok(example_number);
                }
            }
        }
        // There are no example numbers of this type for any country in the library.
        Err(GetExampleNumberError::CouldNotGetNumber)
    }

    /// Gets a valid number for the specified country calling code for a
    /// non-geographical entity.
    pub fn get_example_number_for_non_geo_entity(
        &self,
        country_calling_code: i32,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let Some(metadata) = self
            .registry
            .get_metadata_for_non_geographical_region(country_calling_code)
        else {
            warn!("Invalid or unknown country calling code provided: {}", country_calling_code);
            return Err(GetExampleNumberError::InvalidRegionCode);
        };
        // For geographical entities, fixed-line data is always present. However,
        // for non-geographical entities, this is not the case, so we have to go
        // through different types to find the example number. We don't check
        // fixed-line or personal number since they aren't used by
        // non-geographical entities (if this changes, a unit-test will catch this.)
        let candidates = [
            &metadata.mobile,
            &metadata.toll_free,
            &metadata.shared_cost,
            &metadata.voip,
            &metadata.voicemail,
            &metadata.uan,
            &metadata.premium_rate,
        ];
        let Some(desc) = candidates.into_iter().find(|desc| desc.has_example_number()) else {
            return Err(GetExampleNumberError::NoExampleNumber);
        };
        self.parse_non_geo_example(country_calling_code, desc.example_number())
    }

    fn parse_non_geo_example(
        &self,
        country_calling_code: i32,
        example_number: &str,
    ) -> Result<PhoneNumber, GetExampleNumberError> {
        let mut buf = itoa::Buffer::new();
        let number_to_parse = fast_cat::concat_str!(
            PLUS_SIGN,
            buf.format(country_calling_code),
            example_number
        );
        self.parse(&number_to_parse, i18n::RegionCode::get_unknown())
            .map_err(GetExampleNumberError::from)
    }
}
