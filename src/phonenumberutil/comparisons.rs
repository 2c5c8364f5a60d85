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

use log::trace;

use super::{
    MatchType, PhoneNumberUtil,
    errors::{ParseError, ParseErrorInternal},
    helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY,
    helper_functions::{copy_core_fields_only, is_national_number_suffix_of_the_other},
};
use crate::{i18n, phonenumber::PhoneNumber};

impl PhoneNumberUtil {
    /// Takes two phone numbers and compares them for equality.
    ///
    /// Returns ExactMatch if the country calling code, NSN, presence of a leading
    /// zero for Italian numbers and any extension present are the same.
    /// Returns NsnMatch if either or both has no country calling code specified,
    /// and the NSNs and extensions are the same.
    /// Returns ShortNsnMatch if either or both has no country calling code
    /// specified, or the country calling code specified is the same, and one NSN
    /// could be a shorter version of the other number. This includes the case
    /// where one has an extension specified, and the other does not.
    /// Returns NoMatch otherwise.
    /// For example, the numbers +1 345 657 1234 and 657 1234 are a
    /// ShortNsnMatch. The numbers +1 345 657 1234 and 345 657 are a NoMatch.
    pub fn is_number_match(&self, first_number_in: &PhoneNumber, second_number_in: &PhoneNumber) -> MatchType {
        // We only are about the fields that uniquely define a number, so we copy
        // these across explicitly.
        let first_number = copy_core_fields_only(first_number_in);
        let second_number = copy_core_fields_only(second_number_in);
        // Early exit if both had extensions and these are different.
        if first_number.has_extension()
            && second_number.has_extension()
            && first_number.extension() != second_number.extension()
        {
            return MatchType::NoMatch;
        }
        let first_number_country_code = first_number.country_code();
        let second_number_country_code = second_number.country_code();
        // Both had country calling code specified.
        if first_number_country_code != 0 && second_number_country_code != 0 {
            if first_number == second_number {
                return MatchType::ExactMatch;
            } else if first_number_country_code == second_number_country_code
                && is_national_number_suffix_of_the_other(&first_number, &second_number)
            {
                // A ShortNsnMatch occurs if there is a difference because of the
                // presence or absence of an 'Italian leading zero', the presence or
                // absence of an extension, or one NSN being a shorter variant of the
                // other.
                return MatchType::ShortNsnMatch;
            }
            // This is not a match.
            return MatchType::NoMatch;
        }
        // Checks cases where one or both country calling codes were not
        // specified. To make equality checks easier, we first set the country
        // calling codes to be equal.
        let first_number = first_number
            .to_builder()
            .country_code(second_number_country_code)
            .build();
        // If all else was the same, then this is an NSN_MATCH.
        if first_number == second_number {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first_number, &second_number) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    /// Takes two phone numbers as strings and compares them for equality. This
    /// is a convenience wrapper for [`Self::is_number_match`]. No default region
    /// is known, so numbers without a leading plus can only be compared on
    /// their national significant numbers.
    pub fn is_number_match_with_two_strings(&self, first_number: &str, second_number: &str) -> MatchType {
        match self.parse(first_number, i18n::RegionCode::get_unknown()) {
            Ok(first_number_as_proto) => {
                return self.is_number_match_with_one_string(&first_number_as_proto, second_number);
            }
            Err(ParseError::InvalidCountryCode) => {}
            Err(err) => {
                trace!("First number '{}' could not be parsed: {}", first_number, err);
                return MatchType::NotANumber;
            }
        }
        match self.parse(second_number, i18n::RegionCode::get_unknown()) {
            Ok(second_number_as_proto) => {
                return self.is_number_match_with_one_string(&second_number_as_proto, first_number);
            }
            Err(ParseError::InvalidCountryCode) => {}
            Err(err) => {
                trace!("Second number '{}' could not be parsed: {}", second_number, err);
                return MatchType::NotANumber;
            }
        }
        // Neither number has a country calling code; compare what is left.
        let first_number_as_proto = self.parse_without_region_check(first_number);
        let second_number_as_proto = self.parse_without_region_check(second_number);
        match (first_number_as_proto, second_number_as_proto) {
            (Ok(first), Ok(second)) => self.is_number_match(&first, &second),
            _ => MatchType::NotANumber,
        }
    }

    /// Takes two phone numbers and compares them for equality. This is a
    /// convenience wrapper for [`Self::is_number_match`]. The second number is
    /// parsed without a default region; if it turns out to need one, the region
    /// of the first number is used and an exact match is downgraded to an
    /// NsnMatch, since the country calling code was assumed.
    pub fn is_number_match_with_one_string(&self, first_number: &PhoneNumber, second_number: &str) -> MatchType {
        // First see if the second number has an implicit country calling code, by
        // attempting to parse it.
        match self.parse(second_number, i18n::RegionCode::get_unknown()) {
            Ok(second_number_as_proto) => return self.is_number_match(first_number, &second_number_as_proto),
            Err(ParseError::InvalidCountryCode) => {}
            Err(err) => {
                trace!("Number '{}' could not be parsed for matching: {}", second_number, err);
                return MatchType::NotANumber;
            }
        }
        // The second number has no country calling code. EXACT_MATCH is no
        // longer possible. We parse it as if the region was the same as that for
        // the first number, and if EXACT_MATCH is returned, we replace this with
        // NSN_MATCH.
        let first_number_region = self
            .registry
            .get_region_code_for_country_code(first_number.country_code());
        if first_number_region != i18n::RegionCode::get_unknown()
            && first_number_region != REGION_CODE_FOR_NON_GEO_ENTITY
        {
            return match self.parse(second_number, first_number_region) {
                Ok(second_number_with_first_number_region) => {
                    match self.is_number_match(first_number, &second_number_with_first_number_region) {
                        MatchType::ExactMatch => MatchType::NsnMatch,
                        match_type => match_type,
                    }
                }
                Err(_) => MatchType::NotANumber,
            };
        }
        // If the first number didn't have a valid country calling code, or
        // belongs to a non-geographical entity, then we parse the second number
        // without one as well.
        match self.parse_without_region_check(second_number) {
            Ok(second_number_as_proto) => self.is_number_match(first_number, &second_number_as_proto),
            Err(_) => MatchType::NotANumber,
        }
    }

    fn parse_without_region_check(&self, number: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number, i18n::RegionCode::get_unknown(), false, false)
            .map_err(ParseErrorInternal::into_public)
    }
}
