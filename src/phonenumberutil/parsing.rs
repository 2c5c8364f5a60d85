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

use crate::{
    metadata::PhoneMetadata,
    phonenumber::{CountryCodeSource, PhoneNumber},
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

use super::{
    PhoneNumberUtil,
    errors::{NotANumberError, ParseError, ParseErrorInternal, ValidationError},
    helper_constants::{
        MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        PLUS_SIGN, RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
    },
    helper_functions::test_number_length,
    helper_types::{ExtractedCountryCode, PhoneNumberWithCountryCodeSource, StrippedNationalPrefix},
};

impl PhoneNumberUtil {
    /// Parses a string and returns it as a structured phone number. The
    /// method is quite lenient and looks for a number in the input text (raw input)
    /// and does not check whether the string is definitely only a phone number. To
    /// do this, it ignores punctuation and white-space, as well as any text before
    /// the number (e.g. a leading "Tel: ") and trims the non-number bits. It will
    /// accept a number in any format (E164, national, international etc), assuming
    /// it can be interpreted with the defaultRegion supplied. It also attempts to
    /// convert any alpha characters into digits if it thinks this is a vanity
    /// number of the type "1800 MICROSOFT".
    ///
    /// This method will return an error if the number is not considered to be a
    /// possible number, and [`ParseError::InvalidCountryCode`] if the default
    /// region is unknown and the number does not start with a plus sign.
    ///
    /// Note this method canonicalizes the phone number such that different
    /// representations can be easily compared, no matter what form it was
    /// originally entered in (e.g. national, international). If you want to
    /// record context about the number being parsed, such as the raw input that
    /// was entered, how the country code was derived etc. then call
    /// [`Self::parse_and_keep_raw_input`] instead.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false, true)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Parses a string like [`Self::parse`], but also records the raw input,
    /// the country code source and the preferred domestic carrier code (empty
    /// if none was found) on the returned number.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true, true)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Parses a string into a phone number. This method is the same as
    /// the public `parse` method, with the exception that it allows the default
    /// region to be unknown, for use by is_number_match. `check_region` should
    /// be set to false if it is permitted for the default region to be unknown
    /// or absent, in which case the number must carry its own calling code.
    pub(super) fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseErrorInternal> {
        if number_to_parse.is_empty() {
            return Err(NotANumberError::EmptyInput.into());
        }
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            trace!("Input string is too long to be a phone number");
            return Err(ParseError::TooLongNsn.into());
        }

        let national_number = self.build_national_number_for_parsing(number_to_parse);

        if !self.is_viable_phone_number(&national_number) {
            trace!("The string supplied did not seem to be a phone number '{}'", national_number);
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }

        // Check the region supplied is valid, or that the extracted number starts
        // with some sort of + sign so the number's region can be determined.
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            trace!("Missing or invalid default country '{}'", default_region);
            return Err(ParseError::InvalidCountryCode.into());
        }

        let mut phone_number = PhoneNumber::builder();
        if keep_raw_input {
            phone_number = phone_number.raw_input(number_to_parse);
        }
        // Attempt to parse extension first, since it doesn't require
        // country-specific data and we want to have the non-normalised number here.
        let (national_number, extension) = self.maybe_strip_extension(&national_number);
        if let Some(extension) = extension {
            phone_number = phone_number.extension(extension);
        }

        let mut region_metadata = self.registry.get_metadata_for_region(default_region);
        // Check to see if the number is given in international format so we know
        // whether this number is from the default region or not.
        let extracted = match self.maybe_extract_country_code(national_number, region_metadata) {
            Ok(extracted) => extracted,
            Err(ParseErrorInternal::FailedToParse(ParseError::InvalidCountryCode)) => {
                let Some(without_plus) = self.reg_exps.plus_chars_pattern.consume_start(national_number)
                else {
                    return Err(ParseError::InvalidCountryCode.into());
                };
                // Strip the plus-char, and try again.
                let extracted = self.maybe_extract_country_code(without_plus, region_metadata)?;
                if extracted.country_code == 0 {
                    trace!("Could not interpret numbers after plus-sign");
                    return Err(ParseError::InvalidCountryCode.into());
                }
                extracted
            }
            Err(err) => return Err(err),
        };

        let mut country_code = extracted.country_code;
        let mut country_code_source = extracted.country_code_source;
        let mut normalized_national_number = extracted.national_number;
        if country_code != 0 {
            let phone_number_region = self.registry.get_region_code_for_country_code(country_code);
            if phone_number_region != default_region {
                region_metadata = self
                    .registry
                    .get_metadata_for_region_or_calling_code(country_code, phone_number_region);
            }
        } else if let Some(metadata) = region_metadata {
            // If no extracted country calling code, use the region supplied
            // instead. The national number is just the normalized version of the
            // number we were given to parse.
            country_code = metadata.country_code();
        } else {
            country_code_source = CountryCodeSource::Unspecified;
        }
        if keep_raw_input {
            phone_number = phone_number.country_code_source(country_code_source);
        }

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number");
            return Err(ParseError::TooShortNsn.into());
        }

        if let Some(metadata) = region_metadata {
            let mut carrier_code = String::new();
            if let Some(stripped) =
                self.maybe_strip_national_prefix_and_carrier_code(&normalized_national_number, metadata)?
            {
                normalized_national_number = stripped.national_number;
                carrier_code = stripped.carrier_code;
            }
            if keep_raw_input {
                phone_number = phone_number.preferred_domestic_carrier_code(carrier_code);
            }
        }

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            trace!("The string supplied is too short to be a phone number");
            return Err(ParseError::TooShortNsn.into());
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            trace!("The string supplied is too long to be a phone number");
            return Err(ParseError::TooLongNsn.into());
        }

        let leading_zero_possible = region_metadata.is_none_or(PhoneMetadata::leading_zero_possible);
        if leading_zero_possible && length_of_national_number > 1 && normalized_national_number.starts_with('0') {
            phone_number = phone_number.italian_leading_zero(true);
            // The last digit always stays in the national number, even if it is
            // a zero.
            let number_of_leading_zeros = normalized_national_number[..length_of_national_number - 1]
                .bytes()
                .take_while(|digit| *digit == b'0')
                .count();
            if number_of_leading_zeros > 1 {
                phone_number = phone_number.number_of_leading_zeros(number_of_leading_zeros as i32);
            }
        }

        let national_number = normalized_national_number
            .parse::<u64>()
            .map_err(NotANumberError::from)?;
        Ok(phone_number
            .country_code(country_code)
            .national_number(national_number)
            .build())
    }

    /// Converts number_to_parse to a form that we can parse and returns it.
    /// Handles the RFC3966 `tel:` syntax: a phone context that is a number
    /// prefix (starting with `+`) is prepended to the number, any other phone
    /// context is ignored, and an isdn-subaddress is dropped.
    pub(super) fn build_national_number_for_parsing(&self, number_to_parse: &str) -> String {
        let mut national_number = String::with_capacity(number_to_parse.len());
        if let Some(index_of_phone_context) = number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            let phone_context = &number_to_parse[index_of_phone_context + RFC3966_PHONE_CONTEXT.len()..];
            // If the phone context contains a phone number prefix, we need to
            // capture it, whereas domains will be ignored.
            if phone_context.starts_with(PLUS_SIGN) {
                // Additional parameters might follow the phone context. If so, we
                // will remove them here because the parameters after phone context
                // are not important for parsing the phone number.
                let end_of_context = phone_context.find(';').unwrap_or(phone_context.len());
                national_number.push_str(&phone_context[..end_of_context]);
            }

            // Now append everything between the "tel:" prefix and the
            // phone-context. This should include the national number, an optional
            // extension or isdn-subaddress component. Note we also handle the case
            // when "tel:" is missing, as we have seen in some of the phone number
            // inputs. In that case, we append everything from the beginning.
            let index_of_national_number = number_to_parse
                .find(RFC3966_PREFIX)
                .map(|index| index + RFC3966_PREFIX.len())
                .filter(|index| *index <= index_of_phone_context)
                .unwrap_or(0);
            national_number.push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
        } else {
            // Extract a possible number from the string passed in (this strips
            // leading characters that could not be the start of a phone number.)
            national_number.push_str(self.extract_possible_number(number_to_parse));
        }

        // Delete the isdn-subaddress and everything after it if it is present.
        // Note extension won't appear at the same time with isdn-subaddress
        // according to paragraph 5.3 of the RFC3966 spec.
        if let Some(index_of_isdn) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            national_number.truncate(index_of_isdn);
        }
        // If both phone context and isdn-subaddress are absent but other
        // parameters are present, the parameters are left in national_number.
        // This is because we are concerned about deleting content from a
        // potential number string when there is no strong evidence that the
        // number is actually written in RFC3966.
        national_number
    }

    /// Checks to see that the region code used is valid, or if it is not valid,
    /// that the number to parse starts with a + symbol so that we can attempt to
    /// infer the country from the number.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        self.registry.is_valid_region_code(default_region)
            || self.reg_exps.plus_chars_pattern.matches_start(number_to_parse)
    }

    /// Strips any extension (as in, the part of the number dialled after the
    /// call is connected, usually indicated with extn, ext, x or similar) from
    /// the end of the number, and returns the number without it together with
    /// the extension.
    pub(super) fn maybe_strip_extension<'a>(&self, phone_number: &'a str) -> (&'a str, Option<&'a str>) {
        let Some(captures) = self.reg_exps.extn_pattern.captures(phone_number) else {
            return (phone_number, None);
        };
        let Some(full_match) = captures.get(0) else {
            return (phone_number, None);
        };
        // If we find a potential extension, and the number preceding this is a
        // viable number, we assume it is an extension.
        let number_before_extension = &phone_number[..full_match.start()];
        if !self.is_viable_phone_number(number_before_extension) {
            return (phone_number, None);
        }
        // The numbers are captured into groups in the regular expression; the
        // first non-empty one is the extension.
        let extension = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .find(|group| !group.is_empty());
        match extension {
            Some(extension) => (number_before_extension, Some(extension)),
            None => (phone_number, None),
        }
    }

    /// Tries to extract a country calling code from a number. Country calling
    /// codes are extracted in the following ways:
    ///   - by stripping the international dialing prefix of the region the person
    ///   is dialing from, if this is present in the number, and looking at the
    ///   next digits
    ///   - by stripping the '+' sign if present and then looking at the next
    ///   digits
    ///   - by comparing the start of the number and the country calling code of
    ///   the default region. If the number is not considered possible for the
    ///   numbering plan of the default region initially, but starts with the
    ///   country calling code of this region, validation will be reattempted
    ///   after stripping this country calling code. If this number is considered a
    ///   possible number, then the first digits will be considered the country
    ///   calling code and removed as such.
    ///
    /// Returns a country code of 0 if no calling code was found; the national
    /// number is then the normalized input.
    pub(super) fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
    ) -> Result<ExtractedCountryCode, ParseErrorInternal> {
        // Set the default prefix to be something that will never match if there
        // is no default region.
        let possible_country_idd_prefix = default_region_metadata.map(PhoneMetadata::international_prefix);
        let PhoneNumberWithCountryCodeSource {
            phone_number: full_number,
            country_code_source,
        } = self.maybe_strip_international_prefix_and_normalize(number, possible_country_idd_prefix)?;

        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                trace!("Phone number had an IDD, but after this was not long enough to be a viable phone number");
                return Err(ParseError::TooShortAfterIdd.into());
            }
            return match self.extract_country_code(&full_number) {
                Some((country_code, national_number)) => Ok(ExtractedCountryCode {
                    country_code,
                    national_number: national_number.to_owned(),
                    country_code_source,
                }),
                // If this fails, they must be using a strange country calling code
                // that we don't recognize, or that doesn't exist.
                None => Err(ParseError::InvalidCountryCode.into()),
            };
        }

        if let Some(default_region_metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code for
            // the default region. If so, we remove the country calling code, and
            // do some checks on the validity of the number before and after.
            let default_country_code = default_region_metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) = full_number.strip_prefix(default_country_code_str) {
                let general_pattern = default_region_metadata.general_desc().national_number_pattern();
                let cache = self.registry.regex_cache();
                let potential_national_number = self
                    .maybe_strip_national_prefix_and_carrier_code(potential_national_number, default_region_metadata)?
                    .map(|stripped| stripped.national_number)
                    .unwrap_or_else(|| potential_national_number.to_owned());
                // If the number was not valid before but is valid now, or if it
                // was too long before, we consider the number with the country
                // calling code stripped to be a better result and keep that
                // instead.
                if (!cache.full_match(general_pattern, &full_number)?
                    && cache.full_match(general_pattern, &potential_national_number)?)
                    || test_number_length(&full_number, default_region_metadata)
                        == Err(ValidationError::TooLong)
                {
                    return Ok(ExtractedCountryCode {
                        country_code: default_country_code,
                        national_number: potential_national_number,
                        country_code_source: CountryCodeSource::FromNumberWithoutPlusSign,
                    });
                }
            }
        }
        // No country calling code present.
        Ok(ExtractedCountryCode {
            country_code: 0,
            national_number: full_number,
            country_code_source,
        })
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number provided, normalizes the resulting number, and indicates if an
    /// international prefix was present.
    ///
    /// `possible_idd_prefix` represents the international direct dialing
    /// prefix from the region we think this number may be dialed in.
    fn maybe_strip_international_prefix_and_normalize(
        &self,
        phone_number: &str,
        possible_idd_prefix: Option<&str>,
    ) -> Result<PhoneNumberWithCountryCodeSource, InvalidRegexError> {
        if phone_number.is_empty() {
            return Ok(PhoneNumberWithCountryCodeSource::new(
                String::new(),
                CountryCodeSource::FromDefaultCountry,
            ));
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(after_plus) = self.reg_exps.plus_chars_pattern.consume_start(phone_number) {
            // Can now normalize the rest of the number since we've consumed the
            // "+" sign at the start.
            return Ok(PhoneNumberWithCountryCodeSource::new(
                self.normalize(after_plus),
                CountryCodeSource::FromNumberWithPlusSign,
            ));
        }
        // Attempt to parse the first digits as an international prefix.
        let normalized_number = self.normalize(phone_number);
        if let Some(idd_pattern) = possible_idd_prefix.filter(|idd| !idd.is_empty()) {
            if let Some(rest) = self.parse_prefix_as_idd(idd_pattern, &normalized_number)? {
                return Ok(PhoneNumberWithCountryCodeSource::new(
                    rest.to_owned(),
                    CountryCodeSource::FromNumberWithIdd,
                ));
            }
        }
        Ok(PhoneNumberWithCountryCodeSource::new(
            normalized_number,
            CountryCodeSource::FromDefaultCountry,
        ))
    }

    /// Strips the IDD from the start of the number if present. Helper function
    /// used by maybe_strip_international_prefix_and_normalize.
    fn parse_prefix_as_idd<'a>(
        &self,
        idd_pattern: &str,
        number: &'a str,
    ) -> Result<Option<&'a str>, InvalidRegexError> {
        let Some(idd_match) = self.registry.regex_cache().find_start(idd_pattern, number)? else {
            return Ok(None);
        };
        let rest = &number[idd_match.end()..];
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if let Some(first_digit) = self.reg_exps.capturing_digit_pattern.find(rest) {
            if self.normalize_digits_only(first_digit.as_str()) == "0" {
                return Ok(None);
            }
        }
        Ok(Some(rest))
    }

    /// Extracts country calling code from `full_number`, returning it with the
    /// remaining national number. It assumes that the leading plus sign or IDD
    /// has already been removed. Returns `None` if `full_number` doesn't start
    /// with a valid country calling code.
    pub(super) fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for i in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let Some(potential_country_code) = full_number
                .get(..i)
                .and_then(|code| code.parse::<i32>().ok())
            else {
                return None;
            };
            if self.registry.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[i..]));
            }
        }
        None
    }

    /// Strips any national prefix (such as 0, 1) present in the number
    /// provided. Returns `None` if nothing was stripped; the number is then
    /// meant to be used unchanged.
    pub(super) fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        number: &str,
        metadata: &PhoneMetadata,
    ) -> Result<Option<StrippedNationalPrefix>, InvalidRegexError> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            // Early return for numbers of zero length.
            return Ok(None);
        }
        let cache = self.registry.regex_cache();
        // Attempt to parse the first digits as a national prefix.
        let Some(prefix_captures) = cache.captures_start(possible_national_prefix, number)? else {
            return Ok(None);
        };
        let Some(prefix_match) = prefix_captures.get(0) else {
            return Ok(None);
        };
        let general_pattern = metadata.general_desc().national_number_pattern();
        // Check if the original number is viable.
        let is_viable_original_number = cache.full_match(general_pattern, number)?;
        // prefix_captures.get(num_of_groups) == None implies nothing was captured
        // by the capturing groups in possible_national_prefix; therefore, no
        // transformation is necessary, and we just remove the national prefix.
        let num_of_groups = prefix_captures.len() - 1;
        let last_group_captured = prefix_captures.get(num_of_groups).is_some();
        let transform_rule = metadata.national_prefix_transform_rule();
        let first_group = || {
            prefix_captures
                .get(1)
                .map(|group| group.as_str().to_owned())
                .unwrap_or_default()
        };

        if transform_rule.is_empty() || !last_group_captured {
            let national_number = &number[prefix_match.end()..];
            // If the original number was viable, and the resultant number is not,
            // we return.
            if is_viable_original_number && !cache.full_match(general_pattern, national_number)? {
                return Ok(None);
            }
            let carrier_code = if num_of_groups > 0 && last_group_captured {
                first_group()
            } else {
                String::new()
            };
            return Ok(Some(StrippedNationalPrefix {
                national_number: national_number.to_owned(),
                carrier_code,
            }));
        }

        // Check that the resultant number is still viable. If not, return. Check
        // this by making the transformation on a copy first.
        let transformed_number = cache
            .get_start_anchored_regex(possible_national_prefix)?
            .replace(number, transform_rule)
            .into_owned();
        if is_viable_original_number && !cache.full_match(general_pattern, &transformed_number)? {
            return Ok(None);
        }
        let carrier_code = if num_of_groups > 1 { first_group() } else { String::new() };
        Ok(Some(StrippedNationalPrefix {
            national_number: transformed_number,
            carrier_code,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        metadata::{MetadataRegistry, PhoneMetadata, PhoneNumberDesc},
        phonenumberutil::PhoneNumberUtil,
    };

    fn util() -> PhoneNumberUtil {
        let nz = PhoneMetadata::builder("NZ", 64)
            .international_prefix("00")
            .national_prefix("0")
            .general_desc(
                PhoneNumberDesc::builder()
                    .national_number_pattern("[289]\\d{7,9}|[3-7]\\d{7}")
                    .possible_lengths([8, 9, 10])
                    .build(),
            )
            .build();
        PhoneNumberUtil::new(Arc::new(MetadataRegistry::from_metadata([nz]).unwrap()))
    }

    #[test]
    fn rfc3966_national_number() {
        let util = util();
        assert_eq!(
            util.build_national_number_for_parsing("tel:03-331-6005;phone-context=+64"),
            "+6403-331-6005"
        );
        assert_eq!(
            util.build_national_number_for_parsing("tel:03-331-6005;isub=12345;phone-context=+64"),
            "+6403-331-6005"
        );
        // A domain context is ignored.
        assert_eq!(
            util.build_national_number_for_parsing("tel:03-331-6005;phone-context=abc.nz"),
            "03-331-6005"
        );
    }

    #[test]
    fn strips_extension_after_viable_number() {
        let util = util();
        assert_eq!(util.maybe_strip_extension("03 331 6005 ext 3456"), ("03 331 6005", Some("3456")));
        assert_eq!(util.maybe_strip_extension("03-3316005x3456"), ("03-3316005", Some("3456")));
        assert_eq!(util.maybe_strip_extension("1234 ext. 12"), ("1234", Some("12")));
        assert_eq!(util.maybe_strip_extension("x 12"), ("x 12", None));
    }

    #[test]
    fn national_prefix_is_stripped_only_when_result_stays_valid() {
        let util = util();
        let registry = util.registry();
        let nz = registry.get_metadata_for_region("NZ").unwrap();
        let stripped = util
            .maybe_strip_national_prefix_and_carrier_code("033316005", nz)
            .unwrap()
            .unwrap();
        assert_eq!(stripped.national_number, "33316005");
        assert_eq!(stripped.carrier_code, "");
        assert!(util.maybe_strip_national_prefix_and_carrier_code("33316005", nz).unwrap().is_none());
    }

    #[test]
    fn country_code_extraction() {
        let util = util();
        assert_eq!(util.extract_country_code("6433316005"), Some((64, "33316005")));
        assert_eq!(util.extract_country_code("0643331600"), None);
        assert_eq!(util.extract_country_code("9993331600"), None);
    }
}
