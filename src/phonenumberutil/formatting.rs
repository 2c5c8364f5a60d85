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

use std::borrow::Cow;

use log::{trace, warn};
use regex::NoExpand;

use super::{
    PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil,
    errors::{RegexResultExt, ValidationError},
    helper_constants::{
        DEFAULT_EXTN_PREFIX, NANPA_COUNTRY_CODE, REGION_CODE_FOR_NON_GEO_ENTITY,
        REGION_REQUIRING_CARRIER_CODE, RFC3966_EXTN_PREFIX,
    },
    helper_functions::{
        national_significant_number, normalize_helper, prefix_number_with_country_calling_code,
        test_number_length,
    },
};
use crate::{
    metadata::{NumberFormat, PhoneMetadata},
    phonenumber::{CountryCodeSource, PhoneNumber},
    regex_util::RegexConsume,
    regexp_cache::InvalidRegexError,
};

impl PhoneNumberUtil {
    /// Formats a phone number in the specified format using default rules. Note
    /// that this does not promise to produce a phone number that the user can
    /// dial from where they are - although we do format in either NATIONAL or
    /// INTERNATIONAL format depending on what the client asks for, we do not
    /// currently support a more abbreviated format, such as for users in the
    /// same area who could potentially dial the number without area code.
    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        if phone_number.national_number() == 0 && !phone_number.raw_input().is_empty() {
            // Unparseable numbers that kept their raw input just use that.
            // This is the only case where a number can be formatted as E164 without a
            // leading '+' symbol (but the original number wasn't parseable anyway).
            return phone_number.raw_input().to_owned();
        }
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = national_significant_number(phone_number);

        if number_format == PhoneNumberFormat::E164 {
            // Early exit for E164 case (even if the country calling code is invalid)
            // since no formatting of the national number needs to be applied.
            // Extensions are not formatted.
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::E164,
                &mut formatted_number,
            );
            return formatted_number;
        }
        if !self.registry.has_valid_country_calling_code(country_calling_code) {
            return formatted_number;
        }
        // Note here that all NANPA formatting rules are contained by US, so we use
        // that to format NANPA numbers. The same applies to Russian Fed regions -
        // rules are contained by Russia. French Indian Ocean country rules are
        // contained by Reunion.
        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return formatted_number;
        };
        if number_format == PhoneNumberFormat::National {
            if let Some(formatted) = self.format_without_optional_national_prefix(phone_number, metadata) {
                return formatted;
            }
        }
        formatted_number = self
            .format_nsn(&formatted_number, metadata, number_format)
            .into_public()
            .into_owned();
        if let Some(formatted_extension) = Self::get_formatted_extension(phone_number, metadata, number_format) {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        formatted_number
    }

    /// Formats a phone number in the specified format using client-defined
    /// formatting rules. Note that if the phone number has a country calling code
    /// of zero or an otherwise invalid country calling code, we cannot work out
    /// things like whether there should be a national prefix applied, or how to
    /// format extensions, so we return the national significant number with no
    /// formatting applied.
    ///
    /// The rules may carry `$NP` and `$FG` placeholders in their national prefix
    /// formatting rule. Their patterns are compiled on demand, hence the error.
    pub fn format_by_pattern(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> Result<String, InvalidRegexError> {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = national_significant_number(phone_number);
        if !self.registry.has_valid_country_calling_code(country_calling_code) {
            return Ok(national_significant_number);
        }
        // Note get_region_code_for_country_code() is used because formatting
        // information for regions which share a country calling code is contained
        // by only one region for performance reasons. For example, for NANPA
        // regions it will be contained in the metadata for US.
        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return Ok(national_significant_number);
        };

        let formatting_pattern =
            self.choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number)?;

        let mut formatted_number = if let Some(formatting_pattern) = formatting_pattern {
            // Before we do a replacement of the national prefix pattern $NP with the
            // national prefix, we need to copy the rule so that subsequent replacements
            // for different numbers have the appropriate national prefix.
            let national_prefix_formatting_rule = formatting_pattern.national_prefix_formatting_rule();
            let num_format_copy = if national_prefix_formatting_rule.is_empty() {
                Cow::Borrowed(formatting_pattern)
            } else {
                let national_prefix = metadata.national_prefix();
                let builder = formatting_pattern.to_builder();
                let builder = if !national_prefix.is_empty() {
                    // Replace $NP with national prefix and $FG with the first group ($1).
                    let rule = national_prefix_formatting_rule
                        .replace("$NP", national_prefix)
                        .replace("$FG", "$1");
                    builder.national_prefix_formatting_rule(rule)
                } else {
                    // We don't want to have a rule for how to format the national prefix if
                    // there isn't one.
                    builder.clear_national_prefix_formatting_rule()
                };
                Cow::Owned(builder.build())
            };
            self.format_nsn_using_pattern(&national_significant_number, &num_format_copy, number_format)?
                .into_owned()
        } else {
            national_significant_number
        };
        if let Some(extension) =
            Self::get_formatted_extension(phone_number, metadata, number_format)
        {
            formatted_number.push_str(&extension);
        }
        prefix_number_with_country_calling_code(country_calling_code, number_format, &mut formatted_number);
        Ok(formatted_number)
    }

    /// Formats a phone number in national format for dialing using the carrier as
    /// specified in the carrier_code. The carrier_code will always be used
    /// regardless of whether the phone number already has a preferred domestic
    /// carrier code stored. If carrier_code contains an empty string, return the
    /// number in national format without any carrier code.
    pub fn format_national_number_with_carrier_code(&self, phone_number: &PhoneNumber, carrier_code: &str) -> String {
        let country_calling_code = phone_number.country_code();
        let national_significant_number = national_significant_number(phone_number);
        if !self.registry.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number = self
            .format_nsn_with_carrier(
                &national_significant_number,
                metadata,
                PhoneNumberFormat::National,
                carrier_code,
            )
            .into_public()
            .into_owned();
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata, PhoneNumberFormat::National)
        {
            formatted_number.push_str(&formatted_extension);
        }
        formatted_number
    }

    /// Formats a phone number in national format for dialing using the carrier as
    /// specified in the preferred_domestic_carrier_code field of the PhoneNumber
    /// object passed in. If that is missing or empty, use the
    /// fallback_carrier_code passed in instead. If there is no
    /// preferred_domestic_carrier_code, and the fallback_carrier_code contains an
    /// empty string, return the number in national format without any carrier
    /// code.
    ///
    /// Use [`Self::format_national_number_with_carrier_code`] instead if the
    /// carrier code passed in should take precedence over the number's
    /// preferred_domestic_carrier_code when formatting.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        phone_number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> String {
        // Historically, we set this to an empty string when parsing with raw input
        // if none was found in the input string. However, this doesn't result in a
        // number we can dial. For this reason, we treat the empty string the same
        // as if it isn't set at all.
        let carrier_code = if !phone_number.preferred_domestic_carrier_code().is_empty() {
            phone_number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(phone_number, carrier_code)
    }

    /// Returns a number formatted in such a way that it can be dialed from a
    /// mobile phone in a specific region. If the number cannot be reached from
    /// the region (e.g. some countries block toll-free numbers from being called
    /// outside of the country), the method returns an empty string.
    pub fn format_number_for_mobile_dialing(
        &self,
        phone_number: &PhoneNumber,
        calling_from: &str,
        with_formatting: bool,
    ) -> String {
        let country_calling_code = phone_number.country_code();
        if !self.registry.has_valid_country_calling_code(country_calling_code) {
            return phone_number.raw_input().to_owned();
        }

        let mut formatted_number = String::new();
        // Clear the extension, as that part cannot normally be dialed together with
        // the main number.
        let number_no_extension = phone_number.to_builder().clear_extension().build();
        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        let number_type = self.get_number_type(&number_no_extension);
        let is_valid_number = number_type != PhoneNumberType::Unknown;
        if calling_from == region_code {
            let is_fixed_line_or_mobile = matches!(
                number_type,
                PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Mobile
            );
            // Carrier codes may be needed in some countries. We handle this here.
            if region_code == REGION_REQUIRING_CARRIER_CODE && is_fixed_line_or_mobile {
                // Brazilian fixed line and mobile numbers need to be dialed with a
                // carrier code when called within Brazil. Without that, most of the
                // carriers won't connect the call. Because of that, we return an
                // empty string here.
                if !number_no_extension.preferred_domestic_carrier_code().is_empty() {
                    formatted_number =
                        self.format_national_number_with_preferred_carrier_code(&number_no_extension, "");
                }
            } else if country_calling_code == NANPA_COUNTRY_CODE {
                // For NANPA countries, we output international format for numbers that
                // can be dialed internationally, since that always works, except for
                // numbers which might potentially be short numbers, which are always
                // dialled in national format.
                let national_number = national_significant_number(&number_no_extension);
                let number_format = match self.registry.get_metadata_for_region(calling_from) {
                    Some(region_metadata)
                        if self.can_be_internationally_dialled(&number_no_extension)
                            && test_number_length(&national_number, region_metadata)
                                != Err(ValidationError::TooShort) =>
                    {
                        PhoneNumberFormat::International
                    }
                    _ => PhoneNumberFormat::National,
                };
                formatted_number = self.format(&number_no_extension, number_format);
            } else {
                // For non-geographical countries, and Mexican, Chilean and Uzbek fixed
                // line and mobile numbers, we output international format for numbers
                // that can be dialed internationally as that always works.
                //
                // MX fixed line and mobile numbers should always be formatted in
                // international format, even when dialed within MX. For national
                // format to work, a carrier code needs to be used, and the correct
                // carrier code depends on if the caller and callee are from the same
                // local area. CL and UZ numbers need special prefixes in the national
                // format that are not part of the metadata.
                let international_preferred = region_code == REGION_CODE_FOR_NON_GEO_ENTITY
                    || (matches!(region_code, "MX" | "CL" | "UZ") && is_fixed_line_or_mobile);
                let number_format =
                    if international_preferred && self.can_be_internationally_dialled(&number_no_extension) {
                        PhoneNumberFormat::International
                    } else {
                        PhoneNumberFormat::National
                    };
                formatted_number = self.format(&number_no_extension, number_format);
            }
        } else if is_valid_number && self.can_be_internationally_dialled(&number_no_extension) {
            // We assume that short numbers are not diallable from outside their
            // region, so if a number is not a valid regular length phone number, we
            // treat it as if it cannot be internationally dialled.
            let number_format = if with_formatting {
                PhoneNumberFormat::International
            } else {
                PhoneNumberFormat::E164
            };
            return self.format(&number_no_extension, number_format);
        }
        if with_formatting {
            formatted_number
        } else {
            self.normalize_diallable_chars_only(&formatted_number)
        }
    }

    /// Formats a phone number for out-of-country dialing purposes.
    ///
    /// Note that in this version, if the number was entered originally using
    /// alpha characters and this version of the number is stored in raw_input,
    /// this representation of the number will be used rather than the digit
    /// representation. Grouping information, as specified by characters such as
    /// "-" and " ", will be retained.
    ///
    /// # Caveats:
    /// 1) This will not produce good results if the country calling code is both
    ///    present in the raw input _and_ is the start of the national number. This
    ///    is not a problem in the regions which typically use alpha numbers.
    /// 2) This will also not produce good results if the raw input has any
    ///    grouping information within the first three digits of the national
    ///    number, and if the function needs to strip preceding digits/words in the
    ///    raw input before these digits. Normally people group the first three
    ///    digits together so this is not a huge problem - and will be fixed if it
    ///    proves to be so.
    pub fn format_out_of_country_keeping_alpha_chars(
        &self,
        phone_number: &PhoneNumber,
        calling_from: &str,
    ) -> String {
        // If there is no raw input, then we can't keep alpha characters because
        // there aren't any. In this case, we return format_out_of_country_calling_number.
        if phone_number.raw_input().is_empty() {
            return self.format_out_of_country_calling_number(phone_number, calling_from);
        }
        let country_code = phone_number.country_code();
        if !self.registry.has_valid_country_calling_code(country_code) {
            return phone_number.raw_input().to_owned();
        }
        // Strip any prefix such as country calling code, IDD, that was present. We
        // do this by comparing the number in raw_input with the parsed number.
        // Normalize punctuation. We retain number grouping symbols such as " " only.
        let normalized_raw_input = normalize_helper(
            &self.reg_exps.all_plus_number_grouping_symbols,
            true,
            phone_number.raw_input(),
        );
        // Now we trim everything before the first three digits in the parsed
        // number. We choose three because all valid alpha numbers have 3 digits at
        // the start - if it does not, then we don't trim anything at all. Similarly,
        // if the national number was less than three digits, we don't trim
        // anything at all.
        let national_number = national_significant_number(phone_number);
        let mut raw_input = normalized_raw_input.as_str();
        if national_number.len() > 3 {
            if let Some(first_national_number_digit) = raw_input.find(&national_number[..3]) {
                raw_input = &raw_input[first_national_number_digit..];
            }
        }

        let metadata_for_region_calling_from = self.registry.get_metadata_for_region(calling_from);
        if country_code == NANPA_COUNTRY_CODE {
            if self.registry.is_nanpa_region(calling_from) {
                let mut buf = itoa::Buffer::new();
                return fast_cat::concat_str!(buf.format(country_code), " ", raw_input);
            }
        } else if let Some(metadata_for_region_calling_from) =
            metadata_for_region_calling_from.filter(|metadata| metadata.country_code() == country_code)
        {
            let formatting_pattern = self
                .choose_formatting_pattern_for_number(metadata_for_region_calling_from.number_format(), &national_number)
                .into_public();
            let Some(formatting_pattern) = formatting_pattern else {
                // If no pattern above is matched, we format the original input.
                return raw_input.to_owned();
            };
            // The first group is the first group of digits that the user wrote
            // together.
            let new_format = formatting_pattern
                .to_builder()
                .pattern("(\\d+)(.*)")
                // Here we just concatenate them back together after the national
                // prefix has been fixed.
                .format("$1$2")
                .build();
            // Now we format using this pattern instead of the default pattern, but
            // with the national prefix prefixed if necessary.
            // This will not work in the cases where the pattern (and not the leading
            // digits) decide whether a national prefix needs to be used, since we
            // have overridden the pattern to match anything, but that is not the case
            // in the metadata to date.
            return self
                .format_nsn_using_pattern(raw_input, &new_format, PhoneNumberFormat::National)
                .into_public()
                .into_owned();
        }

        let international_prefix_for_formatting = metadata_for_region_calling_from
            .map(|metadata| self.international_prefix_for_formatting(metadata))
            .unwrap_or_default();

        let mut formatted_number = raw_input.to_owned();
        let region_code = self.registry.get_region_code_for_country_code(country_code);
        if let Some(metadata_for_region) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_code, region_code)
        {
            if let Some(formatted_extension) =
                Self::get_formatted_extension(phone_number, metadata_for_region, PhoneNumberFormat::International)
            {
                formatted_number.push_str(&formatted_extension);
            }
        }
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_code),
                " ",
                formatted_number.as_str()
            );
        } else {
            // Invalid region entered as country-calling-from (so no metadata was
            // found for it) or the region chosen has multiple international dialling
            // prefixes.
            if metadata_for_region_calling_from.is_none() {
                warn!("Trying to format number from invalid region {}. International formatting applied.", calling_from);
            }
            prefix_number_with_country_calling_code(
                country_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        formatted_number
    }

    /// Formats a phone number for out-of-country dialing purposes. If no
    /// calling_from is supplied, we format the number in its INTERNATIONAL format.
    /// If the country calling code is the same as that of the region where the
    /// number is from, then NATIONAL formatting will be applied.
    ///
    /// If the number itself has a country calling code of zero or an otherwise
    /// invalid country calling code, then we return the number with no formatting
    /// applied.
    ///
    /// Note this function takes care of the case for calling inside of NANPA and
    /// between Russia and Kazakhstan (who share the same country calling code).
    /// In those cases, no international prefix is used. For regions which have
    /// multiple international prefixes, the number in its INTERNATIONAL format
    /// will be returned instead, unless the region has a preferred prefix.
    pub fn format_out_of_country_calling_number(&self, phone_number: &PhoneNumber, calling_from: &str) -> String {
        let Some(metadata_for_region_calling_from) = self.registry.get_metadata_for_region(calling_from) else {
            warn!("Trying to format number from invalid region {}. International formatting applied.", calling_from);
            return self.format(phone_number, PhoneNumberFormat::International);
        };
        let country_calling_code = phone_number.country_code();
        let national_significant_number = national_significant_number(phone_number);
        if !self.registry.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.registry.is_nanpa_region(calling_from) {
                // For NANPA regions, return the national format for these regions but
                // prefix it with the country calling code.
                let mut buf = itoa::Buffer::new();
                let national_format = self.format(phone_number, PhoneNumberFormat::National);
                return fast_cat::concat_str!(buf.format(country_calling_code), " ", national_format.as_str());
            }
        } else if country_calling_code == metadata_for_region_calling_from.country_code() {
            // If regions share a country calling code, the country calling code need
            // not be dialled. This also applies when dialling within a region, so this
            // if clause covers both these cases. Technically this is the case for
            // dialling from La Reunion to other overseas departments of France (French
            // Guiana, Martinique, Guadeloupe), but not vice versa - so we don't cover
            // this edge case for now and for those cases return the version including
            // country calling code. Details here:
            // http://www.petitfute.com/voyage/225-info-pratiques-reunion
            return self.format(phone_number, PhoneNumberFormat::National);
        }
        // Metadata cannot be missing because the country calling code is valid.
        let international_prefix_for_formatting =
            self.international_prefix_for_formatting(metadata_for_region_calling_from);

        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        let Some(metadata_for_region) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number = self
            .format_nsn(
                &national_significant_number,
                metadata_for_region,
                PhoneNumberFormat::International,
            )
            .into_public()
            .into_owned();
        if let Some(formatted_extension) =
            Self::get_formatted_extension(phone_number, metadata_for_region, PhoneNumberFormat::International)
        {
            formatted_number.push_str(&formatted_extension);
        }
        if !international_prefix_for_formatting.is_empty() {
            let mut buf = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buf.format(country_calling_code),
                " ",
                formatted_number.as_str()
            );
        } else {
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        formatted_number
    }

    /// Formats a phone number using the original phone number format (e.g.
    /// INTERNATIONAL or NATIONAL) that the number is parsed from, provided that
    /// the number has been parsed with
    /// [`Self::parse_and_keep_raw_input`]. Otherwise the number will be
    /// formatted in NATIONAL format.
    ///
    /// The original format is embedded in the country_code_source field of the
    /// PhoneNumber object passed in, which is only set when parsing keeps the raw
    /// input. When we don't have a formatting pattern for the number, the method
    /// falls back to returning the raw input.
    ///
    /// Note this method guarantees no digit will be inserted, removed or modified
    /// as a result of formatting.
    pub fn format_in_original_format(&self, phone_number: &PhoneNumber, region_calling_from: &str) -> String {
        let raw_input = phone_number.raw_input();
        if !raw_input.is_empty()
            && (self.has_unexpected_italian_leading_zero(phone_number)
                || !self.has_formatting_pattern_for_number(phone_number))
        {
            // We check if we have the formatting pattern because without that, we
            // might format the number as a group without national prefix.
            return raw_input.to_owned();
        }
        let formatted_number = match phone_number.country_code_source() {
            CountryCodeSource::FromNumberWithPlusSign => {
                self.format(phone_number, PhoneNumberFormat::International)
            }
            CountryCodeSource::FromNumberWithIdd => {
                self.format_out_of_country_calling_number(phone_number, region_calling_from)
            }
            CountryCodeSource::FromNumberWithoutPlusSign => {
                let international_format = self.format(phone_number, PhoneNumberFormat::International);
                international_format
                    .strip_prefix('+')
                    .map(str::to_owned)
                    .unwrap_or(international_format)
            }
            CountryCodeSource::Unspecified => self.format(phone_number, PhoneNumberFormat::National),
            CountryCodeSource::FromDefaultCountry => self.format_from_default_country(phone_number),
        };
        // If no digit is inserted/removed/modified as a result of our formatting,
        // we return the formatted phone number; otherwise we return the raw input
        // the user entered.
        if !raw_input.is_empty() {
            let normalized_formatted_number = self.normalize_diallable_chars_only(&formatted_number);
            let normalized_raw_input = self.normalize_diallable_chars_only(raw_input);
            if normalized_formatted_number != normalized_raw_input {
                trace!("Formatting of '{}' changed its digits, raw input is used", raw_input);
                return raw_input.to_owned();
            }
        }
        formatted_number
    }

    /// National format for a number whose calling code came from the default
    /// region, keeping the national prefix only if the user typed it.
    fn format_from_default_country(&self, phone_number: &PhoneNumber) -> String {
        let national_format = self.format(phone_number, PhoneNumberFormat::National);
        let region_code = self
            .registry
            .get_region_code_for_country_code(phone_number.country_code());
        // We strip non-digits from the NDD here, and from the raw input later,
        // so that we can compare them easily.
        let Some(national_prefix) = self.get_ndd_prefix_for_region(region_code, true) else {
            // If the region doesn't have a national prefix at all, we can safely
            // return the result of the national format, without the national prefix.
            return national_format;
        };
        // Otherwise, we check if the original number was entered with a national
        // prefix.
        if self.raw_input_contains_national_prefix(phone_number.raw_input(), &national_prefix, region_code) {
            // If so, we can safely return the national format.
            return national_format;
        }
        let Some(metadata) = self.registry.get_metadata_for_region(region_code) else {
            return national_format;
        };
        let national_number = national_significant_number(phone_number);
        let format_rule = self
            .choose_formatting_pattern_for_number(metadata.number_format(), &national_number)
            .into_public();
        // The format rule could still be None here if the national number was 0
        // and there was no raw input (this should not be possible for numbers
        // generated by the parser).
        let Some(format_rule) = format_rule else {
            return national_format;
        };
        // When the format we apply to this number doesn't contain national prefix,
        // we can just return the national format.
        let candidate_national_prefix_rule = format_rule.national_prefix_formatting_rule();
        // We assume that the first-group symbol will never be _before_ the
        // national prefix.
        let index_of_first_group = match candidate_national_prefix_rule.find("$1") {
            Some(index) if index > 0 => index,
            _ => return national_format,
        };
        let candidate_national_prefix =
            self.normalize_digits_only(&candidate_national_prefix_rule[..index_of_first_group]);
        if candidate_national_prefix.is_empty() {
            // National prefix not used when formatting this number.
            return national_format;
        }
        // Otherwise, we need to remove the national prefix from our output.
        let num_format_copy = format_rule.to_builder().clear_national_prefix_formatting_rule().build();
        self.format_by_pattern(phone_number, PhoneNumberFormat::National, &[num_format_copy])
            .into_public()
    }

    /// National format without the national prefix, for a number typed without
    /// it whose formatting rule marks the prefix as optional.
    fn format_without_optional_national_prefix(
        &self,
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
    ) -> Option<String> {
        let raw_input = phone_number.raw_input();
        if raw_input.is_empty() || phone_number.country_code_source() != CountryCodeSource::FromDefaultCountry {
            return None;
        }
        let national_number = national_significant_number(phone_number);
        let format_rule = self
            .choose_formatting_pattern_for_number(metadata.number_format(), &national_number)
            .into_public()?;
        if !format_rule.national_prefix_optional_when_formatting()
            || format_rule.national_prefix_formatting_rule().is_empty()
        {
            return None;
        }
        let national_prefix = self.get_ndd_prefix_for_region(metadata.id(), true)?;
        if self.raw_input_contains_national_prefix(raw_input, &national_prefix, metadata.id()) {
            return None;
        }
        let num_format_copy = format_rule.to_builder().clear_national_prefix_formatting_rule().build();
        Some(
            self.format_by_pattern(phone_number, PhoneNumberFormat::National, &[num_format_copy])
                .into_public(),
        )
    }

    /// Check if raw_input, which is assumed to be in the national format, has a
    /// national prefix. The national prefix is assumed to be in digits-only
    /// form.
    fn raw_input_contains_national_prefix(&self, raw_input: &str, national_prefix: &str, region_code: &str) -> bool {
        let normalized_national_number = self.normalize_digits_only(raw_input);
        let Some(number_without_prefix) = normalized_national_number.strip_prefix(national_prefix) else {
            return false;
        };
        // Some Japanese numbers (e.g. 00777123) might be mistaken to contain the
        // national prefix when written without it (e.g. 0777123) if we just do
        // prefix matching. To tackle that, we check the validity of the number if
        // the assumed national prefix is removed (777123 won't be valid in Japan).
        self.parse(number_without_prefix, region_code)
            .is_ok_and(|phone_number| self.is_valid_number(&phone_number))
    }

    fn has_unexpected_italian_leading_zero(&self, phone_number: &PhoneNumber) -> bool {
        if !phone_number.italian_leading_zero() {
            return false;
        }
        let country_calling_code = phone_number.country_code();
        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        !self
            .registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
            .is_some_and(PhoneMetadata::leading_zero_possible)
    }

    fn has_formatting_pattern_for_number(&self, phone_number: &PhoneNumber) -> bool {
        let country_calling_code = phone_number.country_code();
        let region_code = self.registry.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) = self
            .registry
            .get_metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return false;
        };
        let national_number = national_significant_number(phone_number);
        self.choose_formatting_pattern_for_number(metadata.number_format(), &national_number)
            .into_public()
            .is_some()
    }

    /// The prefix written before the calling code when dialing out of a region:
    /// its international prefix if it is a single one, else its preferred one.
    /// Empty if neither exists, in which case "+" is used.
    fn international_prefix_for_formatting<'a>(&self, metadata: &'a PhoneMetadata) -> &'a str {
        let international_prefix = metadata.international_prefix();
        // For regions that have multiple international prefixes, the international
        // format of the number is returned, unless there is a preferred
        // international prefix.
        if self.reg_exps.single_international_prefix.is_match(international_prefix) {
            international_prefix
        } else {
            metadata.preferred_international_prefix().unwrap_or_default()
        }
    }

    pub(super) fn format_nsn<'b>(
        &self,
        phone_number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        self.format_nsn_with_carrier(phone_number, metadata, number_format, "")
    }

    // Note in some regions, the national number can be written in two completely
    // different ways depending on whether it forms part of the NATIONAL format or
    // INTERNATIONAL format. The number_format parameter here is used to specify
    // which format to use for those cases. If a carrier_code is specified, this
    // will be inserted into the formatted string to replace $CC.
    fn format_nsn_with_carrier<'b>(
        &self,
        number: &'b str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        // When the intl_number_formats exists, we use that to format national number
        // for the INTERNATIONAL format instead of using the number_formats.
        let available_formats = if metadata.intl_number_format.is_empty()
            || number_format == PhoneNumberFormat::National
        {
            &metadata.number_format
        } else {
            &metadata.intl_number_format
        };
        let formatting_pattern = self.choose_formatting_pattern_for_number(available_formats, number)?;
        if let Some(formatting_pattern) = formatting_pattern {
            self.format_nsn_using_pattern_with_carrier(number, formatting_pattern, number_format, carrier_code)
        } else {
            Ok(Cow::Borrowed(number))
        }
    }

    pub(super) fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Result<Option<&'b NumberFormat>, InvalidRegexError> {
        let regex_cache = self.registry.regex_cache();
        for format in available_formats {
            // We always use the last leading_digits_pattern, as it is the most
            // detailed.
            if let Some(leading_digits) = format.leading_digits_pattern.last() {
                if !regex_cache.matches_start(leading_digits, national_number)? {
                    continue;
                }
            }
            if regex_cache.full_match(format.pattern(), national_number)? {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    // Note that carrier_code is optional - if an empty string, no carrier code
    // replacement will take place.
    fn format_nsn_using_pattern_with_carrier<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        let mut number_format_rule = Cow::Borrowed(formatting_pattern.format());
        let domestic_carrier_code_formatting_rule = formatting_pattern.domestic_carrier_code_formatting_rule();
        let national_prefix_formatting_rule = formatting_pattern.national_prefix_formatting_rule();
        if number_format == PhoneNumberFormat::National
            && !carrier_code.is_empty()
            && !domestic_carrier_code_formatting_rule.is_empty()
        {
            // Replace the $CC in the formatting rule with the desired carrier code.
            let carrier_code_formatting_rule = self
                .reg_exps
                .carrier_code_pattern
                .replace(domestic_carrier_code_formatting_rule, NoExpand(carrier_code));
            // Now replace the $FG in the formatting rule with the first group and
            // the carrier code combined in the appropriate way.
            number_format_rule = Cow::Owned(
                self.reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format_rule, &*carrier_code_formatting_rule)
                    .into_owned(),
            );
        } else if number_format == PhoneNumberFormat::National && !national_prefix_formatting_rule.is_empty() {
            // Use the national prefix formatting rule instead.
            // Apply the national_prefix_formatting_rule as the formatting_pattern
            // contains only information on how the national significant number
            // should be formatted at this point.
            number_format_rule = Cow::Owned(
                self.reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format_rule, national_prefix_formatting_rule)
                    .into_owned(),
            );
        }

        let pattern_to_match = self
            .registry
            .regex_cache()
            .get_fully_anchored_regex(formatting_pattern.pattern())?;
        let formatted_number = pattern_to_match.replace_all(national_number, &*number_format_rule);

        if number_format == PhoneNumberFormat::RFC3966 {
            // First consume any leading punctuation, if any was present.
            let without_leading_separators = self
                .reg_exps
                .separator_pattern
                .consume_start(&formatted_number)
                .unwrap_or(&formatted_number);
            // Then replace all separators with a "-".
            return Ok(Cow::Owned(
                self.reg_exps
                    .separator_pattern
                    .replace_all(without_leading_separators, "-")
                    .into_owned(),
            ));
        }
        Ok(formatted_number)
    }

    /// Simple wrapper of format_nsn_using_pattern_with_carrier for the common
    /// case of no carrier code.
    fn format_nsn_using_pattern<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
    ) -> Result<Cow<'b, str>, InvalidRegexError> {
        self.format_nsn_using_pattern_with_carrier(national_number, formatting_pattern, number_format, "")
    }

    // Returns the formatted extension of a phone number, if the phone number had an
    // extension specified else None.
    fn get_formatted_extension(
        phone_number: &PhoneNumber,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if phone_number.extension().is_empty() {
            return None;
        }
        let prefix = if number_format == PhoneNumberFormat::RFC3966 {
            RFC3966_EXTN_PREFIX
        } else {
            metadata.preferred_extn_prefix().unwrap_or(DEFAULT_EXTN_PREFIX)
        };
        Some(fast_cat::concat_str!(prefix, phone_number.extension()))
    }
}
