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

use super::{
    PhoneNumberUtil,
    helper_constants::MIN_LENGTH_FOR_NSN,
    helper_functions::normalize_helper,
};

impl PhoneNumberUtil {
    /// Converts all alpha characters in a number to their respective digits on
    /// a keypad, but retains existing formatting.
    pub fn convert_alpha_characters_in_number(&self, number: &str) -> String {
        normalize_helper(&self.reg_exps.alpha_phone_mappings, false, number)
    }

    /// Normalizes a string of characters representing a phone number. This
    /// performs the following conversions:
    ///   - Punctuation is stripped.
    ///   For ALPHA/VANITY numbers:
    ///   - Letters are converted to their numeric representation on a telephone
    ///     keypad. The keypad used here is the one defined in ITU Recommendation
    ///     E.161. This is only done if there are 3 or more letters in the number, to
    ///     lessen the risk that such letters are typos.
    ///   For other numbers:
    ///   - Wide-ascii digits are converted to normal ASCII (European) digits.
    ///   - Arabic-Indic numerals are converted to European numerals.
    ///   - Spurious alpha characters are stripped.
    pub fn normalize(&self, number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.is_match(number) {
            normalize_helper(
                &self.reg_exps.alpha_phone_mappings,
                true,
                &dec_from_char::normalize_decimals(number),
            )
        } else {
            self.normalize_digits_only(number)
        }
    }

    /// Normalizes a string of characters representing a phone number. This
    /// converts wide-ascii and arabic-indic numerals to European numerals, and
    /// strips punctuation and alpha characters.
    pub fn normalize_digits_only(&self, number: &str) -> String {
        dec_from_char::normalize_decimals(number)
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Normalizes a string of characters representing a phone number. This strips
    /// all characters which are not diallable on a mobile phone keypad (including
    /// all non-ASCII digits).
    pub fn normalize_diallable_chars_only(&self, number: &str) -> String {
        normalize_helper(&self.reg_exps.diallable_char_mappings, true, number)
    }

    /// Attempts to extract a possible number from the string passed in. This
    /// currently strips all leading characters that cannot be used to start a
    /// phone number. Characters that can be used to start a phone number are
    /// defined in the valid_start_char_pattern. If none of these characters are
    /// found in the number passed in, an empty string is returned. This function
    /// also attempts to strip off any alternative extensions or endings if two or
    /// more are present, such as in the case of: (530) 583-6985 x302/x2303. The
    /// second extension here makes this actually two phone numbers, (530) 583-6985
    /// x302 and (530) 583-6985 x2303. We remove the second extension so that the
    /// first number is parsed correctly.
    pub fn extract_possible_number<'a>(&self, number: &'a str) -> &'a str {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(number) else {
            return "";
        };
        let mut possible_number = &number[start.start()..];
        // Remove trailing non-alpha non-numerical characters.
        if let Some(trailing) = self.reg_exps.unwanted_end_char_pattern.find(possible_number) {
            possible_number = &possible_number[..trailing.start()];
        }
        // Check for extra numbers at the end.
        if let Some(second_number) = self.reg_exps.second_number_start_pattern.find(possible_number) {
            possible_number = &possible_number[..second_number.start()];
        }
        possible_number
    }

    /// Checks to see if the string of characters could possibly be a phone number
    /// at all. At the moment, checks to see that the string begins with at least 2
    /// digits, ignoring any punctuation commonly found in phone numbers. This
    /// method does not require the number to be normalized in advance - but does
    /// assume that leading non-number symbols have been removed, such as by the
    /// method [`Self::extract_possible_number`].
    pub fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(number)
    }

    /// Returns true if the number is a valid vanity (alpha) number such as 800
    /// MICROSOFT. A valid vanity number will start with at least 3 digits and will
    /// have three or more alpha characters. This does not do region-specific
    /// checks - to work out if this number is actually valid for a region, it
    /// should be parsed and methods such as [`Self::is_possible_number_with_reason`]
    /// and [`Self::is_valid_number`] should be used.
    pub fn is_alpha_number(&self, number: &str) -> bool {
        if !self.is_viable_phone_number(number) {
            // Number is not a valid alpha number.
            return false;
        }
        let (number_without_extension, _) = self.maybe_strip_extension(number);
        self.reg_exps.valid_alpha_phone_pattern.is_match(number_without_extension)
    }
}
