// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 The Kashin Vladislav (Rust adaptation author)
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


use std::collections::{HashMap, HashSet};

use regex::Regex;

use super::{
    helper_constants::{
        DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, SECOND_NUMBER_START, STAR_SIGN, VALID_ALPHA,
        VALID_PUNCTUATION,
    },
    helper_functions::create_extn_pattern,
};

/// Patterns and character tables that do not depend on metadata. Built once
/// per [`super::PhoneNumberUtil`].
pub(super) struct PhoneNumberRegExpsAndMappings {
    /// A map that contains characters that are essential when dialling. That means
    /// any of the characters in this map must not be removed from a number when
    /// dialing, otherwise the call will not reach the intended destination.
    pub diallable_char_mappings: HashMap<char, char>,
    /// These mappings map a character (key) to a specific digit that should
    /// replace it for normalization purposes.
    pub alpha_mappings: HashMap<char, char>,
    /// For performance reasons, store a map of combining alpha_mappings with ASCII
    /// digits.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// Separate map of all symbols that we wish to retain when formatting alpha
    /// numbers. This includes digits, ascii letters and number grouping symbols
    /// such as "-" and " ".
    pub all_plus_number_grouping_symbols: HashMap<char, char>,

    /// Map of country calling codes that use a mobile token before the area code.
    /// One example of when this is relevant is when determining the length of the
    /// national destination code, which should be the length of the area code plus
    /// the length of the mobile token.
    pub mobile_token_mappings: HashMap<i32, char>,

    /// Set of country codes that have geographically assigned mobile numbers (see
    /// geo_mobile_countries below) which are not based on *area codes*. For
    /// example, in China mobile numbers start with a carrier indicator, and beyond
    /// that are geographically assigned: this carrier indicator is not considered
    /// to be an area code.
    pub geo_mobile_countries_without_mobile_area_codes: HashSet<i32>,

    /// Set of country calling codes that have geographically assigned mobile
    /// numbers. This may not be complete; we add calling codes case by case, as we
    /// find geographical mobile numbers or hear from user reports.
    pub geo_mobile_countries: HashSet<i32>,

    /// Pattern that makes it easy to distinguish whether a region has a single
    /// international dialing prefix or not. If a region has a single international
    /// prefix (e.g. 011 in USA), it will be represented as a string that contains
    /// a sequence of ASCII digits, and possibly a tilde, which signals waiting for
    /// the tone. If there are multiple available international prefixes in a
    /// region, they will be represented as a regex string that always contains one
    /// or more characters that are not ASCII digits or a tilde.
    pub single_international_prefix: Regex,

    pub capturing_digit_pattern: Regex,

    /// Regular expression of acceptable characters that may start a phone number
    /// for the purposes of parsing. This allows us to strip away meaningless
    /// prefixes to phone numbers that may be mistakenly given to us. This consists
    /// of digits, the plus symbol and arabic-indic digits. This does not contain
    /// alpha characters, although they may be used later in the number. It also
    /// does not include other punctuation, as this will be stripped later during
    /// parsing and is of no information value when parsing a number.
    pub valid_start_char_pattern: Regex,

    pub second_number_start_pattern: Regex,

    /// Trailing characters that we want to remove: everything that is not alpha
    /// or numerical. The hash character is retained here, as it may signify the
    /// previous block was an extension.
    pub unwanted_end_char_pattern: Regex,

    /// Regular expression of groups of valid punctuation characters.
    pub separator_pattern: Regex,

    pub non_digits_pattern: Regex,

    /// Regexp of all known extension prefixes used by different regions followed
    /// by 1 or more valid digits, for use when parsing. Anchored at the end.
    pub extn_pattern: Regex,

    /// Viable phone numbers: at least three digits with only valid punctuation,
    /// alpha characters and digits around them, optionally followed by an
    /// extension. 'x' counts as punctuation since it is a common carrier code
    /// placeholder; several leading plus signs are allowed.
    ///
    /// A bare two-digit number ("15") is accepted too, but only without
    /// punctuation.
    pub valid_phone_number_pattern: Regex,

    /// We use this pattern to check if the phone number has at least three letters
    /// in it - if so, then we treat it as a number where some phone-number digits
    /// are represented by letters.
    pub valid_alpha_phone_pattern: Regex,

    /// The first group reference of a format, e.g. `$1` in `$1 $2`. `\d` rather
    /// than `1` because some formats (Argentina) do not use the first group.
    pub first_group_capturing_pattern: Regex,

    pub carrier_code_pattern: Regex,

    pub plus_chars_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn initialize_regexp_mappings(&mut self) {
        self.mobile_token_mappings.insert(54, '9');

        self.geo_mobile_countries_without_mobile_area_codes.insert(86);  // China

        self.geo_mobile_countries.insert(52);  // Mexico
        self.geo_mobile_countries.insert(54);  // Argentina
        self.geo_mobile_countries.insert(55);  // Brazil
        self.geo_mobile_countries.insert(62);  // Indonesia: some prefixes only (fixed CMDA wireless)
        self.geo_mobile_countries.extend(&self.geo_mobile_countries_without_mobile_area_codes);

        let ascii_digit_mappings: HashMap<char, char> = ('0'..='9').map(|d| (d, d)).collect();

        // Only uppercase keys; lookups uppercase the character first.
        let keypad = [
            ("ABC", '2'), ("DEF", '3'), ("GHI", '4'), ("JKL", '5'),
            ("MNO", '6'), ("PQRS", '7'), ("TUV", '8'), ("WXYZ", '9'),
        ];
        self.alpha_mappings = keypad
            .iter()
            .flat_map(|(letters, digit)| letters.chars().map(move |letter| (letter, *digit)))
            .collect();

        self.alpha_phone_mappings = self.alpha_mappings.clone();
        self.alpha_phone_mappings.extend(&ascii_digit_mappings);

        self.diallable_char_mappings = ascii_digit_mappings.clone();
        self.diallable_char_mappings.insert('+', '+');
        self.diallable_char_mappings.insert('*', '*');
        self.diallable_char_mappings.insert('#', '#');

        let mut all_plus_number_groupings = HashMap::new();
        // insert (lower letter -> upper letter) and (upper letter -> upper letter) mappings.
        for c in self.alpha_mappings.keys() {
            all_plus_number_groupings.insert(c.to_ascii_lowercase(), *c);
            all_plus_number_groupings.insert(*c, *c);
        }
        all_plus_number_groupings.extend(&ascii_digit_mappings);
        // insert grouping symbols.
        for dash in ['-', '\u{FF0D}', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}'] {
            all_plus_number_groupings.insert(dash, '-');
        }
        all_plus_number_groupings.insert('/', '/');
        all_plus_number_groupings.insert('\u{FF0F}', '/');
        all_plus_number_groupings.insert(' ', ' ');
        all_plus_number_groupings.insert('\u{3000}', ' ');
        all_plus_number_groupings.insert('\u{2060}', ' ');
        all_plus_number_groupings.insert('.', '.');
        all_plus_number_groupings.insert('\u{FF0E}', '.');
        self.all_plus_number_grouping_symbols = all_plus_number_groupings;
    }

    pub fn new() -> Self {
        let extn_patterns_for_parsing = create_extn_pattern(true);
        // it'll be initialized only once, so we can use slow format!
        let valid_phone_number = format!(
            "{digits}{{{min}}}|[{plus}]*(?:[{punct}{star}]*{digits}){{3,}}[{punct}{star}{alpha}{digits}]*",
            digits = DIGITS,
            min = MIN_LENGTH_FOR_NSN,
            plus = PLUS_CHARS,
            punct = VALID_PUNCTUATION,
            star = STAR_SIGN,
            alpha = VALID_ALPHA,
        );

        let mut instance = Self {
            diallable_char_mappings: Default::default(),
            alpha_mappings: Default::default(),
            alpha_phone_mappings: Default::default(),
            all_plus_number_grouping_symbols: Default::default(),
            mobile_token_mappings: Default::default(),
            geo_mobile_countries: Default::default(),
            geo_mobile_countries_without_mobile_area_codes: Default::default(),
            single_international_prefix: Regex::new("^[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?$").unwrap(),
            capturing_digit_pattern: Regex::new(&format!("({})", DIGITS)).unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            second_number_start_pattern: Regex::new(SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new("[^\\p{N}\\p{L}#]+$").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            non_digits_pattern: Regex::new("\\D+").unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                &valid_phone_number, &extn_patterns_for_parsing
            ))
            .unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}").unwrap(),
            first_group_capturing_pattern: Regex::new("(\\$\\d)").unwrap(),
            carrier_code_pattern: Regex::new("\\$CC").unwrap(),
            plus_chars_pattern: Regex::new(&format!("^[{}]+", PLUS_CHARS)).unwrap(),
        };
        instance.initialize_regexp_mappings();
        instance
    }
}
