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

/// Where the country calling code of a parsed number came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CountryCodeSource {
    /// Not recorded; numbers parsed without keeping raw input carry this.
    #[default]
    Unspecified,
    /// The number started with a plus sign, e.g. `+1 650 253 0000`.
    FromNumberWithPlusSign,
    /// The number started with the region's international dialing prefix,
    /// e.g. `011 1 650 253 0000` dialed from the US.
    FromNumberWithIdd,
    /// The number started with the calling code but no plus sign, e.g.
    /// `1 650 253 0000`.
    FromNumberWithoutPlusSign,
    /// No calling code was present; the default region's one was used.
    FromDefaultCountry,
}

/// A structured phone number.
///
/// Values are immutable; use [`PhoneNumber::builder`] or
/// [`PhoneNumber::to_builder`] to create modified copies. Two numbers are
/// equal only if every field is equal, including context fields such as the
/// raw input. Use the matcher for relaxed comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: i32,
    national_number: u64,
    extension: Option<String>,
    italian_leading_zero: bool,
    number_of_leading_zeros: i32,
    raw_input: Option<String>,
    country_code_source: CountryCodeSource,
    preferred_domestic_carrier_code: Option<String>,
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self {
            country_code: 0,
            national_number: 0,
            extension: None,
            italian_leading_zero: false,
            number_of_leading_zeros: 1,
            raw_input: None,
            country_code_source: CountryCodeSource::Unspecified,
            preferred_domestic_carrier_code: None,
        }
    }
}

impl PhoneNumber {
    pub fn builder() -> PhoneNumberBuilder {
        PhoneNumberBuilder::default()
    }

    pub fn to_builder(&self) -> PhoneNumberBuilder {
        PhoneNumberBuilder { number: self.clone() }
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    /// In some regions the national number starts with a zero that is part of
    /// the number itself (Italy, for instance), not a national prefix.
    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero
    }

    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or("")
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }
}

/// Accumulates the fields of a [`PhoneNumber`]; consumed by `build`.
#[derive(Debug, Clone, Default)]
pub struct PhoneNumberBuilder {
    number: PhoneNumber,
}

impl PhoneNumberBuilder {
    pub fn country_code(mut self, country_code: i32) -> Self {
        self.number.country_code = country_code;
        self
    }

    pub fn national_number(mut self, national_number: u64) -> Self {
        self.number.national_number = national_number;
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.number.extension = Some(extension.into());
        self
    }

    pub fn clear_extension(mut self) -> Self {
        self.number.extension = None;
        self
    }

    pub fn italian_leading_zero(mut self, italian_leading_zero: bool) -> Self {
        self.number.italian_leading_zero = italian_leading_zero;
        self
    }

    pub fn number_of_leading_zeros(mut self, number_of_leading_zeros: i32) -> Self {
        self.number.number_of_leading_zeros = number_of_leading_zeros;
        self
    }

    pub fn raw_input(mut self, raw_input: impl Into<String>) -> Self {
        self.number.raw_input = Some(raw_input.into());
        self
    }

    pub fn country_code_source(mut self, source: CountryCodeSource) -> Self {
        self.number.country_code_source = source;
        self
    }

    pub fn preferred_domestic_carrier_code(mut self, carrier_code: impl Into<String>) -> Self {
        self.number.preferred_domestic_carrier_code = Some(carrier_code.into());
        self
    }

    pub fn clear_preferred_domestic_carrier_code(mut self) -> Self {
        self.number.preferred_domestic_carrier_code = None;
        self
    }

    pub fn build(self) -> PhoneNumber {
        self.number
    }
}
