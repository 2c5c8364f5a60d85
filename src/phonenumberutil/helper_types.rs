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


use crate::CountryCodeSource;

/// A normalized number with its international prefix (or plus sign) removed,
/// and the way that prefix was written.
#[derive(Debug)]
pub struct PhoneNumberWithCountryCodeSource {
    pub phone_number: String,
    pub country_code_source: CountryCodeSource
}

impl PhoneNumberWithCountryCodeSource {
    pub fn new(phone_number: String, country_code_source: CountryCodeSource) -> Self {
        Self { phone_number, country_code_source }
    }
}

/// Result of extracting the country calling code from the start of a
/// number.
#[derive(Debug)]
pub struct ExtractedCountryCode {
    /// 0 when the number carried no calling code of its own.
    pub country_code: i32,
    /// Normalized digits following the calling code.
    pub national_number: String,
    pub country_code_source: CountryCodeSource,
}

/// A national number after its national prefix was removed.
#[derive(Debug)]
pub struct StrippedNationalPrefix {
    pub national_number: String,
    /// Empty when the prefix carried no carrier code.
    pub carrier_code: String,
}
