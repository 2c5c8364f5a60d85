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

use std::num::ParseIntError;

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

#[derive(Debug, PartialEq, Error)]
pub enum ParseErrorInternal {
    #[error("{0}")]
    FailedToParse(#[from] ParseError),
    #[error("{0}")]
    RegexError(#[from] InvalidRegexError)
}

#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    // Removed as OK variant
    // NoParsingError,
    #[error("Invalid country code")]
    InvalidCountryCode,
    #[error("Not a number: {0}")]
    NotANumber(#[from] NotANumberError),
    #[error("Too short after idd")]
    TooShortAfterIdd,
    #[error("Too short Nsn")]
    TooShortNsn,
    #[error("Too long nsn")]
    TooLongNsn,
}

#[derive(Debug, PartialEq, Error)]
pub enum NotANumberError {
    #[error("Number not matched a valid number pattern")]
    NotMatchedValidNumberPattern,
    #[error("Empty input")]
    EmptyInput,
    #[error("{0}")]
    FailedToParseNumberAsInt(#[from] ParseIntError),
}

#[derive(Debug, PartialEq, Error)]
pub enum GetExampleNumberErrorInternal {
    #[error("{0}")]
    FailedToGetExampleNumber(#[from] GetExampleNumberError),
    #[error("{0}")]
    RegexError(#[from] InvalidRegexError)
}

#[derive(Debug, PartialEq, Error)]
pub enum GetExampleNumberError {
    #[error("Parse error: {0}")]
    FailedToParse(#[from] ParseError),
    #[error("No example number")]
    NoExampleNumber,
    #[error("Could not get number")]
    CouldNotGetNumber,
    #[error("Invalid country code provided")]
    InvalidRegionCode
}

/// Possible outcomes when testing if a PhoneNumber is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// The number is longer than all valid numbers for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}

impl From<ParseErrorInternal> for GetExampleNumberErrorInternal {
    fn from(value: ParseErrorInternal) -> Self {
        match value {
            ParseErrorInternal::FailedToParse(err) => 
                GetExampleNumberError::FailedToParse(err).into(),
            ParseErrorInternal::RegexError(err) =>
                GetExampleNumberErrorInternal::RegexError(err)
        }
    }
}

impl From<NotANumberError> for ParseErrorInternal {
    fn from(value: NotANumberError) -> Self {
        ParseError::NotANumber(value).into()
    }
}

impl GetExampleNumberErrorInternal {
    pub fn into_public(self) -> GetExampleNumberError {
        match self {
            GetExampleNumberErrorInternal::FailedToGetExampleNumber(err) => err,
            GetExampleNumberErrorInternal::RegexError(err) => 
                panic!("A valid regex is expected in metadata; this indicates a library bug! {}", err)
        }
    }
}

impl ParseErrorInternal {
    pub fn into_public(self) -> ParseError {
        match self {
            ParseErrorInternal::FailedToParse(err) => err,
            ParseErrorInternal::RegexError(err) => 
                panic!("A valid regex is expected in metadata; this indicates a library bug! {}", err)
        }
    }
}

/// Unwraps a result whose only possible error is a regex failure on metadata
/// patterns, which the registry rules out at construction time.
pub(crate) trait RegexResultExt<T> {
    fn into_public(self) -> T;
}

impl<T> RegexResultExt<T> for Result<T, InvalidRegexError> {
    fn into_public(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) =>
                panic!("A valid regex is expected in metadata; this indicates a library bug! {}", err)
        }
    }
}
