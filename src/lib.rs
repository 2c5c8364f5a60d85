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

//! Parsing, formatting, validation and geocoding of international phone
//! numbers, driven by per-region metadata supplied by the caller.
//!
//! ```ignore
//! use std::sync::Arc;
//! use phonenumber_engine::{MetadataRegistry, PhoneNumberFormat, PhoneNumberUtil};
//!
//! let registry = Arc::new(MetadataRegistry::from_metadata(my_metadata)?);
//! let util = PhoneNumberUtil::new(registry);
//! let number = util.parse("033316005", "NZ")?;
//! assert_eq!(util.format(&number, PhoneNumberFormat::E164), "+6433316005");
//! ```

mod interfaces;
mod phonenumber;
mod regex_based_matcher;
mod regexp_cache;
pub(crate) mod regex_util;

pub mod geocoding;
pub mod i18n;
pub mod metadata;
pub mod phonenumberutil;

pub use geocoding::{AreaCodeMap, PrefixFileError, StorageKind};
pub use metadata::{
    MetadataError, MetadataRegistry, NumberFormat, NumberFormatBuilder, PhoneMetadata,
    PhoneMetadataBuilder, PhoneNumberDesc, PhoneNumberDescBuilder,
};
pub use phonenumber::{CountryCodeSource, PhoneNumber, PhoneNumberBuilder};
pub use phonenumberutil::{
    MatchType, PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil,
    errors::{GetExampleNumberError, NotANumberError, ParseError, ValidationError},
};
pub use regexp_cache::InvalidRegexError;

#[cfg(test)]
mod tests;
