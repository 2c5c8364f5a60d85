pub(crate) mod helper_constants;
pub(crate) mod helper_functions;
pub mod errors;
pub mod enums;
mod phonenumberutil;
mod phone_number_regexps_and_mappings;
mod helper_types;
mod normalization;
mod parsing;
mod formatting;
mod comparisons;

pub use enums::{MatchType, PhoneNumberFormat, PhoneNumberType};
pub use phonenumberutil::PhoneNumberUtil;
