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

use super::{NumberFormat, PhoneNumberDesc};

const NATIONAL_PREFIX_PLACEHOLDER: &str = "$NP";
const FIRST_GROUP_PLACEHOLDER: &str = "$FG";

/// Dialing rules of one region, or of one non-geographical calling code
/// (region id `001`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMetadata {
    pub(crate) id: String,
    pub(crate) country_code: i32,
    pub(crate) international_prefix: String,
    pub(crate) preferred_international_prefix: Option<String>,
    pub(crate) national_prefix: Option<String>,
    pub(crate) preferred_extn_prefix: Option<String>,
    pub(crate) national_prefix_for_parsing: Option<String>,
    pub(crate) national_prefix_transform_rule: Option<String>,
    pub(crate) leading_digits: Option<String>,
    pub(crate) leading_zero_possible: bool,
    pub(crate) main_country_for_code: bool,
    pub(crate) same_mobile_and_fixed_line_pattern: bool,

    pub(crate) general_desc: PhoneNumberDesc,
    pub(crate) fixed_line: PhoneNumberDesc,
    pub(crate) mobile: PhoneNumberDesc,
    pub(crate) toll_free: PhoneNumberDesc,
    pub(crate) premium_rate: PhoneNumberDesc,
    pub(crate) shared_cost: PhoneNumberDesc,
    pub(crate) personal_number: PhoneNumberDesc,
    pub(crate) voip: PhoneNumberDesc,
    pub(crate) pager: PhoneNumberDesc,
    pub(crate) uan: PhoneNumberDesc,
    pub(crate) voicemail: PhoneNumberDesc,
    pub(crate) no_international_dialling: PhoneNumberDesc,

    pub(crate) number_format: Vec<NumberFormat>,
    pub(crate) intl_number_format: Vec<NumberFormat>,
}

impl PhoneMetadata {
    pub fn builder(id: impl Into<String>, country_code: i32) -> PhoneMetadataBuilder {
        PhoneMetadataBuilder::new(id, country_code)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn international_prefix(&self) -> &str {
        &self.international_prefix
    }

    pub fn preferred_international_prefix(&self) -> Option<&str> {
        self.preferred_international_prefix.as_deref()
    }

    pub fn national_prefix(&self) -> &str {
        self.national_prefix.as_deref().unwrap_or("")
    }

    pub fn preferred_extn_prefix(&self) -> Option<&str> {
        self.preferred_extn_prefix.as_deref()
    }

    pub fn national_prefix_for_parsing(&self) -> &str {
        self.national_prefix_for_parsing.as_deref().unwrap_or("")
    }

    pub fn national_prefix_transform_rule(&self) -> &str {
        self.national_prefix_transform_rule.as_deref().unwrap_or("")
    }

    pub fn leading_digits(&self) -> Option<&str> {
        self.leading_digits.as_deref()
    }

    pub fn leading_zero_possible(&self) -> bool {
        self.leading_zero_possible
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn general_desc(&self) -> &PhoneNumberDesc {
        &self.general_desc
    }

    pub fn fixed_line(&self) -> &PhoneNumberDesc {
        &self.fixed_line
    }

    pub fn mobile(&self) -> &PhoneNumberDesc {
        &self.mobile
    }

    pub fn toll_free(&self) -> &PhoneNumberDesc {
        &self.toll_free
    }

    pub fn premium_rate(&self) -> &PhoneNumberDesc {
        &self.premium_rate
    }

    pub fn no_international_dialling(&self) -> &PhoneNumberDesc {
        &self.no_international_dialling
    }

    pub fn number_format(&self) -> &[NumberFormat] {
        &self.number_format
    }

    pub fn intl_number_format(&self) -> &[NumberFormat] {
        &self.intl_number_format
    }

    /// Every regular expression this record carries, for eager validation.
    pub(crate) fn patterns(&self) -> impl Iterator<Item = &str> {
        let descs = [
            &self.general_desc,
            &self.fixed_line,
            &self.mobile,
            &self.toll_free,
            &self.premium_rate,
            &self.shared_cost,
            &self.personal_number,
            &self.voip,
            &self.pager,
            &self.uan,
            &self.voicemail,
            &self.no_international_dialling,
        ];
        let formats = self.number_format.iter().chain(self.intl_number_format.iter());

        std::iter::once(self.international_prefix.as_str())
            .chain(self.national_prefix_for_parsing.as_deref())
            .chain(self.leading_digits.as_deref())
            .chain(descs.into_iter().filter_map(|desc| desc.national_number_pattern.as_deref()))
            .chain(formats.flat_map(|format| {
                std::iter::once(format.pattern.as_str())
                    .chain(format.leading_digits_pattern.iter().map(String::as_str))
            }))
            .filter(|pattern| !pattern.is_empty())
    }
}

/// Accumulates a region's rules; [`PhoneMetadataBuilder::build`] freezes them.
#[derive(Debug)]
pub struct PhoneMetadataBuilder {
    metadata: PhoneMetadata,
}

macro_rules! desc_setters {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(mut self, desc: PhoneNumberDesc) -> Self {
                self.metadata.$name = desc;
                self
            }
        )*
    };
}

impl PhoneMetadataBuilder {
    pub fn new(id: impl Into<String>, country_code: i32) -> Self {
        Self {
            metadata: PhoneMetadata {
                id: id.into(),
                country_code,
                international_prefix: String::new(),
                preferred_international_prefix: None,
                national_prefix: None,
                preferred_extn_prefix: None,
                national_prefix_for_parsing: None,
                national_prefix_transform_rule: None,
                leading_digits: None,
                leading_zero_possible: false,
                main_country_for_code: false,
                same_mobile_and_fixed_line_pattern: false,
                general_desc: PhoneNumberDesc::default(),
                fixed_line: PhoneNumberDesc::default(),
                mobile: PhoneNumberDesc::default(),
                toll_free: PhoneNumberDesc::default(),
                premium_rate: PhoneNumberDesc::default(),
                shared_cost: PhoneNumberDesc::default(),
                personal_number: PhoneNumberDesc::default(),
                voip: PhoneNumberDesc::default(),
                pager: PhoneNumberDesc::default(),
                uan: PhoneNumberDesc::default(),
                voicemail: PhoneNumberDesc::default(),
                no_international_dialling: PhoneNumberDesc::default(),
                number_format: Vec::new(),
                intl_number_format: Vec::new(),
            },
        }
    }

    pub fn international_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metadata.international_prefix = prefix.into();
        self
    }

    pub fn preferred_international_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metadata.preferred_international_prefix = Some(prefix.into());
        self
    }

    pub fn national_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metadata.national_prefix = Some(prefix.into());
        self
    }

    pub fn preferred_extn_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metadata.preferred_extn_prefix = Some(prefix.into());
        self
    }

    pub fn national_prefix_for_parsing(mut self, pattern: impl Into<String>) -> Self {
        self.metadata.national_prefix_for_parsing = Some(pattern.into());
        self
    }

    pub fn national_prefix_transform_rule(mut self, rule: impl Into<String>) -> Self {
        self.metadata.national_prefix_transform_rule = Some(rule.into());
        self
    }

    pub fn leading_digits(mut self, pattern: impl Into<String>) -> Self {
        self.metadata.leading_digits = Some(pattern.into());
        self
    }

    pub fn leading_zero_possible(mut self, possible: bool) -> Self {
        self.metadata.leading_zero_possible = possible;
        self
    }

    pub fn main_country_for_code(mut self, main: bool) -> Self {
        self.metadata.main_country_for_code = main;
        self
    }

    desc_setters!(
        general_desc,
        fixed_line,
        mobile,
        toll_free,
        premium_rate,
        shared_cost,
        personal_number,
        voip,
        pager,
        uan,
        voicemail,
        no_international_dialling,
    );

    pub fn number_format(mut self, format: NumberFormat) -> Self {
        self.metadata.number_format.push(format);
        self
    }

    pub fn intl_number_format(mut self, format: NumberFormat) -> Self {
        self.metadata.intl_number_format.push(format);
        self
    }

    pub fn build(self) -> PhoneMetadata {
        let mut metadata = self.metadata;
        if metadata.national_prefix_for_parsing.is_none() {
            metadata.national_prefix_for_parsing = metadata.national_prefix.clone();
        }
        let national_prefix = metadata.national_prefix.clone().unwrap_or_default();
        for format in metadata
            .number_format
            .iter_mut()
            .chain(metadata.intl_number_format.iter_mut())
        {
            expand_placeholders(&mut format.national_prefix_formatting_rule, &national_prefix);
            expand_placeholders(&mut format.domestic_carrier_code_formatting_rule, &national_prefix);
        }
        metadata.same_mobile_and_fixed_line_pattern = metadata.fixed_line.national_number_pattern.is_some()
            && metadata.fixed_line.national_number_pattern == metadata.mobile.national_number_pattern;
        metadata
    }
}

fn expand_placeholders(rule: &mut Option<String>, national_prefix: &str) {
    if let Some(text) = rule {
        if text.contains(NATIONAL_PREFIX_PLACEHOLDER) || text.contains(FIRST_GROUP_PLACEHOLDER) {
            *text = text
                .replacen(NATIONAL_PREFIX_PLACEHOLDER, national_prefix, 1)
                .replacen(FIRST_GROUP_PLACEHOLDER, "$1", 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc};

    #[test]
    fn build_expands_rules_and_defaults() {
        let shared = PhoneNumberDesc::builder()
            .national_number_pattern("[2-9]\\d{9}")
            .build();
        let metadata = PhoneMetadata::builder("GB", 44)
            .national_prefix("0")
            .fixed_line(shared.clone())
            .mobile(shared)
            .number_format(
                NumberFormat::builder("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3")
                    .national_prefix_formatting_rule("($NP$FG)")
                    .domestic_carrier_code_formatting_rule("$NP$CC $FG")
                    .build(),
            )
            .build();

        assert_eq!(metadata.national_prefix_for_parsing(), "0");
        assert!(metadata.same_mobile_and_fixed_line_pattern());
        let format = &metadata.number_format()[0];
        assert_eq!(format.national_prefix_formatting_rule(), "(0$1)");
        assert_eq!(format.domestic_carrier_code_formatting_rule(), "0$CC $1");
        assert_eq!(metadata.patterns().count(), 4);
    }
}
