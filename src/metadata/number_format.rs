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

/// A single formatting rule.
///
/// `pattern` is matched against the whole national significant number and
/// `format` references its capture groups (`$1 $2`). The rule applies only
/// if the *last* entry of `leading_digits_pattern` matches the start of the
/// number, since later entries are more specific.
///
/// The national prefix formatting rule replaces the first group reference
/// of `format` when formatting in national style; inside it `$1` is that
/// group reference. Builders of [`super::PhoneMetadata`] accept the `$NP` and
/// `$FG` shorthands and expand them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub(crate) pattern: String,
    pub(crate) format: String,
    pub(crate) leading_digits_pattern: Vec<String>,
    pub(crate) national_prefix_formatting_rule: Option<String>,
    pub(crate) national_prefix_optional_when_formatting: bool,
    pub(crate) domestic_carrier_code_formatting_rule: Option<String>,
}

impl NumberFormat {
    pub fn builder(pattern: impl Into<String>, format: impl Into<String>) -> NumberFormatBuilder {
        NumberFormatBuilder {
            format: NumberFormat {
                pattern: pattern.into(),
                format: format.into(),
                leading_digits_pattern: Vec::new(),
                national_prefix_formatting_rule: None,
                national_prefix_optional_when_formatting: false,
                domestic_carrier_code_formatting_rule: None,
            },
        }
    }

    pub fn to_builder(&self) -> NumberFormatBuilder {
        NumberFormatBuilder { format: self.clone() }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn leading_digits_pattern(&self) -> &[String] {
        &self.leading_digits_pattern
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        self.national_prefix_formatting_rule.as_deref().unwrap_or("")
    }

    pub fn national_prefix_optional_when_formatting(&self) -> bool {
        self.national_prefix_optional_when_formatting
    }

    pub fn domestic_carrier_code_formatting_rule(&self) -> &str {
        self.domestic_carrier_code_formatting_rule.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct NumberFormatBuilder {
    format: NumberFormat,
}

impl NumberFormatBuilder {
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.format.pattern = pattern.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format.format = format.into();
        self
    }

    pub fn leading_digits_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.format.leading_digits_pattern.push(pattern.into());
        self
    }

    pub fn national_prefix_formatting_rule(mut self, rule: impl Into<String>) -> Self {
        self.format.national_prefix_formatting_rule = Some(rule.into());
        self
    }

    pub fn clear_national_prefix_formatting_rule(mut self) -> Self {
        self.format.national_prefix_formatting_rule = None;
        self
    }

    pub fn national_prefix_optional_when_formatting(mut self, optional: bool) -> Self {
        self.format.national_prefix_optional_when_formatting = optional;
        self
    }

    pub fn domestic_carrier_code_formatting_rule(mut self, rule: impl Into<String>) -> Self {
        self.format.domestic_carrier_code_formatting_rule = Some(rule.into());
        self
    }

    pub fn build(self) -> NumberFormat {
        self.format
    }
}
