use std::sync::Arc;

use phonenumber_engine::{MetadataRegistry, NumberFormat, PhoneMetadata, PhoneNumberDesc, PhoneNumberUtil};

fn desc<const N: usize>(pattern: &str, lengths: [usize; N]) -> PhoneNumberDesc {
    PhoneNumberDesc::builder()
        .national_number_pattern(pattern)
        .possible_lengths(lengths)
        .build()
}

fn format(pattern: &str, format: &str, leading_digits: &str, national_prefix_rule: &str) -> NumberFormat {
    NumberFormat::builder(pattern, format)
        .leading_digits_pattern(leading_digits)
        .national_prefix_formatting_rule(national_prefix_rule)
        .build()
}

/// A handful of regions, enough to exercise national prefixes, IDDs,
/// extensions and italian leading zeros.
pub fn bench_util() -> PhoneNumberUtil {
    let us = PhoneMetadata::builder("US", 1)
        .international_prefix("011")
        .national_prefix("1")
        .main_country_for_code(true)
        .general_desc(desc("[2-9]\\d{9}", [7, 10]))
        .fixed_line(desc("[2-9]\\d{9}", [10]))
        .mobile(desc("[2-9]\\d{9}", [10]))
        .toll_free(desc("8(?:00|66|77|88)\\d{7}", [10]))
        .number_format(format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", "[2-9]", ""))
        .build();
    let gb = PhoneMetadata::builder("GB", 44)
        .international_prefix("00")
        .national_prefix("0")
        .general_desc(desc("\\d{10}", [10]))
        .fixed_line(desc("[1-6]\\d{9}", []))
        .mobile(desc("7[1-57-9]\\d{8}", []))
        .number_format(format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", "[1-59]|[78]0", "($NP$FG)"))
        .number_format(format("(\\d{4})(\\d{3})(\\d{3})", "$1 $2 $3", "7[1-57-9]", "($NP$FG)"))
        .build();
    let au = PhoneMetadata::builder("AU", 61)
        .international_prefix("001[12]")
        .preferred_international_prefix("0011")
        .national_prefix("0")
        .general_desc(desc("[1-578]\\d{4,14}", [9, 10]))
        .fixed_line(desc("[2378]\\d{8}", [9]))
        .mobile(desc("4\\d{8}", [9]))
        .number_format(format("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", "[2-478]", "$NP$FG"))
        .build();
    let it = PhoneMetadata::builder("IT", 39)
        .international_prefix("00")
        .leading_zero_possible(true)
        .general_desc(desc("[0389]\\d{5,10}", [6, 7, 8, 9, 10, 11]))
        .fixed_line(desc("0\\d{9,10}", [10, 11]))
        .mobile(desc("3\\d{8,9}", [9, 10]))
        .number_format(format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", "0[26]", ""))
        .number_format(format("(\\d{3})(\\d{3})(\\d{3,4})", "$1 $2 $3", "3", ""))
        .build();

    let registry = MetadataRegistry::from_metadata([us, gb, au, it]).expect("bench metadata should be valid");
    PhoneNumberUtil::new(Arc::new(registry))
}

/// Inputs paired with the region they are dialed from.
pub fn bench_numbers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("0011 44 20 8765 4321 ext. 1234", "AU"),
        ("(650) 253-0000", "US"),
        ("+44 20 8765 4321", "GB"),
        ("020 8765 4321", "GB"),
        ("02 3661 8300", "IT"),
        ("345 678 901", "IT"),
        ("1-800-FLOWERS", "US"),
        ("02 3661 8300", "AU"),
    ]
}
