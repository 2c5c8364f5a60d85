use std::sync::{Arc, LazyLock};

use crate::metadata::{MetadataRegistry, NumberFormat, NumberFormatBuilder, PhoneMetadata, PhoneNumberDesc};

/// Dialing rules shared by the tests. The data is a trimmed copy of the
/// well-known libphonenumber test territories, so formats and patterns are
/// not meant to be accurate for real numbers.
static TEST_REGISTRY: LazyLock<Arc<MetadataRegistry>> = LazyLock::new(|| {
    Arc::new(MetadataRegistry::from_metadata(test_metadata()).expect("test metadata should be valid"))
});

pub fn test_registry() -> Arc<MetadataRegistry> {
    TEST_REGISTRY.clone()
}

fn desc<const N: usize>(pattern: &str, lengths: [usize; N]) -> PhoneNumberDesc {
    PhoneNumberDesc::builder()
        .national_number_pattern(pattern)
        .possible_lengths(lengths)
        .build()
}

fn example<const N: usize>(pattern: &str, lengths: [usize; N], example_number: &str) -> PhoneNumberDesc {
    PhoneNumberDesc::builder()
        .national_number_pattern(pattern)
        .possible_lengths(lengths)
        .example_number(example_number)
        .build()
}

fn format(pattern: &str, format: &str, leading_digits: &str) -> NumberFormatBuilder {
    let builder = NumberFormat::builder(pattern, format);
    if leading_digits.is_empty() {
        builder
    } else {
        builder.leading_digits_pattern(leading_digits)
    }
}

pub fn test_metadata() -> Vec<PhoneMetadata> {
    vec![
        ar(),
        ao(),
        au(),
        br(),
        bs(),
        de(),
        gb(),
        it(),
        mx(),
        nz(),
        sg(),
        us(),
        international_toll_free(),
        universal_premium_rate(),
    ]
}

fn ao() -> PhoneMetadata {
    PhoneMetadata::builder("AO", 244)
        .international_prefix("00")
        .national_prefix("0~0")
        .general_desc(desc("[29]\\d{8}", [9]))
        .fixed_line(example("2\\d(?:[26-9]\\d|\\d[26-9])\\d{5}", [9], "222123456"))
        .mobile(example("9[1-3]\\d{7}", [9], "923123456"))
        .number_format(format("(\\d{3})(\\d{3})(\\d{3})", "$1 $2 $3", "").build())
        .build()
}

fn ar() -> PhoneMetadata {
    const AREA: &str = "1[02-9]|[23]";
    const MOBILE_AREA: &str = "9(?:1[02-9]|[23])";
    PhoneMetadata::builder("AR", 54)
        .international_prefix("00")
        .national_prefix("0")
        .national_prefix_for_parsing("0(?:(11|343|3715)15)?")
        .national_prefix_transform_rule("9$1")
        .general_desc(desc("[1-368]\\d{9}|9\\d{10}", [10, 11]))
        .fixed_line(example("[1-3]\\d{9}", [10], "1123456789"))
        .mobile(example("9\\d{10}|[1-3]\\d{9}", [10, 11], "91123456789"))
        .toll_free(example("80\\d{8}", [10], "8012345678"))
        .premium_rate(example("6(?:0\\d|10)\\d{7}", [10], "6101234567"))
        .number_format(
            format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2-$3", "11")
                .national_prefix_formatting_rule("$NP$FG")
                .domestic_carrier_code_formatting_rule("$NP$FG $CC")
                .build(),
        )
        .number_format(
            format("(\\d{4})(\\d{2})(\\d{4})", "$1 $2-$3", AREA)
                .national_prefix_formatting_rule("$NP$FG")
                .domestic_carrier_code_formatting_rule("$NP$FG $CC")
                .build(),
        )
        .number_format(
            format("(9)(11)(\\d{4})(\\d{4})", "$2 15 $3-$4", "911")
                .national_prefix_formatting_rule("$NP$FG")
                .domestic_carrier_code_formatting_rule("$NP$FG $CC")
                .build(),
        )
        .number_format(
            format("(9)(\\d{4})(\\d{2})(\\d{4})", "$2 $3-$4", MOBILE_AREA)
                .national_prefix_formatting_rule("$NP$FG")
                .domestic_carrier_code_formatting_rule("$NP$FG $CC")
                .build(),
        )
        .number_format(
            format("(\\d{3})(\\d{3})(\\d{4})", "$1-$2-$3", "[68]")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .intl_number_format(format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2-$3", "11").build())
        .intl_number_format(format("(\\d{4})(\\d{2})(\\d{4})", "$1 $2-$3", AREA).build())
        .intl_number_format(format("(9)(11)(\\d{4})(\\d{4})", "$1 $2 $3 $4", "911").build())
        .intl_number_format(format("(9)(\\d{4})(\\d{2})(\\d{4})", "$1 $2 $3 $4", MOBILE_AREA).build())
        .intl_number_format(format("(\\d{3})(\\d{3})(\\d{4})", "$1-$2-$3", "[68]").build())
        .build()
}

fn au() -> PhoneMetadata {
    PhoneMetadata::builder("AU", 61)
        .international_prefix("001[12]")
        .preferred_international_prefix("0011")
        .national_prefix("0")
        .general_desc(desc("[1-578]\\d{4,14}", [9, 10]))
        .fixed_line(example("[2378]\\d{8}", [9], "236618300"))
        .mobile(example("4\\d{8}", [9], "412345678"))
        .toll_free(example("1800\\d{6}", [10], "1800123456"))
        .premium_rate(example("190[0126]\\d{6}", [10], "1900123456"))
        .number_format(
            format("(\\d{4})(\\d{3})(\\d{3})", "$1 $2 $3", "1")
                .national_prefix_formatting_rule("$FG")
                .build(),
        )
        .number_format(
            format("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", "[2-478]")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .build()
}

fn br() -> PhoneMetadata {
    const AREA: &str = "(?:[14689][1-9]|2[12478]|3[1-578]|5[13-5]|7[13-579])";
    PhoneMetadata::builder("BR", 55)
        .international_prefix("00(?:1[45]|2[135]|[34]1|43)")
        .national_prefix("0")
        .national_prefix_for_parsing("0(?:(1[245]|2[135]|[34]1)(\\d{10}))?")
        .national_prefix_transform_rule("$2")
        .general_desc(desc("[1-9]\\d{7,9}", [8, 9, 10]))
        .fixed_line(example(&format!("{AREA}[2-5]\\d{{7}}"), [10], "1123456789"))
        .mobile(example(&format!("{AREA}[6-9]\\d{{7}}"), [10], "1161234567"))
        .number_format(
            format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2-$3", "[1-9][1-9]")
                .national_prefix_formatting_rule("($FG)")
                .domestic_carrier_code_formatting_rule("$NP $CC ($FG)")
                .build(),
        )
        .build()
}

fn bs() -> PhoneMetadata {
    PhoneMetadata::builder("BS", 1)
        .international_prefix("011")
        .national_prefix("1")
        .general_desc(desc("(?:242|8(?:00|66|77|88)|900)\\d{7}", [10]))
        .fixed_line(example(
            "242(?:3(?:02|[236][1-9]|4[0-24-9]|5[0-68]|7[3-57]|9[2-5])|4(?:2[237]|51|64|77)|502|636|702)\\d{4}",
            [10],
            "2423651234",
        ))
        .mobile(example("242(?:357|359|457|557)\\d{4}", [10], "2423570000"))
        .toll_free(desc("8(?:00|66|77|88)\\d{7}", [10]))
        .premium_rate(desc("900\\d{7}", [10]))
        .number_format(format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", "").build())
        .build()
}

fn de() -> PhoneMetadata {
    PhoneMetadata::builder("DE", 49)
        .international_prefix("00")
        .national_prefix("0")
        .general_desc(desc("\\d{4,14}", [4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]))
        .fixed_line(example(
            "(?:[24-6]\\d{2}|3[03-9]\\d|[789](?:0[2-9]|[1-9]\\d))\\d{1,8}",
            [],
            "30123456",
        ))
        .mobile(example("1(?:5\\d{9}|7\\d{8}|6[02]\\d{8}|63\\d{7})", [10, 11], "15123456789"))
        .toll_free(example("800\\d{7,10}", [], "8001234567890"))
        .premium_rate(example("900(?:[135]\\d{6}|9\\d{7})", [10, 11], "9001234567"))
        .number_format(
            format("(\\d{3})(\\d{3,11})", "$1 $2", "2|3[3-9]|906|[4-9][1-9]1")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .number_format(
            format("(\\d{2})(\\d{3,11})", "$1/$2", "3[02]|40|[68]9")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .number_format(
            format(
                "(\\d{4})(\\d{2,11})",
                "$1 $2",
                "[24-6]|[7-9](?:\\d[1-9]|[1-9]\\d)|3(?:[3569][02-46-9]|4[2-4679]|7[2-467]|8[2-46-8])",
            )
            .national_prefix_formatting_rule("$NP$FG")
            .build(),
        )
        .number_format(
            format("(\\d{3})(\\d{3,4})(\\d{4})", "$1 $2 $3", "900")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .build()
}

fn gb() -> PhoneMetadata {
    PhoneMetadata::builder("GB", 44)
        .international_prefix("00")
        .national_prefix("0")
        .general_desc(desc("\\d{10}", [10]))
        .fixed_line(example("[1-6]\\d{9}", [], "1212345678"))
        .mobile(example("7[1-57-9]\\d{8}", [], "7912345678"))
        .pager(example("76\\d{8}", [], "7612345678"))
        .toll_free(example("80\\d{8}", [], "8012345678"))
        .premium_rate(example("9[018]\\d{8}", [], "9187654321"))
        .shared_cost(example("8(?:4[3-5]|7[0-2])\\d{7}", [], "8431234567"))
        .personal_number(example("70\\d{8}", [], "7031234567"))
        .voip(example("56\\d{8}", [], "5612345678"))
        .number_format(
            format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", "[1-59]|[78]0")
                .national_prefix_formatting_rule("($NP$FG)")
                .build(),
        )
        .number_format(
            format("(\\d)(\\d{3})(\\d{3})(\\d{3})", "$1 $2 $3 $4", "6")
                .national_prefix_formatting_rule("($NP$FG)")
                .build(),
        )
        .number_format(
            format("(\\d{4})(\\d{3})(\\d{3})", "$1 $2 $3", "7[1-57-9]")
                .national_prefix_formatting_rule("($NP$FG)")
                .build(),
        )
        .number_format(
            format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", "8[47]")
                .national_prefix_formatting_rule("($NP$FG)")
                .build(),
        )
        .build()
}

fn it() -> PhoneMetadata {
    PhoneMetadata::builder("IT", 39)
        .international_prefix("00")
        .leading_zero_possible(true)
        .general_desc(desc("[0389]\\d{5,10}", [6, 7, 8, 9, 10, 11]))
        .fixed_line(example("0\\d{9,10}", [10, 11], "0236618300"))
        .mobile(example("3\\d{8,9}", [9, 10], "345678901"))
        .toll_free(example("80(?:0\\d{6}|3\\d{3})", [6, 9], "803123"))
        .premium_rate(example("89(?:2\\d{3}|9\\d{6})", [6, 9], "892123"))
        .number_format(format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", "0[26]").build())
        .number_format(format("(\\d{3})(\\d{4})(\\d{3,4})", "$1 $2 $3", "0[13-57-9]").build())
        .number_format(format("(\\d{3})(\\d{3})(\\d{3,4})", "$1 $2 $3", "3").build())
        .number_format(format("(\\d{3})(\\d{3,6})", "$1 $2", "8").build())
        .build()
}

fn mx() -> PhoneMetadata {
    const BIG_CITIES: &str = "33|55|81";
    const OTHER_AREAS: &str = "[2467]|3[0-24-9]|5[0-46-9]|8[2-9]|9";
    const MOBILE_BIG_CITIES: &str = "1(?:33|55|81)";
    const MOBILE_OTHER_AREAS: &str = "1(?:[124579]|3[0-24-9]|5[0-46-9]|8[02-9])";
    PhoneMetadata::builder("MX", 52)
        .international_prefix("0[09]")
        .national_prefix("01")
        .national_prefix_for_parsing("0[12]|04[45](\\d{10})")
        .national_prefix_transform_rule("1$1")
        .general_desc(desc("[1-9]\\d{9,10}", [10, 11]))
        .fixed_line(example("[2-9]\\d{9}", [10], "2123456789"))
        .mobile(example("1\\d{10}", [11], "12345678900"))
        .number_format(
            format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", BIG_CITIES)
                .national_prefix_formatting_rule("$NP $FG")
                .build(),
        )
        .number_format(
            format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", OTHER_AREAS)
                .national_prefix_formatting_rule("$NP $FG")
                .build(),
        )
        .number_format(
            format("(1)(\\d{2})(\\d{4})(\\d{4})", "045 $2 $3 $4", MOBILE_BIG_CITIES)
                .national_prefix_formatting_rule("$FG")
                .build(),
        )
        .number_format(
            format("(1)(\\d{3})(\\d{3})(\\d{4})", "045 $2 $3 $4", MOBILE_OTHER_AREAS)
                .national_prefix_formatting_rule("$FG")
                .build(),
        )
        .intl_number_format(format("(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3", BIG_CITIES).build())
        .intl_number_format(format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", OTHER_AREAS).build())
        .intl_number_format(format("(1)(\\d{2})(\\d{4})(\\d{4})", "$1 $2 $3 $4", MOBILE_BIG_CITIES).build())
        .intl_number_format(format("(1)(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3 $4", MOBILE_OTHER_AREAS).build())
        .build()
}

fn nz() -> PhoneMetadata {
    PhoneMetadata::builder("NZ", 64)
        .international_prefix("00")
        .national_prefix("0")
        .general_desc(desc("[289]\\d{7,9}|[3-7]\\d{7}", [8, 9, 10]))
        .fixed_line(example(
            "24099\\d{3}|(?:3[2-79]|[479][2-689]|6[235-9])\\d{6}",
            [8],
            "33316005",
        ))
        .mobile(example(
            "2(?:[027]\\d{7}|9\\d{6,7}|1(?:0\\d{5,7}|[12]\\d{5,6}|[3-9]\\d{5})|4[1-9]\\d{6}|8\\d{7,8})",
            [8, 9, 10],
            "201234567",
        ))
        .toll_free(example("800\\d{6,7}", [9, 10], "800123456"))
        .premium_rate(example("900\\d{6,7}", [9, 10], "900123456"))
        .number_format(
            format("(\\d)(\\d{3})(\\d{4})", "$1-$2 $3", "24|[34679]")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .number_format(
            format("(\\d)(\\d{3})(\\d{3,5})", "$1-$2 $3", "2[179]")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .number_format(
            format("(\\d{3})(\\d{3})(\\d{3,4})", "$1 $2 $3", "[89]0")
                .national_prefix_formatting_rule("$NP$FG")
                .build(),
        )
        .build()
}

fn sg() -> PhoneMetadata {
    PhoneMetadata::builder("SG", 65)
        .international_prefix("0[0-3]\\d")
        .general_desc(desc("[13689]\\d{7,10}", [8, 10, 11]))
        .fixed_line(example("[36]\\d{7}", [8], "61234567"))
        .mobile(example("[89]\\d{7}", [8], "81234567"))
        .toll_free(example("1?800\\d{7}", [10, 11], "18001234567"))
        .premium_rate(example("1900\\d{7}", [11], "19001234567"))
        .number_format(format("(\\d{4})(\\d{4})", "$1 $2", "[369]|8[1-9]").build())
        .number_format(format("(\\d{4})(\\d{3})(\\d{4})", "$1 $2 $3", "1[89]").build())
        .number_format(format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", "800").build())
        .build()
}

fn us() -> PhoneMetadata {
    const GEOGRAPHIC: &str = "[13-689]\\d{9}|2[0-35-9]\\d{8}";
    PhoneMetadata::builder("US", 1)
        .international_prefix("011")
        .national_prefix("1")
        .preferred_extn_prefix(" extn. ")
        .main_country_for_code(true)
        .general_desc(desc(GEOGRAPHIC, [7, 10]))
        .fixed_line(example(GEOGRAPHIC, [10], "6502530000"))
        .mobile(example(GEOGRAPHIC, [10], "6502530000"))
        .toll_free(example("8(?:00|66|77|88)\\d{7}", [10], "8002530000"))
        .premium_rate(example("900\\d{7}", [10], "9002530000"))
        .no_international_dialling(example("800\\d{7}", [10], "8002530000"))
        .number_format(format("(\\d{3})(\\d{4})", "$1 $2", "").build())
        .number_format(format("(\\d{3})(\\d{3})(\\d{4})", "$1 $2 $3", "").build())
        .build()
}

fn international_toll_free() -> PhoneMetadata {
    PhoneMetadata::builder("001", 800)
        .general_desc(desc("\\d{8}", [8]))
        .toll_free(example("\\d{8}", [8], "12345678"))
        .number_format(format("(\\d{4})(\\d{4})", "$1 $2", "").build())
        .build()
}

fn universal_premium_rate() -> PhoneMetadata {
    PhoneMetadata::builder("001", 979)
        .general_desc(desc("\\d{9}", [9]))
        .premium_rate(example("\\d{9}", [9], "123456789"))
        .number_format(format("(\\d)(\\d{4})(\\d{4})", "$1 $2 $3", "").build())
        .build()
}
