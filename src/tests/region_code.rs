pub struct RegionCode {}

#[allow(unused)]
impl RegionCode {
    pub fn ao() -> &'static str {
        "AO"
    }

    pub fn ar() -> &'static str {
        "AR"
    }

    pub fn au() -> &'static str {
        "AU"
    }

    pub fn br() -> &'static str {
        "BR"
    }

    pub fn bs() -> &'static str {
        "BS"
    }

    pub fn ch() -> &'static str {
        "CH"
    }

    pub fn cs() -> &'static str {
        "CS"
    }

    pub fn de() -> &'static str {
        "DE"
    }

    pub fn gb() -> &'static str {
        "GB"
    }

    pub fn it() -> &'static str {
        "IT"
    }

    pub fn mx() -> &'static str {
        "MX"
    }

    pub fn nz() -> &'static str {
        "NZ"
    }

    pub fn sg() -> &'static str {
        "SG"
    }

    pub fn un001() -> &'static str {
        "001"
    }

    pub fn us() -> &'static str {
        "US"
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }
}
