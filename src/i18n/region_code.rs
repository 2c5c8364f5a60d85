/// Region codes with a special meaning to the library.
pub struct RegionCode {
}

impl RegionCode {
    /// Returns a region code string representing the "unknown" region.
    pub fn get_unknown() -> &'static str {
        Self::zz()
    }

    pub fn zz() -> &'static str {
        "ZZ"
    }

    /// Region code of non-geographical entities such as +800 numbers.
    pub fn un001() -> &'static str {
        "001"
    }
}
