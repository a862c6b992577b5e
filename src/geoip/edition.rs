//! Database edition tags.
//!
//! The edition byte stored after the structure marker decides how the trie
//! leaves are offset (the "segments" value) and how wide each record is.

use std::fmt;

use strum_macros::EnumIter;

use crate::config::{
    COUNTRY_BEGIN, EDITION_BIAS, EDITION_BIAS_THRESHOLD, LARGE_COUNTRY_BEGIN,
    ORG_RECORD_LENGTH, STANDARD_RECORD_LENGTH, STATE_BEGIN_REV0, STATE_BEGIN_REV1,
};

/// Edition tag read from an opened database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Edition {
    Country,
    CityRev1,
    RegionRev1,
    Isp,
    Org,
    CityRev0,
    RegionRev0,
    Proxy,
    Asnum,
    Netspeed,
    Domain,
    CountryV6,
    LocationA,
    AccuracyRadius,
    LargeCountry,
    LargeCountryV6,
    AsnumV6,
    IspV6,
    OrgV6,
    DomainV6,
    CityRev1V6,
    CityRev0V6,
    NetspeedRev1,
    NetspeedRev1V6,
    /// Any tag this crate has no name for.
    Unknown(u8),
}

/// Where trie leaves start for a given edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segments {
    /// Leaf offset is a constant of the edition.
    Fixed(u32),
    /// Leaf offset is stored in the file right after the edition byte.
    Stored,
}

impl Edition {
    /// The only edition accepted by the lookup engine.
    pub const REQUIRED: Edition = Edition::CountryV6;

    /// Decodes a raw edition byte, removing the legacy +105 bias.
    pub fn from_byte(raw: u8) -> Self {
        let tag = if raw >= EDITION_BIAS_THRESHOLD {
            raw - EDITION_BIAS
        } else {
            raw
        };
        match tag {
            1 => Edition::Country,
            2 => Edition::CityRev1,
            3 => Edition::RegionRev1,
            4 => Edition::Isp,
            5 => Edition::Org,
            6 => Edition::CityRev0,
            7 => Edition::RegionRev0,
            8 => Edition::Proxy,
            9 => Edition::Asnum,
            10 => Edition::Netspeed,
            11 => Edition::Domain,
            12 => Edition::CountryV6,
            13 => Edition::LocationA,
            14 => Edition::AccuracyRadius,
            17 => Edition::LargeCountry,
            18 => Edition::LargeCountryV6,
            21 => Edition::AsnumV6,
            22 => Edition::IspV6,
            23 => Edition::OrgV6,
            24 => Edition::DomainV6,
            30 => Edition::CityRev1V6,
            31 => Edition::CityRev0V6,
            32 => Edition::NetspeedRev1,
            33 => Edition::NetspeedRev1V6,
            other => Edition::Unknown(other),
        }
    }

    /// The unbiased tag value written to disk.
    pub fn as_byte(self) -> u8 {
        match self {
            Edition::Country => 1,
            Edition::CityRev1 => 2,
            Edition::RegionRev1 => 3,
            Edition::Isp => 4,
            Edition::Org => 5,
            Edition::CityRev0 => 6,
            Edition::RegionRev0 => 7,
            Edition::Proxy => 8,
            Edition::Asnum => 9,
            Edition::Netspeed => 10,
            Edition::Domain => 11,
            Edition::CountryV6 => 12,
            Edition::LocationA => 13,
            Edition::AccuracyRadius => 14,
            Edition::LargeCountry => 17,
            Edition::LargeCountryV6 => 18,
            Edition::AsnumV6 => 21,
            Edition::IspV6 => 22,
            Edition::OrgV6 => 23,
            Edition::DomainV6 => 24,
            Edition::CityRev1V6 => 30,
            Edition::CityRev0V6 => 31,
            Edition::NetspeedRev1 => 32,
            Edition::NetspeedRev1V6 => 33,
            Edition::Unknown(raw) => raw,
        }
    }

    pub fn is_country_v6(self) -> bool {
        self == Self::REQUIRED
    }

    pub fn description(self) -> &'static str {
        match self {
            Edition::Country => "GeoIP Country Edition",
            Edition::CityRev1 => "GeoIP City Edition, Rev 1",
            Edition::RegionRev1 => "GeoIP Region Edition, Rev 1",
            Edition::Isp => "GeoIP ISP Edition",
            Edition::Org => "GeoIP Organization Edition",
            Edition::CityRev0 => "GeoIP City Edition, Rev 0",
            Edition::RegionRev0 => "GeoIP Region Edition, Rev 0",
            Edition::Proxy => "GeoIP Proxy Edition",
            Edition::Asnum => "GeoIP ASNum Edition",
            Edition::Netspeed => "GeoIP Netspeed Edition",
            Edition::Domain => "GeoIP Domain Name Edition",
            Edition::CountryV6 => "GeoIP Country V6 Edition",
            Edition::LocationA => "GeoIP LocationID ASCII Edition",
            Edition::AccuracyRadius => "GeoIP Accuracy Radius Edition",
            Edition::LargeCountry => "GeoIP Large Country Edition",
            Edition::LargeCountryV6 => "GeoIP Large Country V6 Edition",
            Edition::AsnumV6 => "GeoIP ASNum V6 Edition",
            Edition::IspV6 => "GeoIP ISP V6 Edition",
            Edition::OrgV6 => "GeoIP Organization V6 Edition",
            Edition::DomainV6 => "GeoIP Domain Name V6 Edition",
            Edition::CityRev1V6 => "GeoIP City Edition V6, Rev 1",
            Edition::CityRev0V6 => "GeoIP City Edition V6, Rev 0",
            Edition::NetspeedRev1 => "GeoIP Netspeed Edition, Rev 1",
            Edition::NetspeedRev1V6 => "GeoIP Netspeed Edition V6, Rev 1",
            Edition::Unknown(_) => "Unknown GeoIP Edition",
        }
    }

    pub(crate) fn segments(self) -> Segments {
        match self {
            Edition::Country | Edition::CountryV6 | Edition::Proxy | Edition::Netspeed => {
                Segments::Fixed(COUNTRY_BEGIN)
            }
            Edition::LargeCountry | Edition::LargeCountryV6 => Segments::Fixed(LARGE_COUNTRY_BEGIN),
            Edition::RegionRev0 => Segments::Fixed(STATE_BEGIN_REV0),
            Edition::RegionRev1 => Segments::Fixed(STATE_BEGIN_REV1),
            Edition::Unknown(_) => Segments::Fixed(COUNTRY_BEGIN),
            _ => Segments::Stored,
        }
    }

    pub(crate) fn record_length(self) -> usize {
        match self {
            Edition::Org
            | Edition::OrgV6
            | Edition::Isp
            | Edition::IspV6
            | Edition::Domain
            | Edition::DomainV6
            | Edition::LocationA => ORG_RECORD_LENGTH,
            _ => STANDARD_RECORD_LENGTH,
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Unknown(raw) => write!(f, "{} ({})", self.description(), raw),
            _ => f.write_str(self.description()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_known_editions_round_trip_through_byte() {
        for edition in Edition::iter().filter(|e| !matches!(e, Edition::Unknown(_))) {
            assert_eq!(Edition::from_byte(edition.as_byte()), edition);
        }
    }

    #[test]
    fn test_biased_byte_is_reduced() {
        assert_eq!(Edition::from_byte(12 + 105), Edition::CountryV6);
        assert_eq!(Edition::from_byte(106), Edition::Country);
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        assert_eq!(Edition::from_byte(99), Edition::Unknown(99));
        assert_eq!(Edition::Unknown(99).as_byte(), 99);
        assert!(Edition::Unknown(99).to_string().contains("99"));
    }

    #[test]
    fn test_only_country_v6_is_required() {
        assert!(Edition::CountryV6.is_country_v6());
        assert!(!Edition::Country.is_country_v6());
        assert!(!Edition::LargeCountryV6.is_country_v6());
    }

    #[test]
    fn test_country_editions_use_fixed_segments() {
        assert_eq!(Edition::CountryV6.segments(), Segments::Fixed(COUNTRY_BEGIN));
        assert_eq!(
            Edition::LargeCountryV6.segments(),
            Segments::Fixed(LARGE_COUNTRY_BEGIN)
        );
        assert_eq!(Edition::CityRev1.segments(), Segments::Stored);
        assert_eq!(Edition::CountryV6.record_length(), STANDARD_RECORD_LENGTH);
        assert_eq!(Edition::Org.record_length(), ORG_RECORD_LENGTH);
    }
}
