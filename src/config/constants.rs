//! Configuration constants.
//!
//! Binary format constants for the legacy GeoIP database layout, plus defaults
//! used by the CLI.

/// First record value that denotes a country leaf in country editions.
pub const COUNTRY_BEGIN: u32 = 16_776_960;
/// First record value that denotes a country leaf in large-country editions.
pub const LARGE_COUNTRY_BEGIN: u32 = 16_515_072;
/// Region edition (revision 0) leaf offset.
pub const STATE_BEGIN_REV0: u32 = 16_700_000;
/// Region edition (revision 1) leaf offset.
pub const STATE_BEGIN_REV1: u32 = 16_000_000;

/// Record width in bytes for country, region, city and ASN editions.
pub const STANDARD_RECORD_LENGTH: usize = 3;
/// Record width in bytes for organisation-style editions.
pub const ORG_RECORD_LENGTH: usize = 4;
/// Width of the segment value stored after the edition byte.
pub const SEGMENT_RECORD_LENGTH: usize = 3;

/// How far back from the end of the file to search for the structure marker.
pub const STRUCTURE_INFO_MAX_SIZE: usize = 20;
/// How far back from the end of the file to search for the database info marker.
pub const DATABASE_INFO_MAX_SIZE: usize = 100;
/// Edition bytes at or above this value are stored with a +105 bias.
pub const EDITION_BIAS_THRESHOLD: u8 = 106;
pub const EDITION_BIAS: u8 = 105;

/// Marker preceding the edition byte.
pub const STRUCTURE_MARKER: [u8; 3] = [0xFF, 0xFF, 0xFF];
/// Marker preceding the database info string.
pub const DATABASE_INFO_MARKER: [u8; 3] = [0x00, 0x00, 0x00];

/// Number of bits walked for an IPv6 key.
pub const IPV6_BITS: usize = 128;

/// Environment variable holding the default database path.
pub const DATABASE_PATH_ENV: &str = "GEOIP6_DATABASE";
/// Conventional file name of the IPv6 country database.
pub const DEFAULT_DATABASE_PATH: &str = "GeoIPv6.dat";
