//! GeoIP data structures.

use serde::{Deserialize, Serialize};

/// Country attributes returned by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    /// English country name, UTF-8
    pub country_name: String,
    /// ISO 3166-1 alpha-2 code
    pub country_code: String,
    /// ISO 3166-1 alpha-3 code
    pub country_code3: String,
    /// Two-letter continent code (AF, AN, AS, EU, NA, OC, SA)
    pub continent_code: String,
}
