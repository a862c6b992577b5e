// Shared test helpers for building database fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::PathBuf;

use geoip_country6::{find_by_code, DatabaseWriter, Edition, RecordId};
use tempfile::TempDir;

/// Id of the table entry with the given ISO code.
#[allow(dead_code)] // Used by other test files
pub fn country(code: &str) -> RecordId {
    find_by_code(code).unwrap_or_else(|| panic!("unknown country code {}", code))
}

/// Writes a country IPv6 database mapping each `(network, prefix, code)`.
#[allow(dead_code)] // Used by other test files
pub fn write_database(dir: &TempDir, name: &str, networks: &[(&str, u8, &str)]) -> PathBuf {
    write_database_with_edition(dir, name, Edition::CountryV6, networks)
}

/// Same as [`write_database`] with an explicit edition tag.
#[allow(dead_code)] // Used by other test files
pub fn write_database_with_edition(
    dir: &TempDir,
    name: &str,
    edition: Edition,
    networks: &[(&str, u8, &str)],
) -> PathBuf {
    let mut writer = DatabaseWriter::new()
        .edition(edition)
        .info("GEO-106FREE 20240101 Build 1 Test fixture");
    for (network, prefix, code) in networks {
        writer
            .insert(network.parse().expect("valid IPv6 network"), *prefix, country(code))
            .expect("valid prefix");
    }
    let path = dir.path().join(name);
    writer.write_to(&path).expect("Failed to write database fixture");
    path
}

/// A small world: Google DNS in the US, a European block in DE with a GB
/// subnet, and a Japanese block.
#[allow(dead_code)] // Used by other test files
pub const WORLD: &[(&str, u8, &str)] = &[
    ("2001:4860::", 32, "US"),
    ("2a00:1450::", 32, "DE"),
    ("2a00:1450:4009::", 48, "GB"),
    ("2400:4000::", 22, "JP"),
];

/// The same networks, all mapped to France.
#[allow(dead_code)] // Used by other test files
pub const WORLD_FR: &[(&str, u8, &str)] = &[
    ("2001:4860::", 32, "FR"),
    ("2a00:1450::", 32, "FR"),
    ("2400:4000::", 22, "FR"),
];
