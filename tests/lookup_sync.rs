//! Synchronous lookup behaviour against generated databases.

mod helpers;

use geoip_country6::{CacheMode, Country6, DatabaseHandle, Edition, LookupError, OpenError};
use helpers::{write_database, write_database_with_edition, WORLD};
use tempfile::TempDir;

#[test]
fn test_known_address_resolves_in_memory_cache_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_database(&dir, "GeoIPv6.dat", WORLD);

    let geo = Country6::open(&path, CacheMode::from(true)).expect("database should open");
    let handle = geo.handle().unwrap();
    assert_eq!(handle.edition(), Edition::CountryV6);

    let record = geo
        .lookup_sync("2001:4860:4860::8888")
        .unwrap()
        .expect("record expected");
    assert!(!record.country_code.is_empty());
    assert_eq!(record.country_code, "US");
    assert_eq!(record.country_code3, "USA");
    assert_eq!(record.country_name, "United States");
    assert_eq!(record.continent_code, "NA");
}

#[test]
fn test_standard_and_memory_modes_agree() {
    let dir = TempDir::new().unwrap();
    let path = write_database(&dir, "GeoIPv6.dat", WORLD);
    let standard = Country6::open(&path, CacheMode::Standard).unwrap();
    let cached = Country6::open(&path, CacheMode::MemoryCache).unwrap();

    for host in [
        "2001:4860:4860::8888",
        "2a00:1450:4001::1",
        "2a00:1450:4009:80b::200e",
        "2400:4050::1",
        "2600::1",
        "::1",
        "garbage",
    ] {
        assert_eq!(
            standard.lookup_sync(host).unwrap(),
            cached.lookup_sync(host).unwrap(),
            "modes disagree on {}",
            host
        );
    }
}

#[test]
fn test_most_specific_network_wins() {
    let dir = TempDir::new().unwrap();
    let geo = Country6::open(write_database(&dir, "a.dat", WORLD), CacheMode::Standard).unwrap();
    let de = geo.lookup_sync("2a00:1450:4001::1").unwrap().unwrap();
    let gb = geo.lookup_sync("2a00:1450:4009::1").unwrap().unwrap();
    assert_eq!(de.country_code, "DE");
    assert_eq!(gb.country_code, "GB");
}

#[test]
fn test_malformed_addresses_are_misses() {
    let dir = TempDir::new().unwrap();
    let geo = Country6::open(write_database(&dir, "a.dat", WORLD), CacheMode::MemoryCache)
        .unwrap();
    for host in ["", "not-an-address", "google.com", "8.8.8.8", "2001:4860::8888::1", "::"] {
        assert_eq!(geo.lookup_sync(host).unwrap(), None, "{:?}", host);
    }
}

#[test]
fn test_record_id_zero_is_a_miss() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("holes.dat");
    let mut writer = geoip_country6::DatabaseWriter::new();
    writer
        .insert("2001:4860::".parse().unwrap(), 32, helpers::country("US"))
        .unwrap()
        .remove("2001:4860:4860::".parse().unwrap(), 48)
        .unwrap();
    writer.write_to(&path).unwrap();

    let geo = Country6::open(&path, CacheMode::Standard).unwrap();
    assert_eq!(geo.lookup_sync("2001:4860:4860::8888").unwrap(), None);
    assert!(geo.lookup_sync("2001:4860:1::1").unwrap().is_some());
}

#[test]
fn test_plain_country_edition_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = write_database_with_edition(&dir, "GeoIP.dat", Edition::Country, WORLD);

    let err = Country6::open(&path, CacheMode::MemoryCache).unwrap_err();
    assert!(
        matches!(err, OpenError::InvalidEdition { edition: Edition::Country, .. }),
        "unexpected error: {:?}",
        err
    );

    // The rejected file was fully released: it can be opened again elsewhere.
    let inspected = DatabaseHandle::open_any(&path, CacheMode::Standard).unwrap();
    assert_eq!(inspected.edition(), Edition::Country);
    assert_eq!(
        inspected.info(),
        Some("GEO-106FREE 20240101 Build 1 Test fixture")
    );
}

#[test]
fn test_other_editions_are_invalid() {
    let dir = TempDir::new().unwrap();
    for edition in [Edition::LargeCountryV6, Edition::CityRev1V6, Edition::Proxy] {
        let path = write_database_with_edition(&dir, "other.dat", edition, WORLD);
        let err = Country6::open(&path, CacheMode::Standard).unwrap_err();
        assert!(matches!(err, OpenError::InvalidEdition { .. }), "{}", edition);
    }
}

#[test]
fn test_missing_file_is_open_failed() {
    let dir = TempDir::new().unwrap();
    let err = Country6::open(dir.path().join("nope.dat"), CacheMode::Standard).unwrap_err();
    assert!(matches!(err, OpenError::OpenFailed { .. }));
    assert!(err.to_string().contains("Cannot open database"));
}

#[test]
fn test_wrong_edition_handle_fails_lookup() {
    let dir = TempDir::new().unwrap();
    let path = write_database_with_edition(&dir, "GeoIP.dat", Edition::Country, WORLD);
    let handle = DatabaseHandle::open_any(&path, CacheMode::Standard).unwrap();
    let geo = Country6::with_handle(handle.into());
    assert_eq!(
        geo.lookup_sync("2001:4860:4860::8888").unwrap_err(),
        LookupError::WrongEdition(Edition::Country)
    );
}
