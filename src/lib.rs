//! geoip_country6 library: offline IPv6 to country lookups
//!
//! This library resolves IPv6 addresses to country records using a legacy
//! GeoIP country IPv6 database held locally, either read through from disk or
//! fully cached in memory. Lookups run inline or on a worker pool with the
//! result delivered through a callback or a future.
//!
//! # Example
//!
//! ```no_run
//! use geoip_country6::{CacheMode, Country6};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let geo = Country6::open("GeoIPv6.dat", CacheMode::MemoryCache)?;
//!
//! // Inline
//! let record = geo.lookup_sync("2001:4860:4860::8888")?;
//! println!("{:?}", record.map(|r| r.country_code));
//!
//! // On the worker pool
//! let record = geo.lookup_async("2a00:1450:4001:800::200e")?.await?;
//! println!("{}", record.country_name);
//!
//! // Point at a new file; lookups already submitted finish on the old one
//! geo.replace("GeoIPv6-new.dat", CacheMode::MemoryCache)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Asynchronous lookups need a Tokio runtime, either the ambient one or one
//! pinned with [`Country6::with_runtime`]. Synchronous lookups do not.

pub mod cli;
pub mod config;
mod error_handling;
mod geoip;
pub mod initialization;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{InitializationError, LookupError, OpenError};
pub use geoip::{
    find_by_code, latin1_to_utf8, materialize, resolve, AddressKey, CacheMode, Country6,
    CountryRecord, DatabaseHandle, DatabaseWriter, Edition, LookupResult, RecordId, TABLE_LEN,
};
