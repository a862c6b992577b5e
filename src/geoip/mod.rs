//! IPv6 country lookups against a legacy GeoIP country database.
//!
//! Data flow: host text → [`AddressKey`] → trie walk over a [`DatabaseHandle`]
//! → [`RecordId`] → [`CountryRecord`] from the fixed country table. Lookups run
//! inline ([`Country6::lookup_sync`]) or on the Tokio blocking pool
//! ([`Country6::lookup`], [`Country6::lookup_async`]).

mod address;
mod countries;
mod country6;
mod database;
mod dispatch;
mod edition;
mod encoding;
mod lookup;
mod storage;
mod types;
mod writer;

// Re-export public API
pub use address::AddressKey;
pub use countries::{find_by_code, materialize, TABLE_LEN};
pub use country6::Country6;
pub use database::DatabaseHandle;
pub use dispatch::LookupResult;
pub use edition::Edition;
pub use encoding::latin1_to_utf8;
pub use lookup::{resolve, RecordId};
pub use storage::CacheMode;
pub use types::CountryRecord;
pub use writer::DatabaseWriter;
