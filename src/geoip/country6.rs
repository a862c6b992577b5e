//! The lookup engine as an owned value.
//!
//! `Country6` holds the current database behind `RwLock<Option<Arc<_>>>`.
//! Every lookup clones the `Arc` up front, so `replace` and `close` only swap
//! the slot: readers that already hold the old handle finish against it, and
//! the old file is released once the last of them drops it.

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::runtime::Handle;
use tokio::sync::oneshot;

use crate::error_handling::{LookupError, OpenError};
use crate::geoip::address::AddressKey;
use crate::geoip::countries::materialize;
use crate::geoip::database::DatabaseHandle;
use crate::geoip::dispatch::{Dispatcher, LookupResult};
use crate::geoip::lookup::resolve;
use crate::geoip::storage::CacheMode;
use crate::geoip::types::CountryRecord;

/// IPv6 country lookups against a replaceable database.
///
/// # Example
///
/// ```no_run
/// use geoip_country6::{CacheMode, Country6};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let geo = Country6::open("/usr/share/GeoIP/GeoIPv6.dat", CacheMode::MemoryCache)?;
/// if let Some(record) = geo.lookup_sync("2001:4860:4860::8888")? {
///     println!("{} ({})", record.country_name, record.country_code);
/// }
///
/// geo.lookup("2a00:1450::1", |result| match result {
///     Ok(record) => println!("{}", record.country_code),
///     Err(e) => eprintln!("{}", e),
/// })?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Country6 {
    current: RwLock<Option<Arc<DatabaseHandle>>>,
    dispatcher: Dispatcher,
}

impl Country6 {
    /// Opens the database at `path`. Fails unless it is the country IPv6 edition.
    pub fn open(path: impl AsRef<Path>, cache_mode: CacheMode) -> Result<Self, OpenError> {
        let handle = DatabaseHandle::open(path, cache_mode)?;
        Ok(Self::with_handle(Arc::new(handle)))
    }

    /// Adopts an already opened handle without re-validating its edition.
    pub fn with_handle(handle: Arc<DatabaseHandle>) -> Self {
        Country6 {
            current: RwLock::new(Some(handle)),
            dispatcher: Dispatcher::default(),
        }
    }

    /// Pins asynchronous lookups to `runtime` instead of the ambient one.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.dispatcher = Dispatcher::with_runtime(runtime);
        self
    }

    /// Opens `path` and makes it the current database.
    ///
    /// On failure the current database stays in place. On success lookups
    /// already submitted keep using the previous database.
    pub fn replace(
        &self,
        path: impl AsRef<Path>,
        cache_mode: CacheMode,
    ) -> Result<Arc<DatabaseHandle>, OpenError> {
        let handle = Arc::new(DatabaseHandle::open(path, cache_mode)?);
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&handle));
        match previous {
            Some(old) => log::info!(
                "Replaced {} with {} ({} lookups still in flight)",
                old.path().display(),
                handle.path().display(),
                self.in_flight()
            ),
            None => log::info!("Reopened with {}", handle.path().display()),
        }
        Ok(handle)
    }

    /// Releases the current database. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match previous {
            Some(handle) => {
                log::info!("Closed {}", handle.path().display());
                true
            }
            None => false,
        }
    }

    /// The current database, if open.
    pub fn handle(&self) -> Option<Arc<DatabaseHandle>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_open(&self) -> bool {
        self.handle().is_some()
    }

    /// Background lookups accepted but not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    fn checked_handle(&self) -> Result<Arc<DatabaseHandle>, LookupError> {
        let handle = self.handle().ok_or(LookupError::Closed)?;
        if handle.edition().is_country_v6() {
            Ok(handle)
        } else {
            Err(LookupError::WrongEdition(handle.edition()))
        }
    }

    /// Resolves `host` on the calling thread.
    ///
    /// Malformed hosts and unmapped addresses yield `Ok(None)`.
    pub fn lookup_sync(&self, host: &str) -> Result<Option<CountryRecord>, LookupError> {
        let handle = self.checked_handle()?;
        let key = AddressKey::parse(host);
        let record = resolve(&handle, key).map(materialize);
        log::debug!("Lookup {} -> {:?}", host, record);
        Ok(record)
    }

    /// Resolves `host` on the worker pool and calls `on_complete` exactly once
    /// with the outcome.
    ///
    /// Edition, closed and runtime checks fail here, before anything is
    /// scheduled. A miss is delivered as `Err(LookupError::NotFound)`.
    /// Completions arrive in the order the workers finish.
    pub fn lookup<F>(&self, host: &str, on_complete: F) -> Result<(), LookupError>
    where
        F: FnOnce(LookupResult) + Send + 'static,
    {
        let handle = self.checked_handle()?;
        let key = AddressKey::parse(host);
        self.dispatcher.submit(handle, key, on_complete)
    }

    /// Future-based form of [`Country6::lookup`].
    ///
    /// The lookup is checked and submitted before this returns, against the
    /// database current at the call. The returned future only waits for the
    /// outcome and does not borrow `self`.
    pub fn lookup_async(
        &self,
        host: &str,
    ) -> Result<impl Future<Output = LookupResult> + Send + 'static, LookupError> {
        let (tx, rx) = oneshot::channel();
        self.lookup(host, move |result| {
            let _ = tx.send(result);
        })?;
        Ok(async move {
            rx.await.unwrap_or_else(|_| {
                Err(LookupError::Worker(
                    "lookup ended without a result".to_string(),
                ))
            })
        })
    }
}
