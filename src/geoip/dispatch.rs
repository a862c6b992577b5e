//! Offloads lookups to the Tokio blocking pool.
//!
//! Each submission captures its own `Arc<DatabaseHandle>`, so replacing or
//! closing the engine never affects work that was already accepted. The
//! completion travels inside the blocking job: it is called when the job runs,
//! and from the job's destructor if the runtime drops the job unstarted.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;

use crate::error_handling::LookupError;
use crate::geoip::address::AddressKey;
use crate::geoip::countries::materialize;
use crate::geoip::database::DatabaseHandle;
use crate::geoip::lookup::resolve;
use crate::geoip::types::CountryRecord;

/// Outcome delivered for one background lookup.
pub type LookupResult = Result<CountryRecord, LookupError>;

#[derive(Debug, Default)]
pub(crate) struct Dispatcher {
    runtime: Option<Handle>,
    in_flight: Arc<AtomicUsize>,
}

/// Decrements the in-flight counter when the background job ends, whether it
/// ran or was dropped.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct CompletionState<F> {
    on_complete: Option<F>,
    in_flight: Option<InFlight>,
    /// Set once `submit` has returned `Ok`.
    accepted: bool,
    /// Set when the job was dropped before acceptance.
    refused: bool,
}

/// Owns the callback of one submission and guarantees a single delivery.
struct Completion<F: FnOnce(LookupResult)> {
    state: Arc<Mutex<CompletionState<F>>>,
}

impl<F: FnOnce(LookupResult)> Completion<F> {
    fn deliver(&self, result: LookupResult) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let on_complete = state.on_complete.take();
        state.in_flight = None;
        drop(state);
        if let Some(on_complete) = on_complete {
            on_complete(result);
        }
    }
}

impl<F: FnOnce(LookupResult)> Drop for Completion<F> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.on_complete.is_none() {
            return;
        }
        if !state.accepted {
            // Refused synchronously; the submitter reports NoRuntime instead.
            state.refused = true;
            return;
        }
        let on_complete = state.on_complete.take();
        state.in_flight = None;
        drop(state);
        log::warn!("Lookup dropped before it ran: runtime shut down");
        if let Some(on_complete) = on_complete {
            on_complete(Err(LookupError::Worker(
                "runtime shut down before the lookup ran".to_string(),
            )));
        }
    }
}

impl Dispatcher {
    pub(crate) fn with_runtime(runtime: Handle) -> Self {
        Dispatcher {
            runtime: Some(runtime),
            in_flight: Arc::default(),
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn runtime(&self) -> Result<Handle, LookupError> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(LookupError::NoRuntime)
    }

    /// Schedules resolve + materialize on the blocking pool and hands the
    /// outcome to `on_complete` exactly once.
    ///
    /// Returns `NoRuntime` without calling `on_complete` when there is no
    /// runtime or the runtime has shut down.
    pub(crate) fn submit<F>(
        &self,
        handle: Arc<DatabaseHandle>,
        key: AddressKey,
        on_complete: F,
    ) -> Result<(), LookupError>
    where
        F: FnOnce(LookupResult) + Send + 'static,
    {
        let runtime = self.runtime()?;
        let state = Arc::new(Mutex::new(CompletionState {
            on_complete: Some(on_complete),
            in_flight: Some(InFlight::enter(&self.in_flight)),
            accepted: false,
            refused: false,
        }));
        let completion = Completion {
            state: Arc::clone(&state),
        };

        // A shut-down runtime drops the job inside this call.
        let _job = runtime.spawn_blocking(move || {
            let result = catch_unwind(AssertUnwindSafe(|| {
                resolve(&handle, key)
                    .map(materialize)
                    .ok_or(LookupError::NotFound)
            }))
            .unwrap_or_else(|panic| {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "lookup panicked".to_string());
                log::warn!("Lookup worker failed: {}", message);
                Err(LookupError::Worker(message))
            });
            log::debug!("Background lookup {} -> {:?}", key, result);
            completion.deliver(result);
        });

        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.refused {
            state.on_complete = None;
            state.in_flight = None;
            return Err(LookupError::NoRuntime);
        }
        state.accepted = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geoip::storage::CacheMode;
    use crate::geoip::writer::DatabaseWriter;
    use tempfile::TempDir;

    fn empty_handle(dir: &TempDir) -> Arc<DatabaseHandle> {
        let path = dir.path().join("empty.dat");
        DatabaseWriter::new().write_to(&path).unwrap();
        Arc::new(DatabaseHandle::open(&path, CacheMode::MemoryCache).unwrap())
    }

    #[test]
    fn test_submit_without_runtime_fails() {
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.runtime().unwrap_err(), LookupError::NoRuntime);
        assert_eq!(dispatcher.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_ambient_runtime_is_used() {
        let dispatcher = Dispatcher::default();
        assert!(dispatcher.runtime().is_ok());
    }

    #[test]
    fn test_in_flight_guard_balances() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _a = InFlight::enter(&counter);
            let _b = InFlight::enter(&counter);
            assert_eq!(counter.load(Ordering::SeqCst), 2);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_accepted_job_dropped_unrun_delivers_worker_error() {
        let (tx, rx) = std::sync::mpsc::channel();
        let state = Arc::new(Mutex::new(CompletionState {
            on_complete: Some(move |result: LookupResult| tx.send(result).unwrap()),
            in_flight: None,
            accepted: true,
            refused: false,
        }));
        drop(Completion {
            state: Arc::clone(&state),
        });
        assert!(matches!(rx.recv().unwrap(), Err(LookupError::Worker(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_refused_job_does_not_deliver() {
        let state = Arc::new(Mutex::new(CompletionState {
            on_complete: Some(|_: LookupResult| panic!("must not be called")),
            in_flight: None,
            accepted: false,
            refused: false,
        }));
        drop(Completion {
            state: Arc::clone(&state),
        });
        let state = state.lock().unwrap();
        assert!(state.refused);
        assert!(state.on_complete.is_some());
    }

    #[test]
    fn test_shut_down_runtime_refuses_submission() {
        let dir = TempDir::new().unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dispatcher = Dispatcher::with_runtime(runtime.handle().clone());
        drop(runtime);

        let err = dispatcher
            .submit(empty_handle(&dir), AddressKey::parse("2001::1"), |_| {
                panic!("must not be called")
            })
            .unwrap_err();
        assert_eq!(err, LookupError::NoRuntime);
        assert_eq!(dispatcher.in_flight(), 0);
    }
}
