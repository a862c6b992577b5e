use log::SetLoggerError;
use std::path::PathBuf;
use thiserror::Error;

use crate::geoip::Edition;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failures raised while opening or replacing a database.
///
/// Both variants guarantee the underlying file has already been released.
#[derive(Error, Debug)]
pub enum OpenError {
    /// The file could not be opened, read, or does not look like a database.
    #[error("Cannot open database {}: {source}", path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file opened fine but holds an edition other than country IPv6.
    #[error("Not valid country database {}: found {edition} edition", path.display())]
    InvalidEdition { path: PathBuf, edition: Edition },
}

impl OpenError {
    pub(crate) fn open_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OpenError::OpenFailed {
            path: path.into(),
            source,
        }
    }
}

/// Failures raised by the lookup entry points.
///
/// `WrongEdition`, `Closed` and `NoRuntime` are reported synchronously on the
/// calling thread. `NotFound` and `Worker` only ever reach a completion callback
/// or the future returned by `lookup_async`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The handle is not a country IPv6 database.
    #[error("Database is not country ipv6 edition (found {0})")]
    WrongEdition(Edition),

    /// The address did not parse or resolved to no record.
    #[error("Data not found")]
    NotFound,

    /// The engine was closed before the lookup was issued.
    #[error("Database is closed")]
    Closed,

    /// An asynchronous lookup was issued outside a Tokio runtime, or after the
    /// pinned runtime shut down.
    #[error("No async runtime available to dispatch the lookup")]
    NoRuntime,

    /// The background worker panicked, or the runtime shut down before the
    /// lookup ran.
    #[error("Lookup worker failed: {0}")]
    Worker(String),
}
