//! Error type definitions.
//!
//! Open failures are surfaced synchronously to the caller of `open`/`replace`.
//! Lookup failures are surfaced on the calling thread when they are detected
//! before dispatch, and through the completion otherwise.

mod types;

// Re-export public API
pub use types::{InitializationError, LookupError, OpenError};
