//! Shared HTTP adapter state.
//!
//! The directory sits behind a single mutex so store operations
//! serialise even though actix dispatches handlers across worker
//! threads: no request observes another's half-applied write.

use std::sync::{Mutex, MutexGuard};

use crate::domain::{Error, UserDirectory};

/// Dependency bundle for HTTP handlers, shared via `web::Data`.
#[derive(Debug, Default)]
pub struct HttpState {
    directory: Mutex<UserDirectory>,
}

impl HttpState {
    /// Wrap a directory for sharing across workers.
    pub fn new(directory: UserDirectory) -> Self {
        Self {
            directory: Mutex::new(directory),
        }
    }

    /// Lock the directory for the duration of one operation.
    ///
    /// A poisoned lock means another handler panicked mid-write; surface
    /// that as an internal error instead of unwinding again.
    pub fn directory(&self) -> Result<MutexGuard<'_, UserDirectory>, Error> {
        self.directory
            .lock()
            .map_err(|_| Error::internal("user directory lock poisoned"))
    }
}
