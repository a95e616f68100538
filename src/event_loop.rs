//! The single logical thread every cooperative task runs on.

use std::future::Future;

use tokio::runtime::{Builder, Runtime};
use tokio::task::LocalSet;

use crate::{AppError, Result};

/// A current-thread runtime paired with the `LocalSet` that owns local tasks.
///
/// [`run`](Self::run) consumes the loop, so it can only drive the outermost
/// future of a thread. Nothing running inside the loop can block on it.
pub struct EventLoop {
    runtime: Runtime,
    local: LocalSet,
}

impl EventLoop {
    /// Build a new loop for the calling thread.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the runtime cannot be created.
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| AppError::Io(format!("failed to build event loop: {err}")))?;
        Ok(Self {
            runtime,
            local: LocalSet::new(),
        })
    }

    /// Drive `future` and every local task it spawns until `future` resolves.
    ///
    /// # Panics
    ///
    /// Panics if called from within another runtime's execution context.
    pub fn run<F: Future>(self, future: F) -> F::Output {
        self.runtime.block_on(self.local.run_until(future))
    }
}
