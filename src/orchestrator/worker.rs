//! Blocking join on a dedicated worker thread.
//!
//! Blocking the loop thread on its own pending work can never finish, since
//! that thread is the only one able to resume the work. A caller that has to
//! block uses this module instead: the order runs on a separate thread with
//! its own [`EventLoop`], and only the caller waits.

use std::thread;

use tokio::sync::oneshot;
use tracing::{info, info_span};

use crate::config::KitchenConfig;
use crate::display::OutputSink;
use crate::event_loop::EventLoop;
use crate::kitchen::Kitchen;
use crate::models::Sandwich;
use crate::orchestrator::supervisor::Supervisor;
use crate::{AppError, Result};

/// Make one sandwich on a worker thread and block the caller until it is done.
///
/// Lines are still marshaled through `sink` to whichever context owns it.
///
/// # Errors
///
/// Returns the order's failure, `AppError::Io` if the worker cannot start,
/// or `AppError::TaskPanicked` if it dies.
///
/// # Panics
///
/// Panics if called from within an asynchronous execution context; run it
/// through `tokio::task::spawn_blocking` from async code.
pub fn make_sandwich_blocking(config: &KitchenConfig, sink: OutputSink) -> Result<Sandwich> {
    let config = config.clone();
    let (reply_tx, reply_rx) = oneshot::channel();

    let worker = thread::Builder::new()
        .name("kitchen-worker".into())
        .spawn(move || {
            let _span = info_span!("kitchen_worker").entered();
            let outcome = EventLoop::new().and_then(|event_loop| {
                event_loop.run(async move {
                    let supervisor = Supervisor::new(sink.clone());
                    let kitchen = Kitchen::new(&config, sink, supervisor.clone());
                    let outcome = kitchen
                        .start_order(config.toast_slices, config.bacon_slices)
                        .outcome()
                        .await;
                    supervisor.shutdown().await;
                    outcome
                })
            });
            // The caller may have stopped waiting.
            let _ = reply_tx.send(outcome);
        })?;

    info!("waiting on kitchen worker");
    let outcome = reply_rx.blocking_recv();
    if worker.join().is_err() {
        return Err(AppError::TaskPanicked("kitchen-worker".into()));
    }
    outcome.map_err(|_| AppError::Io("kitchen worker exited without replying".into()))?
}
