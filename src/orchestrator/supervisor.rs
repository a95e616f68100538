//! Tracking for background tasks nobody awaits.
//!
//! Every fire-and-forget task is spawned through a [`Supervisor`], which
//! keeps it in a `TaskTracker` for shutdown and turns a returned error into
//! an [`AppError::Unobserved`] that is logged, shown on the display and
//! recorded for later inspection.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info_span, Instrument};

use crate::display::OutputSink;
use crate::{AppError, Result};

/// Registry of background tasks running on the current `LocalSet`.
#[derive(Clone)]
pub struct Supervisor {
    tracker: TaskTracker,
    sink: OutputSink,
    failures: Rc<RefCell<Vec<AppError>>>,
}

impl Supervisor {
    /// Create a supervisor that describes failures on `sink`.
    #[must_use]
    pub fn new(sink: OutputSink) -> Self {
        Self {
            tracker: TaskTracker::new(),
            sink,
            failures: Rc::default(),
        }
    }

    /// Start a tracked fire-and-forget task.
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`.
    pub fn spawn<F>(&self, task: &str, future: F)
    where
        F: Future<Output = Result<()>> + 'static,
    {
        let supervisor = self.clone();
        let name = task.to_owned();
        let span = info_span!("background", task = %name);
        drop(tokio::task::spawn_local(self.tracker.track_future(
            async move {
                match future.await {
                    Ok(()) => debug!("background task finished"),
                    Err(err) => supervisor.record(&name, err),
                }
            }
            .instrument(span),
        )));
    }

    /// Start a tracked local task whose outcome the caller will observe.
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`.
    pub fn spawn_observed<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        tokio::task::spawn_local(self.tracker.track_future(future))
    }

    /// Adopt a task whose original awaiter gave up on it.
    ///
    /// The task keeps running to completion; a failure it returns later is
    /// recorded like any other unobserved failure.
    pub fn watch<T: 'static>(&self, task: &str, handle: JoinHandle<Result<T>>) {
        let name = task.to_owned();
        self.spawn(task, async move {
            join_outcome(&name, handle.await).map(|_| ())
        });
    }

    /// Stop accepting tasks and wait for every tracked task to finish.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }

    /// Number of tracked tasks still running.
    #[must_use]
    pub fn active(&self) -> usize {
        self.tracker.len()
    }

    /// Unobserved failures recorded so far, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<AppError> {
        self.failures.borrow().clone()
    }

    fn record(&self, task: &str, err: AppError) {
        let failure = AppError::Unobserved {
            task: task.to_owned(),
            source: Box::new(err),
        };
        error!(task, error = %failure, "background task failed with nobody awaiting it");
        self.sink.append_line(format!("Something went wrong: {failure}"));
        self.failures.borrow_mut().push(failure);
    }
}

/// Convert a joined task's outcome into the crate result type.
pub(crate) fn join_outcome<T>(
    task: &str,
    joined: std::result::Result<Result<T>, JoinError>,
) -> Result<T> {
    match joined {
        Ok(outcome) => outcome,
        Err(err) if err.is_panic() => Err(AppError::TaskPanicked(task.to_owned())),
        Err(_) => Err(AppError::Cancelled(format!("{task} was aborted"))),
    }
}
