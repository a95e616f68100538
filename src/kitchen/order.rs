//! Concurrent start and join of both stations.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::DropGuard;
use tracing::{debug, info, info_span, warn, Instrument};

use super::Kitchen;
use crate::models::{Bacon, Sandwich, Station, Toast};
use crate::orchestrator::supervisor::join_outcome;
use crate::{AppError, Result};

/// Outcome holder for an order that is already running.
///
/// The only way to get the sandwich is to await [`outcome`](Self::outcome);
/// there is deliberately no synchronous accessor.
#[must_use = "dropping a pending order detaches it and loses its outcome"]
pub struct PendingOrder {
    task: JoinHandle<Result<Sandwich>>,
}

impl PendingOrder {
    /// Suspend until the order completes or fails.
    ///
    /// # Errors
    ///
    /// Returns the order's failure, typically `AppError::JoinFailed` or
    /// `AppError::Timeout`.
    pub async fn outcome(self) -> Result<Sandwich> {
        join_outcome("order", self.task.await)
    }

    /// Whether the order has resolved, successfully or not.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

enum FirstDone {
    Toast(Result<Toast>),
    Bacon(Result<Bacon>),
}

/// Both station tasks of one order, cancelled together when dropped.
struct Stations {
    toast: JoinHandle<Result<Toast>>,
    bacon: JoinHandle<Result<Bacon>>,
    guard: DropGuard,
}

impl Kitchen {
    /// Start an order in the background and return its outcome holder.
    ///
    /// Both stations have emitted their preparation and start notifications
    /// and are suspended on their first stage by the time this returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`.
    pub fn start_order(&self, toast_slices: u32, bacon_slices: u32) -> PendingOrder {
        let span = info_span!("order", toast = toast_slices, bacon = bacon_slices);
        let sandwich = span.in_scope(|| self.make_sandwich(toast_slices, bacon_slices));
        let order_timeout = self.order_timeout;
        let task = self.supervisor.spawn_observed(
            async move {
                let Some(limit) = order_timeout else {
                    return sandwich.await;
                };
                tokio::time::timeout(limit, sandwich)
                    .await
                    .map_err(|_| AppError::Timeout(format!("sandwich not ready after {limit:?}")))?
            }
            .instrument(span),
        );
        PendingOrder { task }
    }

    /// Cook toast and bacon concurrently and join them into a sandwich.
    ///
    /// Both stations start when this is called, not when the returned future
    /// is first polled, so the order takes as long as the slower station
    /// rather than the sum of both. If the future is dropped before the join
    /// resolves, both stations are cancelled.
    ///
    /// The future fails with `AppError::JoinFailed` carrying the first station
    /// failure observed. The other station keeps running under the supervisor
    /// unless `cancel_on_failure` is set.
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`.
    pub fn make_sandwich(
        &self,
        toast_slices: u32,
        bacon_slices: u32,
    ) -> impl Future<Output = Result<Sandwich>> + 'static {
        let stations = self.start_stations(toast_slices, bacon_slices);
        let kitchen = self.clone();
        async move { kitchen.join(stations).await }
    }

    fn start_stations(&self, toast_slices: u32, bacon_slices: u32) -> Stations {
        let order = self.cancel.child_token();

        let toast_span = info_span!("station", station = %Station::Toaster);
        let toast = toast_span.in_scope(|| self.toast_bread(toast_slices, &order));
        let toast = self.supervisor.spawn_observed(toast.instrument(toast_span));

        let bacon_span = info_span!("station", station = %Station::Pan);
        let bacon = bacon_span.in_scope(|| self.fry_bacon(bacon_slices, &order));
        let bacon = self.supervisor.spawn_observed(bacon.instrument(bacon_span));

        debug!("both stations started");
        Stations {
            toast,
            bacon,
            guard: order.drop_guard(),
        }
    }

    async fn join(&self, stations: Stations) -> Result<Sandwich> {
        let Stations {
            toast: mut toast_task,
            bacon: mut bacon_task,
            guard,
        } = stations;

        let first = tokio::select! {
            joined = &mut toast_task => FirstDone::Toast(join_outcome(Station::Toaster.as_str(), joined)),
            joined = &mut bacon_task => FirstDone::Bacon(join_outcome(Station::Pan.as_str(), joined)),
        };

        let (toast, bacon) = match first {
            FirstDone::Toast(Ok(toast)) => {
                let bacon = join_outcome(Station::Pan.as_str(), bacon_task.await)
                    .map_err(|err| AppError::JoinFailed(Box::new(err)))?;
                (toast, bacon)
            }
            FirstDone::Bacon(Ok(bacon)) => {
                let toast = join_outcome(Station::Toaster.as_str(), toast_task.await)
                    .map_err(|err| AppError::JoinFailed(Box::new(err)))?;
                (toast, bacon)
            }
            FirstDone::Toast(Err(err)) => {
                return Err(self.abandon(Station::Pan, bacon_task, guard, err));
            }
            FirstDone::Bacon(Err(err)) => {
                return Err(self.abandon(Station::Toaster, toast_task, guard, err));
            }
        };

        let sandwich = Sandwich::new(toast, bacon);
        info!(%sandwich, "join complete");
        Ok(sandwich)
    }

    /// Give up on the join after `err`, leaving the surviving station to the supervisor.
    fn abandon<T: 'static>(
        &self,
        survivor: Station,
        handle: JoinHandle<Result<T>>,
        guard: DropGuard,
        err: AppError,
    ) -> AppError {
        warn!(error = %err, %survivor, "join failed; station still running");
        if self.cancel_on_failure {
            info!(%survivor, "cancelling surviving station");
            drop(guard);
        } else {
            let _ = guard.disarm();
            self.supervisor.watch(survivor.as_str(), handle);
        }
        AppError::JoinFailed(Box::new(err))
    }
}
