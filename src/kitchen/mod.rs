//! Cooking stations and the sandwich join.
//!
//! A [`Kitchen`] is cheap to clone and lives on the loop thread. Each station
//! operation is a delayed operation: synchronous notifications, a timed
//! suspension, then a result. [`Kitchen::start_order`] starts both stations
//! concurrently and joins them into a [`Sandwich`](crate::models::Sandwich).

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::KitchenConfig;
use crate::display::OutputSink;
use crate::models::Station;
use crate::orchestrator::supervisor::Supervisor;
use crate::{AppError, Result};

mod order;
mod pan;
mod toaster;

pub use order::PendingOrder;

/// Shared state for every station operation started on this thread.
#[derive(Clone)]
pub struct Kitchen {
    sink: OutputSink,
    supervisor: Supervisor,
    toast_time: Duration,
    bacon_side_time: Duration,
    order_timeout: Option<Duration>,
    cancel_on_failure: bool,
    faults: Rc<HashMap<Station, String>>,
    cancel: CancellationToken,
}

impl Kitchen {
    /// Build a kitchen from `config`, reporting on `sink`.
    #[must_use]
    pub fn new(config: &KitchenConfig, sink: OutputSink, supervisor: Supervisor) -> Self {
        Self {
            sink,
            supervisor,
            toast_time: config.toast_duration(),
            bacon_side_time: config.bacon_side_duration(),
            order_timeout: config.order_timeout(),
            cancel_on_failure: config.cancel_on_failure,
            faults: Rc::new(config.faults.clone()),
            cancel: CancellationToken::new(),
        }
    }

    /// Make `station` fail with `reason` when its first stage resumes.
    #[must_use]
    pub fn with_fault(mut self, station: Station, reason: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.faults).insert(station, reason.into());
        self
    }

    /// Display sink shared by all stations.
    #[must_use]
    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    /// Supervisor tracking this kitchen's background work.
    #[must_use]
    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    /// Cancel every pending suspension in every order.
    pub fn cancel_all(&self) {
        info!("cancelling all orders");
        self.cancel.cancel();
    }

    /// The only suspension point: wait out a cooking stage.
    async fn cook(
        &self,
        station: Station,
        duration: Duration,
        cancel: &CancellationToken,
    ) -> Result<()> {
        debug!(%station, ?duration, "stage started");
        tokio::select! {
            () = cancel.cancelled() => {
                return Err(AppError::Cancelled(format!("{station} stopped before it finished")));
            }
            () = tokio::time::sleep(duration) => {}
        }
        if let Some(reason) = self.faults.get(&station) {
            return Err(AppError::OperationFailed {
                station,
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}
