//! Two-stage bacon frying.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::Kitchen;
use crate::models::{Bacon, Station};
use crate::Result;

impl Kitchen {
    /// Put `slices` slices of bacon in the pan and start the first side.
    ///
    /// Everything up to the first suspension happens before this returns.
    /// Both sides are then awaited in sequence by the returned future.
    ///
    /// The future fails with `AppError::Cancelled` if `cancel` fires on either
    /// side, or `AppError::OperationFailed` if the pan is faulted.
    pub fn fry_bacon(
        &self,
        slices: u32,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Bacon>> + 'static {
        for _ in 0..slices {
            self.sink.append_line("Putting a slice of bacon in the pan");
        }
        self.sink.append_line("cooking first side of bacon...");

        let kitchen = self.clone();
        let cancel = cancel.clone();
        async move {
            kitchen
                .cook(Station::Pan, kitchen.bacon_side_time, &cancel)
                .await?;

            for _ in 0..slices {
                kitchen.sink.append_line("flipping a slice of bacon");
            }
            kitchen.sink.append_line("cooking the second side of bacon...");

            kitchen
                .cook(Station::Pan, kitchen.bacon_side_time, &cancel)
                .await?;

            kitchen.sink.append_line("Put bacon on plate");
            info!(slices, "bacon ready");
            Ok(Bacon::new(slices))
        }
    }
}
