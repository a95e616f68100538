//! Single-stage toasting.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::Kitchen;
use crate::models::{Station, Toast};
use crate::Result;

impl Kitchen {
    /// Put `slices` slices of bread in the toaster and start it.
    ///
    /// The preparation and start notifications are emitted before this
    /// returns. The returned future owns the rest of the work: it suspends
    /// for the toasting time, then takes the toast out.
    ///
    /// The future fails with `AppError::Cancelled` if `cancel` fires while
    /// toasting, or `AppError::OperationFailed` if the toaster is faulted.
    pub fn toast_bread(
        &self,
        slices: u32,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Toast>> + 'static {
        for _ in 0..slices {
            self.sink.append_line("Putting a slice of bread in the toaster");
        }
        self.sink.append_line("Start toasting...");

        let kitchen = self.clone();
        let cancel = cancel.clone();
        async move {
            kitchen
                .cook(Station::Toaster, kitchen.toast_time, &cancel)
                .await?;

            kitchen.sink.append_line("Remove toast from toaster");
            info!(slices, "toast ready");
            Ok(Toast::new(slices))
        }
    }
}
