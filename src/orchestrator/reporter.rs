//! Reports a finished order on the display.

use tracing::info;

use crate::display::OutputSink;
use crate::kitchen::PendingOrder;
use crate::Result;

/// Wait for `order` and announce the sandwich on `sink`.
///
/// # Errors
///
/// Propagates the order's failure unchanged; the caller decides who observes it.
pub async fn report_result(order: PendingOrder, sink: OutputSink) -> Result<()> {
    let sandwich = order.outcome().await?;
    info!(%sandwich, "order complete");
    sink.append_line(format!("Your {sandwich} is done!"));
    Ok(())
}
