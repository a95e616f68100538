//! Marshal-to-owner output queue.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::view::TextView;
use crate::{AppError, Result};

enum Command {
    Line(String),
    Flush(oneshot::Sender<()>),
}

/// Cloneable handle for appending lines to a display owned by another context.
///
/// Appending never blocks and never touches the view directly; the line is
/// queued for the owning [`SinkPump`] in arrival order.
#[derive(Debug, Clone)]
pub struct OutputSink {
    queue_tx: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line(text) => f.debug_tuple("Line").field(text).finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

/// Receiving end of the sink queue. Must run on the thread owning the view.
#[derive(Debug)]
pub struct SinkPump {
    queue_rx: mpsc::UnboundedReceiver<Command>,
}

/// Create a connected sink handle and pump.
#[must_use]
pub fn channel() -> (OutputSink, SinkPump) {
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    (OutputSink { queue_tx }, SinkPump { queue_rx })
}

impl OutputSink {
    /// Queue `text` for display followed by a line terminator.
    ///
    /// Safe to call from any thread, inside or outside a runtime.
    pub fn append_line(&self, text: impl Into<String>) {
        if let Err(err) = self.queue_tx.send(Command::Line(text.into())) {
            warn!(line = ?err.0, "display closed; line not shown");
        }
    }

    /// Wait until every line queued before this call has reached the view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::DisplayClosed` if the pump is no longer running.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.queue_tx
            .send(Command::Flush(ack_tx))
            .map_err(|_| AppError::DisplayClosed("pump stopped before flush".into()))?;
        ack_rx
            .await
            .map_err(|_| AppError::DisplayClosed("pump dropped flush acknowledgement".into()))
    }

    /// Whether the owning pump has stopped draining.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.queue_tx.is_closed()
    }
}

impl SinkPump {
    /// Drain queued lines into `view` until every [`OutputSink`] is dropped.
    ///
    /// Returns the view so the owner can inspect or reuse it.
    pub async fn run<V: TextView>(mut self, mut view: V) -> V {
        let mut lines = 0usize;
        while let Some(command) = self.queue_rx.recv().await {
            match command {
                Command::Line(text) => {
                    view.append_text(&format!("{text}\n"));
                    lines += 1;
                }
                Command::Flush(ack) => {
                    // The flusher may have stopped waiting.
                    let _ = ack.send(());
                }
            }
        }
        debug!(lines, "sink pump exiting");
        view
    }
}
