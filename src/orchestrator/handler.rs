//! Synchronous entry point wired to the UI trigger.

use tracing::info;

use super::reporter::report_result;
use crate::config::KitchenConfig;
use crate::kitchen::Kitchen;

/// Line shown as soon as the handler has started the work and returned.
pub const HANDLER_DONE: &str = "OK the button handler is all done now.";

/// Trigger handler that starts an order without waiting for it.
pub struct Orchestrator {
    kitchen: Kitchen,
    toast_slices: u32,
    bacon_slices: u32,
}

impl Orchestrator {
    /// Build a handler that orders sandwiches sized by `config`.
    #[must_use]
    pub fn new(kitchen: Kitchen, config: &KitchenConfig) -> Self {
        Self {
            kitchen,
            toast_slices: config.toast_slices,
            bacon_slices: config.bacon_slices,
        }
    }

    /// Kitchen the handler orders from.
    #[must_use]
    pub fn kitchen(&self) -> &Kitchen {
        &self.kitchen
    }

    /// Start an order, hand its outcome to a supervised reporter and return.
    ///
    /// Both stations have started cooking before the handler-done line is
    /// shown. Never suspends and never blocks; the sandwich is announced later
    /// by the reporter once both stations finish.
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`.
    pub fn on_triggered(&self) {
        info!(
            toast = self.toast_slices,
            bacon = self.bacon_slices,
            "trigger received"
        );
        let order = self
            .kitchen
            .start_order(self.toast_slices, self.bacon_slices);
        let sink = self.kitchen.sink().clone();
        self.kitchen
            .supervisor()
            .spawn("print_result", report_result(order, sink));
        self.kitchen.sink().append_line(HANDLER_DONE);
    }
}
