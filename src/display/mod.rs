//! Text display plumbing.
//!
//! Producers hold an [`OutputSink`] and may append lines from any thread or
//! resumption context. Lines are queued and applied to a [`TextView`] only by
//! the [`SinkPump`], which runs on the thread that owns the view.

pub mod sink;
pub mod view;

pub use sink::{channel, OutputSink, SinkPump};
pub use view::{StdoutView, TextView, TranscriptView};
