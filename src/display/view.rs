//! Display buffers that receive marshaled lines.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread::{self, ThreadId};

use tracing::warn;

/// A text buffer owned by a single thread.
pub trait TextView {
    /// Append already-terminated text to the buffer.
    fn append_text(&mut self, text: &str);
}

/// Writes appended text to the process stdout.
#[derive(Debug, Default)]
pub struct StdoutView;

impl TextView for StdoutView {
    fn append_text(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!(%err, "failed to write to stdout");
        }
    }
}

/// In-memory transcript recording which thread applied each line.
///
/// Clones share the same buffer, so a caller can keep one clone while the
/// pump owns another.
#[derive(Debug, Clone, Default)]
pub struct TranscriptView {
    entries: Rc<RefCell<Vec<(ThreadId, String)>>>,
}

impl TranscriptView {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, text)| text.strip_suffix('\n').unwrap_or(text).to_owned())
            .collect()
    }

    /// Full buffer contents, terminators included.
    #[must_use]
    pub fn text(&self) -> String {
        self.entries
            .borrow()
            .iter()
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// Thread that applied each line, in order.
    #[must_use]
    pub fn writer_threads(&self) -> Vec<ThreadId> {
        self.entries.borrow().iter().map(|(id, _)| *id).collect()
    }

    /// Position of the first line equal to `line`.
    #[must_use]
    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines().iter().position(|l| l == line)
    }
}

impl TextView for TranscriptView {
    fn append_text(&mut self, text: &str) {
        self.entries
            .borrow_mut()
            .push((thread::current().id(), text.to_owned()));
    }
}
