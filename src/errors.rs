//! Error types shared across the application.

use std::fmt::{Display, Formatter};

use crate::models::Station;

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all orchestration failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// File-system, runtime construction or thread failure.
    Io(String),
    /// A station could not finish its simulated work.
    OperationFailed {
        /// Station whose work failed.
        station: Station,
        /// Human-readable cause.
        reason: String,
    },
    /// Not every constituent of a join succeeded; carries the first failure observed.
    JoinFailed(Box<AppError>),
    /// A fire-and-forget task failed with nobody awaiting it.
    Unobserved {
        /// Name the task was registered under.
        task: String,
        /// The failure the task returned.
        source: Box<AppError>,
    },
    /// A pending suspension was cancelled before it resumed.
    Cancelled(String),
    /// An order did not complete within its deadline.
    Timeout(String),
    /// The owning display context is no longer draining the sink.
    DisplayClosed(String),
    /// A spawned task panicked instead of returning.
    TaskPanicked(String),
}

impl AppError {
    /// The innermost failure, looking through join and unobserved wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &AppError {
        match self {
            Self::JoinFailed(inner) | Self::Unobserved { source: inner, .. } => inner.root_cause(),
            other => other,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::OperationFailed { station, reason } => {
                write!(f, "operation failed: {station}: {reason}")
            }
            Self::JoinFailed(inner) => write!(f, "join failed: {inner}"),
            Self::Unobserved { task, source } => write!(f, "unobserved failure in {task}: {source}"),
            Self::Cancelled(msg) => write!(f, "cancelled: {msg}"),
            Self::Timeout(msg) => write!(f, "timeout: {msg}"),
            Self::DisplayClosed(msg) => write!(f, "display closed: {msg}"),
            Self::TaskPanicked(task) => write!(f, "task panicked: {task}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::JoinFailed(inner) | Self::Unobserved { source: inner, .. } => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
