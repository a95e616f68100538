//! Domain model module declarations.

use std::fmt::{Display, Formatter};

use serde::Deserialize;

pub mod sandwich;

pub use sandwich::{Bacon, Sandwich, Toast};

/// Cooking station a delayed operation runs on.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    /// Toasts bread in a single stage.
    Toaster,
    /// Fries bacon in two stages, one per side.
    Pan,
}

impl Station {
    /// Name used in task spans and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toaster => "toaster",
            Self::Pan => "pan",
        }
    }
}

impl Display for Station {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
