//! Immutable results produced by the cooking stations.

use std::fmt::{Display, Formatter};

/// Toasted bread produced by the toaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toast {
    slices: u32,
}

impl Toast {
    /// Construct toast carrying a fixed slice count.
    #[must_use]
    pub fn new(slices: u32) -> Self {
        Self { slices }
    }

    /// Number of slices toasted.
    #[must_use]
    pub fn slices(&self) -> u32 {
        self.slices
    }
}

/// Fried bacon produced by the pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bacon {
    slices: u32,
}

impl Bacon {
    /// Construct bacon carrying a fixed slice count.
    #[must_use]
    pub fn new(slices: u32) -> Self {
        Self { slices }
    }

    /// Number of slices fried.
    #[must_use]
    pub fn slices(&self) -> u32 {
        self.slices
    }
}

/// A finished sandwich. Only constructible from both finished constituents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sandwich {
    toast: Toast,
    bacon: Bacon,
}

impl Sandwich {
    /// Assemble a sandwich, taking ownership of both constituents.
    #[must_use]
    pub fn new(toast: Toast, bacon: Bacon) -> Self {
        Self { toast, bacon }
    }

    /// The toast half.
    #[must_use]
    pub fn toast(&self) -> Toast {
        self.toast
    }

    /// The bacon half.
    #[must_use]
    pub fn bacon(&self) -> Bacon {
        self.bacon
    }
}

impl Display for Sandwich {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sandwich with {} pieces of toast and {} pieces of bacon",
            self.toast.slices, self.bacon.slices
        )
    }
}
