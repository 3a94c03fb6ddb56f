//! Recognition confidence score.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Similarity score between a detected face and a trained user model.
///
/// The face API reports integer percentages. Scores are only ever compared
/// against a caller threshold; no arithmetic happens on them here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(u32);

impl Confidence {
    /// Create a confidence score.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw score.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this score reaches `threshold` (inclusive).
    #[must_use]
    pub const fn meets(self, threshold: Self) -> bool {
        self.0 >= threshold.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Confidence {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
