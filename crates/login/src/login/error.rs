//! Login pipeline errors.

use biometric_login_core::{Confidence, MalformedNamespacedId};
use thiserror::Error;

use crate::skybiometry::SkyBiometryError;

/// Why a registration, authentication or removal did not succeed.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The face API returned no photos.
    #[error("no picture found")]
    NoPictureFound,

    /// The first photo contained no faces.
    #[error("no faces detected")]
    NoFacesDetected,

    /// The recognized face matched none of the candidate users.
    #[error("no candidates found")]
    NoCandidatesFound,

    /// The best match scored below the caller's threshold.
    #[error("confidence {confidence} is below threshold {threshold}")]
    ConfidenceBelowThreshold {
        /// Score of the best candidate.
        confidence: Confidence,
        /// Threshold it had to reach.
        threshold: Confidence,
    },

    /// A user id returned by the face API has no namespace.
    #[error("malformed namespaced identifier: {0:?}")]
    MalformedNamespacedIdentifier(String),

    /// The tag save call succeeded but reported no saved tags.
    #[error("face API saved no tags")]
    NoSavedTag,

    /// The face API call itself failed.
    #[error(transparent)]
    Vendor(#[from] SkyBiometryError),
}

impl From<MalformedNamespacedId> for LoginError {
    fn from(err: MalformedNamespacedId) -> Self {
        Self::MalformedNamespacedIdentifier(err.0)
    }
}
