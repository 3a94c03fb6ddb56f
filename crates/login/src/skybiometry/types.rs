//! Request and response types for the SkyBiometry face API.
//!
//! Only the fields the login pipelines read are required; everything else
//! the API returns is optional so that partial fixtures and newer API
//! revisions still deserialize.
//!
//! See: <https://skybiometry.com/documentation/>

use biometric_login_core::{
    Confidence, NamespacedId, PersistentTagId, TemporaryTagId, VendorOptions,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Request Types
// =============================================================================

/// Parameters for `faces/detect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectRequest {
    /// Photo URLs to scan.
    pub urls: Vec<String>,
    /// Detector and attribute options, already merged with caller overrides.
    pub options: VendorOptions,
}

/// Parameters for `tags/save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTagsRequest {
    /// User the tags are saved against.
    pub uid: NamespacedId,
    /// Temporary tag ids from a detect or recognize call.
    pub tids: Vec<TemporaryTagId>,
}

/// Parameters for `faces/train`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainRequest {
    /// User whose model is rebuilt from their saved tags.
    pub uids: NamespacedId,
}

/// Parameters for `faces/recognize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizeRequest {
    /// Comma-joined namespaced ids of the users to match against.
    pub uids: String,
    /// Photo URLs to scan.
    pub urls: Vec<String>,
    /// Detector, attribute and limit options, merged with caller overrides.
    pub options: VendorOptions,
}

/// Parameters for `tags/remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveTagsRequest {
    /// Persistent tag ids to delete.
    pub tids: Vec<PersistentTagId>,
}

impl DetectRequest {
    /// Flatten into form parameters. `urls` cannot be overridden by options.
    pub(crate) fn params(&self) -> VendorOptions {
        self.options.clone().with("urls", self.urls.join(","))
    }
}

impl SaveTagsRequest {
    pub(crate) fn params(&self) -> VendorOptions {
        VendorOptions::new()
            .with("uid", self.uid.as_str())
            .with("tids", join_ids(self.tids.iter().map(TemporaryTagId::as_str)))
    }
}

impl TrainRequest {
    pub(crate) fn params(&self) -> VendorOptions {
        VendorOptions::new().with("uids", self.uids.as_str())
    }
}

impl RecognizeRequest {
    pub(crate) fn params(&self) -> VendorOptions {
        self.options
            .clone()
            .with("uids", self.uids.as_str())
            .with("urls", self.urls.join(","))
    }
}

impl RemoveTagsRequest {
    pub(crate) fn params(&self) -> VendorOptions {
        VendorOptions::new().with("tids", join_ids(self.tids.iter().map(PersistentTagId::as_str)))
    }
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join(",")
}

// =============================================================================
// Response Types
// =============================================================================

/// Failure envelope shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiFailure {
    /// `failure` on error.
    pub status: String,
    /// Vendor error code.
    #[serde(default)]
    pub error_code: i64,
    /// Vendor error message.
    #[serde(default)]
    pub error_message: String,
}

/// Response from `faces/detect` and `faces/recognize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotosResponse {
    /// Call status (`success`).
    #[serde(default)]
    pub status: String,
    /// One entry per scanned photo.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// A scanned photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Source URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Vendor photo id.
    #[serde(default)]
    pub pid: Option<String>,
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Detected faces.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A face detected in a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Temporary tag id, usable with `tags/save`.
    pub tid: TemporaryTagId,
    /// Whether the face is good enough to be recognized.
    #[serde(default)]
    pub recognizable: Option<bool>,
    /// Recognition candidates, best first. Empty for detect calls.
    #[serde(default)]
    pub uids: Vec<Candidate>,
}

/// A user the face may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Namespaced user id.
    pub uid: NamespacedId,
    /// Match confidence.
    pub confidence: Confidence,
}

/// Response from `tags/save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTagsResponse {
    /// Call status.
    #[serde(default)]
    pub status: String,
    /// Tags that were persisted.
    #[serde(default)]
    pub saved_tags: Vec<SavedTag>,
    /// Human readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// A temporary tag turned persistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTag {
    /// The temporary id that was saved.
    #[serde(default)]
    pub detected_tid: Option<TemporaryTagId>,
    /// The new persistent id.
    pub tid: PersistentTagId,
}

/// Response from `faces/train`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainResponse {
    /// Call status.
    #[serde(default)]
    pub status: String,
    /// Users whose model was created.
    #[serde(default)]
    pub created: Vec<TrainedUser>,
    /// Users whose model was updated.
    #[serde(default)]
    pub updated: Vec<TrainedUser>,
    /// Users whose model did not change.
    #[serde(default)]
    pub unchanged: Vec<TrainedUser>,
    /// Users with no saved tags to train from.
    #[serde(default)]
    pub no_training_set: Vec<TrainedUser>,
}

/// Training state of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainedUser {
    /// Namespaced user id.
    pub uid: NamespacedId,
    /// Number of tags in the training set.
    #[serde(default)]
    pub training_set_size: Option<u32>,
    /// Unix time of the last training run.
    #[serde(default)]
    pub last_trained: Option<i64>,
    /// Whether training is still running.
    #[serde(default)]
    pub training_in_progress: Option<bool>,
}

/// Response from `tags/remove`.
///
/// Handed back to callers as received, so fields not modelled here are kept
/// in `extra` and serialized again unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveTagsResponse {
    /// Call status.
    #[serde(default)]
    pub status: String,
    /// Tags that were deleted.
    #[serde(default)]
    pub removed_tags: Vec<RemovedTag>,
    /// Human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Any other fields, such as `usage`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A deleted tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedTag {
    /// Id as passed to the call.
    pub removed_tid: PersistentTagId,
    /// Id as stored by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tid: Option<PersistentTagId>,
    /// Any other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
