//! Face registration and photo login pipelines.
//!
//! [`BiometricLogin`] sequences face API calls:
//!
//! # Flow
//!
//! Registration:
//! 1. Detect faces in the user's photo, take the first face's temporary tag
//! 2. Save that tag against the user's namespaced id
//! 3. Train the user's face model
//!
//! Authentication:
//! 1. Recognize faces in a photo against a list of candidate users
//! 2. Accept the best candidate if its confidence reaches the threshold
//!
//! Each stage starts only after the previous one succeeded; the first
//! failure is returned as is.

mod error;

pub use error::LoginError;

use biometric_login_core::{
    Confidence, Namespace, NamespacedId, PersistentTagId, TemporaryTagId, UserId, VendorOptions,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{LoginConfig, LoginOptions};
use crate::skybiometry::{
    DetectRequest, FaceRecognitionApi, PhotosResponse, RecognizeRequest, RemoveTagsRequest,
    RemoveTagsResponse, SaveTagsRequest, SkyBiometryClient, SkyBiometryError, Tag, TrainRequest,
};

/// Detector mode used for every detect and recognize call.
const DETECTOR: &str = "aggressive";
/// Face attributes requested; none are needed for login.
const ATTRIBUTES: &str = "none";
/// Candidates requested per recognized face.
const RECOGNIZE_LIMIT: &str = "1";

/// Outcome of a face registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Training status reported by the face API.
    pub status: String,
    /// Persistent id of the saved face tag; pass it to
    /// [`BiometricLogin::remove_face_for_user`] to unregister.
    pub tag_id: PersistentTagId,
}

/// A user recognized in a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationResult {
    /// The matched user, without namespace.
    pub uid: UserId,
    /// Match confidence.
    pub confidence: Confidence,
    /// Temporary tag of the recognized face, for
    /// [`BiometricLogin::reinforce_face_for_user`].
    pub temporary_tag_id: TemporaryTagId,
}

/// Registers and authenticates users by face through a face recognition API.
///
/// Holds no per-call state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct BiometricLogin<A> {
    api: A,
    namespace: Namespace,
    options: LoginOptions,
}

impl BiometricLogin<SkyBiometryClient> {
    /// Build an adapter backed by the SkyBiometry HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: LoginConfig) -> Result<Self, SkyBiometryError> {
        let api = SkyBiometryClient::new(config.skybiometry)?;
        Ok(Self::new(api, config.namespace, config.options))
    }
}

impl<A: FaceRecognitionApi> BiometricLogin<A> {
    /// Create a new adapter.
    #[must_use]
    pub const fn new(api: A, namespace: Namespace, options: LoginOptions) -> Self {
        Self {
            api,
            namespace,
            options,
        }
    }

    /// The namespace user ids are qualified with.
    #[must_use]
    pub const fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The face API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// `"<uid>@<namespace>"`.
    #[must_use]
    pub fn namespaced_identifier_for(&self, uid: &UserId) -> NamespacedId {
        self.namespace.qualify(uid)
    }

    /// The user id before the first `@`.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::MalformedNamespacedIdentifier`] if there is no `@`.
    pub fn user_identifier_from_namespaced(&self, namespaced: &str) -> Result<UserId, LoginError> {
        Ok(NamespacedId::new(namespaced).user_id()?)
    }

    /// Comma-joined namespaced ids for multi-user face API queries.
    #[must_use]
    pub fn namespaced_list_for(&self, uids: &[UserId]) -> String {
        self.namespace.qualify_list(uids)
    }

    /// Register the first face found in `photo_url` for `uid`.
    ///
    /// `extra_options` override the default detect parameters.
    ///
    /// # Errors
    ///
    /// - [`LoginError::NoPictureFound`] / [`LoginError::NoFacesDetected`] if
    ///   detection finds nothing usable
    /// - [`LoginError::NoSavedTag`] if the save call confirms no tag
    /// - [`LoginError::Vendor`] if any face API call fails
    #[instrument(skip_all, fields(uid = %uid))]
    pub async fn register_face_for_user(
        &self,
        uid: &UserId,
        photo_url: &str,
        extra_options: &VendorOptions,
    ) -> Result<Registration, LoginError> {
        let namespaced = self.namespaced_identifier_for(uid);

        self.progress("Detecting face");
        let detected = self
            .api
            .detect_faces(&DetectRequest {
                urls: vec![photo_url.to_owned()],
                options: detect_defaults().merged(extra_options),
            })
            .await?;
        let tag = first_tag(&detected)?;

        self.save_and_train(namespaced, tag.tid.clone()).await
    }

    /// Identify which of `candidate_uids` appears in `photo_urls`.
    ///
    /// `extra_options` override the default recognize parameters. The face
    /// API's first candidate is taken as the best match.
    ///
    /// # Errors
    ///
    /// - [`LoginError::NoPictureFound`] / [`LoginError::NoFacesDetected`] /
    ///   [`LoginError::NoCandidatesFound`] for empty recognition results
    /// - [`LoginError::ConfidenceBelowThreshold`] if the best match is too weak
    /// - [`LoginError::MalformedNamespacedIdentifier`] if the match has no namespace
    /// - [`LoginError::Vendor`] if the face API call fails
    #[instrument(skip_all, fields(candidates = candidate_uids.len(), threshold = %threshold))]
    pub async fn authenticate_user_by_photo(
        &self,
        candidate_uids: &[UserId],
        photo_urls: &[String],
        threshold: Confidence,
        extra_options: &VendorOptions,
    ) -> Result<AuthenticationResult, LoginError> {
        let uids = self.namespaced_list_for(candidate_uids);

        if self.options.debug {
            info!(uids = %uids, "Recognizing faces");
        }
        let recognized = self
            .api
            .recognize_faces(&RecognizeRequest {
                uids,
                urls: photo_urls.to_vec(),
                options: recognize_defaults().merged(extra_options),
            })
            .await?;
        let tag = first_tag(&recognized)?;

        let best = tag.uids.first().ok_or(LoginError::NoCandidatesFound)?;
        if self.options.debug {
            info!(uid = %best.uid, confidence = %best.confidence, "Best candidate");
        }

        let uid = best.uid.user_id()?;
        if !best.confidence.meets(threshold) {
            return Err(LoginError::ConfidenceBelowThreshold {
                confidence: best.confidence,
                threshold,
            });
        }

        Ok(AuthenticationResult {
            uid,
            confidence: best.confidence,
            temporary_tag_id: tag.tid.clone(),
        })
    }

    /// Delete a registered face tag.
    ///
    /// The face API's response is returned unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Vendor`] if the face API call fails.
    #[instrument(skip_all, fields(tag_id = %tag_id))]
    pub async fn remove_face_for_user(
        &self,
        tag_id: &PersistentTagId,
    ) -> Result<RemoveTagsResponse, LoginError> {
        Ok(self
            .api
            .remove_tags(&RemoveTagsRequest {
                tids: vec![tag_id.clone()],
            })
            .await?)
    }

    /// Add the face from a successful authentication to the winner's
    /// training set and retrain.
    ///
    /// Not part of [`BiometricLogin::authenticate_user_by_photo`]; callers
    /// opt in after accepting a login.
    ///
    /// # Errors
    ///
    /// Same as the save and train stages of
    /// [`BiometricLogin::register_face_for_user`].
    #[instrument(skip_all, fields(uid = %result.uid))]
    pub async fn reinforce_face_for_user(
        &self,
        result: &AuthenticationResult,
    ) -> Result<Registration, LoginError> {
        let namespaced = self.namespaced_identifier_for(&result.uid);
        self.save_and_train(namespaced, result.temporary_tag_id.clone())
            .await
    }

    /// Save a temporary tag against a user, then train that user.
    async fn save_and_train(
        &self,
        namespaced: NamespacedId,
        tid: TemporaryTagId,
    ) -> Result<Registration, LoginError> {
        let saved = self
            .api
            .save_tags(&SaveTagsRequest {
                uid: namespaced.clone(),
                tids: vec![tid],
            })
            .await?;
        let tag_id = saved
            .saved_tags
            .into_iter()
            .next()
            .map(|t| t.tid)
            .ok_or(LoginError::NoSavedTag)?;

        self.progress("Training user");
        let trained = self
            .api
            .train_faces(&TrainRequest { uids: namespaced })
            .await?;

        Ok(Registration {
            status: trained.status,
            tag_id,
        })
    }

    fn progress(&self, message: &str) {
        if self.options.debug {
            info!(namespace = %self.namespace, "{message}");
        }
    }
}

fn detect_defaults() -> VendorOptions {
    VendorOptions::new()
        .with("detector", DETECTOR)
        .with("attributes", ATTRIBUTES)
}

fn recognize_defaults() -> VendorOptions {
    detect_defaults().with("limit", RECOGNIZE_LIMIT)
}

/// First tag of the first photo.
fn first_tag(response: &PhotosResponse) -> Result<&Tag, LoginError> {
    let photo = response.photos.first().ok_or(LoginError::NoPictureFound)?;
    photo.tags.first().ok_or(LoginError::NoFacesDetected)
}
