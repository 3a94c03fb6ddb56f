//! The face API capability the login pipelines are written against.

use async_trait::async_trait;

use super::error::SkyBiometryError;
use super::types::{
    DetectRequest, PhotosResponse, RecognizeRequest, RemoveTagsRequest, RemoveTagsResponse,
    SaveTagsRequest, SaveTagsResponse, TrainRequest, TrainResponse,
};

/// Face detection, tagging, training and recognition calls.
///
/// [`SkyBiometryClient`](super::SkyBiometryClient) implements this over HTTP.
/// Tests substitute scripted implementations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FaceRecognitionApi: Send + Sync {
    /// Detect faces in photos, returning temporary tags.
    async fn detect_faces(
        &self,
        request: &DetectRequest,
    ) -> Result<PhotosResponse, SkyBiometryError>;

    /// Persist temporary tags against a user.
    async fn save_tags(
        &self,
        request: &SaveTagsRequest,
    ) -> Result<SaveTagsResponse, SkyBiometryError>;

    /// Rebuild a user's face model from their saved tags.
    async fn train_faces(&self, request: &TrainRequest) -> Result<TrainResponse, SkyBiometryError>;

    /// Detect faces and match them against trained users.
    async fn recognize_faces(
        &self,
        request: &RecognizeRequest,
    ) -> Result<PhotosResponse, SkyBiometryError>;

    /// Delete saved tags.
    async fn remove_tags(
        &self,
        request: &RemoveTagsRequest,
    ) -> Result<RemoveTagsResponse, SkyBiometryError>;
}

#[async_trait]
impl<T: FaceRecognitionApi + ?Sized> FaceRecognitionApi for std::sync::Arc<T> {
    async fn detect_faces(
        &self,
        request: &DetectRequest,
    ) -> Result<PhotosResponse, SkyBiometryError> {
        (**self).detect_faces(request).await
    }

    async fn save_tags(
        &self,
        request: &SaveTagsRequest,
    ) -> Result<SaveTagsResponse, SkyBiometryError> {
        (**self).save_tags(request).await
    }

    async fn train_faces(&self, request: &TrainRequest) -> Result<TrainResponse, SkyBiometryError> {
        (**self).train_faces(request).await
    }

    async fn recognize_faces(
        &self,
        request: &RecognizeRequest,
    ) -> Result<PhotosResponse, SkyBiometryError> {
        (**self).recognize_faces(request).await
    }

    async fn remove_tags(
        &self,
        request: &RemoveTagsRequest,
    ) -> Result<RemoveTagsResponse, SkyBiometryError> {
        (**self).remove_tags(request).await
    }
}
