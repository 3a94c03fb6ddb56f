//! SkyBiometry face API integration.
//!
//! This module provides:
//! - [`FaceRecognitionApi`], the capability the login pipelines depend on
//! - [`SkyBiometryClient`], its HTTP implementation
//! - Request and response types for the five endpoints used
//!
//! # API Reference
//!
//! - Base URL: `https://api.skybiometry.com/fc`
//! - Authentication: `api_key` and `api_secret` form parameters on every call
//! - Endpoints: `faces/detect`, `tags/save`, `faces/train`, `faces/recognize`,
//!   `tags/remove`

mod api;
mod client;
mod error;
mod types;

#[cfg(test)]
pub use api::MockFaceRecognitionApi;
pub use api::FaceRecognitionApi;
pub use client::SkyBiometryClient;
pub use error::SkyBiometryError;
pub use types::{
    Candidate, DetectRequest, Photo, PhotosResponse, RecognizeRequest, RemoveTagsRequest,
    RemoveTagsResponse, RemovedTag, SaveTagsRequest, SaveTagsResponse, SavedTag, Tag,
    TrainRequest, TrainResponse, TrainedUser,
};
