//! SkyBiometry face API client.
//!
//! Every endpoint is a form-encoded POST carrying the API credentials, and
//! every response is a JSON object with a `status` field. A `failure` status
//! is turned into [`SkyBiometryError::Api`] before the body is parsed into
//! the endpoint's response type.

use std::sync::Arc;

use async_trait::async_trait;
use biometric_login_core::VendorOptions;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use crate::config::SkyBiometryConfig;

use super::api::FaceRecognitionApi;
use super::error::SkyBiometryError;
use super::types::{
    ApiFailure, DetectRequest, PhotosResponse, RecognizeRequest, RemoveTagsRequest,
    RemoveTagsResponse, SaveTagsRequest, SaveTagsResponse, TrainRequest, TrainResponse,
};

/// Default retry delay when a 429 carries no `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// SkyBiometry API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct SkyBiometryClient {
    inner: Arc<SkyBiometryClientInner>,
}

struct SkyBiometryClientInner {
    client: reqwest::Client,
    config: SkyBiometryConfig,
}

impl std::fmt::Debug for SkyBiometryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkyBiometryClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SkyBiometryClient {
    /// Create a new SkyBiometry client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: SkyBiometryConfig) -> Result<Self, SkyBiometryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SkyBiometryError::Config(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(SkyBiometryClientInner { client, config }),
        })
    }

    /// URL of an endpoint such as `faces/detect`.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}",
            self.inner.config.base_url.as_str().trim_end_matches('/')
        )
    }

    /// POST a call and parse its JSON response.
    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &VendorOptions,
    ) -> Result<T, SkyBiometryError> {
        let config = &self.inner.config;
        let mut form: Vec<(&str, &str)> = vec![
            ("api_key", config.api_key.expose_secret()),
            ("api_secret", config.api_secret.expose_secret()),
            ("format", "json"),
        ];
        form.extend(params.iter());

        let response = self
            .inner
            .client
            .post(self.endpoint(path))
            .form(&form)
            .send()
            .await?;

        let result = Self::handle_response(response).await;
        match &result {
            Ok(_) => debug!(path, "SkyBiometry call succeeded"),
            Err(e) => error!(path, error = %e, "SkyBiometry call failed"),
        }
        result
    }

    /// Read the body and map the reply to a result.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SkyBiometryError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        map_response(status, &headers, &body)
    }
}

/// Map HTTP status and the `status: failure` envelope to errors.
///
/// Rate limiting and auth statuses win over the body. Any other reply that
/// carries the failure envelope becomes [`SkyBiometryError::Api`], whatever
/// its status.
fn map_response<T: DeserializeOwned>(
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
) -> Result<T, SkyBiometryError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(SkyBiometryError::RateLimited(retry_after));
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SkyBiometryError::Unauthorized);
    }

    if let Some(failure) = api_failure(body) {
        return Err(failure);
    }

    if !status.is_success() {
        return Err(SkyBiometryError::Status {
            status: status.as_u16(),
            body: body.to_owned(),
        });
    }

    serde_json::from_str(body)
        .map_err(|e| SkyBiometryError::Parse(format!("Failed to parse response: {e}")))
}

/// The `status: failure` envelope as an error, if the body is one.
fn api_failure(body: &str) -> Option<SkyBiometryError> {
    serde_json::from_str::<ApiFailure>(body)
        .ok()
        .filter(|failure| failure.status == "failure")
        .map(|failure| SkyBiometryError::Api {
            code: failure.error_code,
            message: failure.error_message,
        })
}

#[async_trait]
impl FaceRecognitionApi for SkyBiometryClient {
    #[instrument(skip(self, request), fields(urls = request.urls.len()))]
    async fn detect_faces(
        &self,
        request: &DetectRequest,
    ) -> Result<PhotosResponse, SkyBiometryError> {
        self.call("faces/detect", &request.params()).await
    }

    #[instrument(skip(self, request), fields(uid = %request.uid))]
    async fn save_tags(
        &self,
        request: &SaveTagsRequest,
    ) -> Result<SaveTagsResponse, SkyBiometryError> {
        self.call("tags/save", &request.params()).await
    }

    #[instrument(skip(self, request), fields(uids = %request.uids))]
    async fn train_faces(&self, request: &TrainRequest) -> Result<TrainResponse, SkyBiometryError> {
        self.call("faces/train", &request.params()).await
    }

    #[instrument(skip(self, request), fields(uids = %request.uids))]
    async fn recognize_faces(
        &self,
        request: &RecognizeRequest,
    ) -> Result<PhotosResponse, SkyBiometryError> {
        self.call("faces/recognize", &request.params()).await
    }

    #[instrument(skip(self))]
    async fn remove_tags(
        &self,
        request: &RemoveTagsRequest,
    ) -> Result<RemoveTagsResponse, SkyBiometryError> {
        self.call("tags/remove", &request.params()).await
    }
}
