//! Integration tests for biometric login.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p biometric-login-integration-tests
//! ```
//!
//! Set `RUST_LOG=debug` to see pipeline progress in test output.
//!
//! # Fixtures
//!
//! [`ScriptedFaceApi`] stands in for the SkyBiometry API. Each endpoint
//! replays queued JSON bodies in order, shaped exactly like the real API's
//! responses, and every request is recorded for later assertions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use biometric_login::skybiometry::{
    DetectRequest, FaceRecognitionApi, PhotosResponse, RecognizeRequest, RemoveTagsRequest,
    RemoveTagsResponse, SaveTagsRequest, SaveTagsResponse, SkyBiometryError, TrainRequest,
    TrainResponse,
};
use biometric_login::{BiometricLogin, LoginOptions};
use biometric_login_core::Namespace;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Namespace used by every fixture adapter.
pub const TEST_NAMESPACE: &str = "my-namespace";

/// A face API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `faces/detect`
    Detect,
    /// `tags/save`
    SaveTags,
    /// `faces/train`
    Train,
    /// `faces/recognize`
    Recognize,
    /// `tags/remove`
    RemoveTags,
}

impl Endpoint {
    const fn path(self) -> &'static str {
        match self {
            Self::Detect => "faces/detect",
            Self::SaveTags => "tags/save",
            Self::Train => "faces/train",
            Self::Recognize => "faces/recognize",
            Self::RemoveTags => "tags/remove",
        }
    }
}

/// A request received by [`ScriptedFaceApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `faces/detect`
    Detect(DetectRequest),
    /// `tags/save`
    SaveTags(SaveTagsRequest),
    /// `faces/train`
    Train(TrainRequest),
    /// `faces/recognize`
    Recognize(RecognizeRequest),
    /// `tags/remove`
    RemoveTags(RemoveTagsRequest),
}

impl Call {
    /// The endpoint this call went to.
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Detect(_) => Endpoint::Detect,
            Self::SaveTags(_) => Endpoint::SaveTags,
            Self::Train(_) => Endpoint::Train,
            Self::Recognize(_) => Endpoint::Recognize,
            Self::RemoveTags(_) => Endpoint::RemoveTags,
        }
    }
}

type Reply = Result<Value, SkyBiometryError>;

#[derive(Debug, Default)]
struct Script {
    replies: Vec<(Endpoint, VecDeque<Reply>)>,
    calls: Vec<Call>,
}

/// In-memory face API replaying scripted responses.
///
/// An endpoint with nothing queued answers with HTTP 404, so an unexpected
/// call fails the pipeline instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedFaceApi {
    script: Mutex<Script>,
}

impl ScriptedFaceApi {
    /// Create a fixture with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON body for an endpoint.
    #[must_use]
    pub fn reply(self, endpoint: Endpoint, body: Value) -> Self {
        self.push(endpoint, Ok(body));
        self
    }

    /// Queue an error for an endpoint.
    #[must_use]
    pub fn fail(self, endpoint: Endpoint, error: SkyBiometryError) -> Self {
        self.push(endpoint, Err(error));
        self
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Endpoints called so far, in order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.lock().calls.iter().map(Call::endpoint).collect()
    }

    fn push(&self, endpoint: Endpoint, reply: Reply) {
        let mut script = self.lock();
        if let Some((_, queue)) = script.replies.iter_mut().find(|(e, _)| *e == endpoint) {
            queue.push_back(reply);
        } else {
            script.replies.push((endpoint, VecDeque::from([reply])));
        }
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer<T: DeserializeOwned>(&self, call: Call) -> Result<T, SkyBiometryError> {
        let endpoint = call.endpoint();
        let mut script = self.lock();
        script.calls.push(call);

        let reply = script
            .replies
            .iter_mut()
            .find(|(e, _)| *e == endpoint)
            .and_then(|(_, queue)| queue.pop_front())
            .unwrap_or_else(|| {
                Err(SkyBiometryError::Status {
                    status: 404,
                    body: format!("no scripted response for {}", endpoint.path()),
                })
            })?;

        serde_json::from_value(reply).map_err(|e| SkyBiometryError::Parse(e.to_string()))
    }
}

#[async_trait]
impl FaceRecognitionApi for ScriptedFaceApi {
    async fn detect_faces(
        &self,
        request: &DetectRequest,
    ) -> Result<PhotosResponse, SkyBiometryError> {
        self.answer(Call::Detect(request.clone()))
    }

    async fn save_tags(
        &self,
        request: &SaveTagsRequest,
    ) -> Result<SaveTagsResponse, SkyBiometryError> {
        self.answer(Call::SaveTags(request.clone()))
    }

    async fn train_faces(&self, request: &TrainRequest) -> Result<TrainResponse, SkyBiometryError> {
        self.answer(Call::Train(request.clone()))
    }

    async fn recognize_faces(
        &self,
        request: &RecognizeRequest,
    ) -> Result<PhotosResponse, SkyBiometryError> {
        self.answer(Call::Recognize(request.clone()))
    }

    async fn remove_tags(
        &self,
        request: &RemoveTagsRequest,
    ) -> Result<RemoveTagsResponse, SkyBiometryError> {
        self.answer(Call::RemoveTags(request.clone()))
    }
}

/// Build an adapter over a shared fixture in [`TEST_NAMESPACE`].
///
/// Diagnostics are enabled so progress shows up under `RUST_LOG`.
///
/// # Panics
///
/// Panics if [`TEST_NAMESPACE`] is not a valid namespace.
#[must_use]
pub fn login_with(api: &Arc<ScriptedFaceApi>) -> BiometricLogin<Arc<ScriptedFaceApi>> {
    init_tracing();
    let namespace = Namespace::new(TEST_NAMESPACE).expect("test namespace is valid");
    BiometricLogin::new(Arc::clone(api), namespace, LoginOptions::debug())
}

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
