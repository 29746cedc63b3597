//! Client for the face detection and recognition web API.
//!
//! `FaceApi` is the seam the workflows are written against; `FaceppClient`
//! is the HTTP implementation. Each operation has its own typed response.

pub(crate) mod client;
pub(crate) mod params;
pub(crate) mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use client::{FaceppClient, MAX_UPLOAD_BYTES};
pub use params::FormParams;
pub use types::*;

use crate::error::ApiResult;
use async_trait::async_trait;
use std::path::Path;

/// Remote operations used by the commands.
///
/// Uses `async_trait` so workflows can hold an `Arc<dyn FaceApi>` and be
/// driven by a test double.
#[async_trait]
pub trait FaceApi: Send + Sync {
    async fn person_create(&self, request: &PersonCreate) -> ApiResult<PersonCreated>;

    async fn person_add_face(&self, person_name: &str, face_id: &str) -> ApiResult<FacesAdded>;

    async fn detect_url(&self, url: &str, options: &DetectOptions) -> ApiResult<Detection>;

    async fn detect_file(&self, path: &Path, options: &DetectOptions) -> ApiResult<Detection>;

    async fn identify_url(
        &self,
        group_name: &str,
        url: &str,
        options: &IdentifyOptions,
    ) -> ApiResult<Identification>;

    async fn identify_file(
        &self,
        group_name: &str,
        path: &Path,
        options: &IdentifyOptions,
    ) -> ApiResult<Identification>;

    async fn group_create(&self, request: &GroupCreate) -> ApiResult<GroupCreated>;

    async fn train_identify(&self, group_name: &str) -> ApiResult<TrainStarted>;

    async fn get_session(&self, session_id: &str) -> ApiResult<SessionInfo>;

    async fn person_list(&self) -> ApiResult<PersonList>;
}
