//! HTTP implementation of `FaceApi`.
//!
//! Every call is a POST to `<base url><operation>`, either form-encoded or
//! multipart with the image in the `img` field. The credential pair is
//! attached to every request.

use super::params::FormParams;
use super::types::*;
use super::FaceApi;
use crate::config::FaceppConfig;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Uploads at or above this size are rejected before any request is made.
pub const MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024;

const USER_AGENT: &str = concat!("facectl/", env!("CARGO_PKG_VERSION"));

/// Face++ style API client.
pub struct FaceppClient {
    base_url: String,
    api_key: String,
    api_secret: String,
    client: reqwest::Client,
}

impl FaceppClient {
    pub fn new(base_url: &str, api_key: &str, api_secret: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from the `[faceplusplus]` settings.
    pub fn from_config(config: &FaceppConfig) -> Self {
        Self::new(config.api_url(), config.api_key(), config.api_secret())
    }

    fn url(&self, operation: &str) -> String {
        format!("{}{}", self.base_url, operation)
    }

    /// Form-encoded call.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: FormParams,
    ) -> ApiResult<T> {
        let params = params.with_credentials(&self.api_key, &self.api_secret);
        tracing::debug!("POST {operation} ({} fields)", params.len());

        let fields: Vec<(String, String)> = params.into_iter().collect();
        let resp = self
            .client
            .post(self.url(operation))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&fields)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                operation: operation.to_string(),
                source,
            })?;

        decode_response(operation, resp).await
    }

    /// Multipart call carrying the image at `path`.
    pub async fn execute_upload<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: FormParams,
        path: &Path,
    ) -> ApiResult<T> {
        let file_error = |source| ApiError::File {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::open(path).await.map_err(file_error)?;
        let size = file.metadata().await.map_err(file_error)?.len();
        if size >= MAX_UPLOAD_BYTES {
            return Err(ApiError::FileTooLarge {
                path: path.to_path_buf(),
                size,
            });
        }

        let mut image = Vec::with_capacity(size as usize);
        file.read_to_end(&mut image).await.map_err(file_error)?;

        let image_part = Part::bytes(image)
            .file_name(path.display().to_string())
            .mime_str(mime_for(path))
            .map_err(|e| ApiError::Multipart {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let params = params.with_credentials(&self.api_key, &self.api_secret);
        tracing::debug!(
            "POST {operation} with {} ({size} bytes, {} fields)",
            path.display(),
            params.len()
        );

        let form = params
            .into_iter()
            .fold(Form::new().part("img", image_part), |form, (key, value)| {
                form.text(key, value)
            });

        let resp = self
            .client
            .post(self.url(operation))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                operation: operation.to_string(),
                source,
            })?;

        decode_response(operation, resp).await
    }
}

/// Require a 200 and decode the JSON body.
async fn decode_response<T: DeserializeOwned>(
    operation: &str,
    resp: reqwest::Response,
) -> ApiResult<T> {
    let status = resp.status();
    if status != StatusCode::OK {
        tracing::debug!("{operation} answered HTTP {status}");
        return Err(ApiError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await.map_err(|source| ApiError::Transport {
        operation: operation.to_string(),
        source,
    })?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl FaceApi for FaceppClient {
    async fn person_create(&self, request: &PersonCreate) -> ApiResult<PersonCreated> {
        let params = FormParams::new()
            .optional("person_name", request.person_name.as_deref())
            .optional("face_id", request.face_id.as_deref())
            .optional("tag", request.tag.as_deref())
            .optional("group_name", request.group_name.as_deref());
        self.execute("/person/create", params).await
    }

    async fn person_add_face(&self, person_name: &str, face_id: &str) -> ApiResult<FacesAdded> {
        let params = FormParams::new()
            .required("person_name", person_name)
            .required("face_id", face_id);
        self.execute("/person/add_face", params).await
    }

    async fn detect_url(&self, url: &str, options: &DetectOptions) -> ApiResult<Detection> {
        let params = FormParams::new()
            .required("url", url)
            .optional("mode", options.mode.as_deref())
            .optional("tag", options.tag.as_deref());
        self.execute("/detection/detect", params).await
    }

    async fn detect_file(&self, path: &Path, options: &DetectOptions) -> ApiResult<Detection> {
        // Faces from a file are tagged with their source path unless told otherwise.
        let default_tag = path.display().to_string();
        let tag = options
            .tag
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&default_tag);
        let params = FormParams::new()
            .optional("mode", options.mode.as_deref())
            .required("tag", tag);
        self.execute_upload("/detection/detect", params, path).await
    }

    async fn identify_url(
        &self,
        group_name: &str,
        url: &str,
        options: &IdentifyOptions,
    ) -> ApiResult<Identification> {
        let params = FormParams::new()
            .required("group_name", group_name)
            .optional("url", Some(url))
            .optional("mode", options.mode.as_deref())
            .optional("key_face_id", options.key_face_id.as_deref());
        self.execute("/recognition/identify", params).await
    }

    async fn identify_file(
        &self,
        group_name: &str,
        path: &Path,
        options: &IdentifyOptions,
    ) -> ApiResult<Identification> {
        let params = FormParams::new()
            .required("group_name", group_name)
            .optional("mode", options.mode.as_deref())
            .optional("key_face_id", options.key_face_id.as_deref());
        self.execute_upload("/recognition/identify", params, path)
            .await
    }

    async fn group_create(&self, request: &GroupCreate) -> ApiResult<GroupCreated> {
        let params = FormParams::new()
            .required("group_name", &request.group_name)
            .optional("tag", request.tag.as_deref())
            .optional("person_name", request.person_name.as_deref());
        self.execute("/group/create", params).await
    }

    async fn train_identify(&self, group_name: &str) -> ApiResult<TrainStarted> {
        let params = FormParams::new().required("group_name", group_name);
        self.execute("/train/identify", params).await
    }

    async fn get_session(&self, session_id: &str) -> ApiResult<SessionInfo> {
        let params = FormParams::new().required("session_id", session_id);
        self.execute("/info/get_session", params).await
    }

    async fn person_list(&self) -> ApiResult<PersonList> {
        self.execute("/info/get_person_list", FormParams::new())
            .await
    }
}
