//! Scriptable `FaceApi` double for workflow tests.

use super::types::*;
use super::FaceApi;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted responses plus call counters.
///
/// `detect_*` returns `faces_per_image` faces (or fails for paths listed in
/// `failing_paths`), `identify_*` answers one face carrying `candidates`,
/// `get_session` pops statuses from a queue, and `detect_file` can be slowed
/// down to exercise concurrency limits.
#[derive(Default)]
pub struct MockApi {
    pub faces_per_image: usize,
    pub add_face_success: bool,
    pub failing_paths: Vec<String>,
    pub candidates: Vec<Candidate>,
    pub statuses: Mutex<VecDeque<String>>,
    pub delay: Option<Duration>,

    pub detect_calls: AtomicU32,
    pub add_face_calls: AtomicU32,
    pub identify_calls: AtomicU32,
    pub session_calls: AtomicU32,
    pub in_flight: Arc<AtomicU32>,
    pub max_in_flight: Arc<AtomicU32>,
}

impl MockApi {
    /// Every image holds `faces` faces and add-face succeeds.
    pub fn with_faces(faces: usize) -> Self {
        Self {
            faces_per_image: faces,
            add_face_success: true,
            ..Self::default()
        }
    }

    pub fn with_statuses(statuses: &[&str]) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Identify answers with these candidates, in this order.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn detection(&self) -> Detection {
        Detection {
            session_id: "detect-session".to_string(),
            face: (0..self.faces_per_image)
                .map(|i| DetectedFace {
                    face_id: format!("face-{i}"),
                    tag: String::new(),
                })
                .collect(),
            ..Detection::default()
        }
    }

    fn identification(&self) -> Identification {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        Identification {
            session_id: "identify-session".to_string(),
            face: vec![IdentifiedFace {
                face_id: "face-0".to_string(),
                candidate: self.candidates.clone(),
            }],
        }
    }

    async fn tracked<T>(&self, result: T) -> T {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn status_error(operation: &str, status: u16) -> ApiError {
    ApiError::Status {
        operation: operation.to_string(),
        status,
    }
}

#[async_trait]
impl FaceApi for MockApi {
    async fn person_create(&self, request: &PersonCreate) -> ApiResult<PersonCreated> {
        Ok(PersonCreated {
            person_name: request.person_name.clone().unwrap_or_default(),
            tag: request.tag.clone().unwrap_or_default(),
            ..PersonCreated::default()
        })
    }

    async fn person_add_face(&self, _person_name: &str, _face_id: &str) -> ApiResult<FacesAdded> {
        self.add_face_calls.fetch_add(1, Ordering::SeqCst);
        Ok(FacesAdded {
            added: u32::from(self.add_face_success),
            success: self.add_face_success,
        })
    }

    async fn detect_url(&self, url: &str, _options: &DetectOptions) -> ApiResult<Detection> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_paths.iter().any(|p| p == url) {
            return Err(status_error("/detection/detect", 500));
        }
        Ok(self.detection())
    }

    async fn detect_file(&self, path: &Path, _options: &DetectOptions) -> ApiResult<Detection> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_paths
            .iter()
            .any(|p| path.to_string_lossy().ends_with(p.as_str()));
        let result = if failing {
            Err(status_error("/detection/detect", 500))
        } else {
            Ok(self.detection())
        };
        self.tracked(result).await
    }

    async fn identify_url(
        &self,
        _group_name: &str,
        _url: &str,
        _options: &IdentifyOptions,
    ) -> ApiResult<Identification> {
        Ok(self.identification())
    }

    async fn identify_file(
        &self,
        _group_name: &str,
        path: &Path,
        _options: &IdentifyOptions,
    ) -> ApiResult<Identification> {
        let failing = self
            .failing_paths
            .iter()
            .any(|p| path.to_string_lossy().ends_with(p.as_str()));
        if failing {
            return Err(status_error("/recognition/identify", 500));
        }
        Ok(self.identification())
    }

    async fn group_create(&self, request: &GroupCreate) -> ApiResult<GroupCreated> {
        Ok(GroupCreated {
            group_name: request.group_name.clone(),
            ..GroupCreated::default()
        })
    }

    async fn train_identify(&self, _group_name: &str) -> ApiResult<TrainStarted> {
        Ok(TrainStarted {
            session_id: "train-1".to_string(),
        })
    }

    async fn get_session(&self, session_id: &str) -> ApiResult<SessionInfo> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        let status = self
            .statuses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());
        match status {
            Some(status) => Ok(SessionInfo {
                session_id: session_id.to_string(),
                status,
                ..SessionInfo::default()
            }),
            None => Err(status_error("/info/get_session", 503)),
        }
    }

    async fn person_list(&self) -> ApiResult<PersonList> {
        Ok(PersonList::default())
    }
}
