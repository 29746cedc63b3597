//! Request options and response shapes for each remote operation.
//!
//! Every response field is defaulted: the service omits fields it has no
//! value for, and a missing field must not fail the whole call.

use serde::Deserialize;

// --- Request options ---

/// Inputs for `/person/create`. Empty or absent fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct PersonCreate {
    pub person_name: Option<String>,
    pub face_id: Option<String>,
    pub tag: Option<String>,
    pub group_name: Option<String>,
}

/// Inputs for `/group/create`.
#[derive(Debug, Clone, Default)]
pub struct GroupCreate {
    pub group_name: String,
    pub tag: Option<String>,
    pub person_name: Option<String>,
}

/// Optional detection parameters.
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Detection mode, e.g. `oneface`
    pub mode: Option<String>,
    /// Tag stored with every detected face
    pub tag: Option<String>,
}

/// Optional identification parameters.
#[derive(Debug, Clone, Default)]
pub struct IdentifyOptions {
    pub mode: Option<String>,
    pub key_face_id: Option<String>,
}

impl IdentifyOptions {
    /// Identify only the largest face in the picture.
    pub fn one_face() -> Self {
        Self {
            mode: Some("oneface".to_string()),
            key_face_id: None,
        }
    }
}

// --- Response types ---

/// `/person/create`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonCreated {
    pub added_group: u32,
    pub added_face: u32,
    pub tag: String,
    pub person_name: String,
    pub person_id: String,
}

/// One face found by `/detection/detect`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectedFace {
    pub face_id: String,
    pub tag: String,
}

/// `/detection/detect`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Detection {
    pub session_id: String,
    pub url: String,
    pub img_id: String,
    pub img_width: u32,
    pub img_height: u32,
    pub face: Vec<DetectedFace>,
}

/// One scored match from `/recognition/identify`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub confidence: f64,
    pub person_id: String,
    pub person_name: String,
    pub tag: String,
}

/// A face in the query image and its candidates, in server order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdentifiedFace {
    pub face_id: String,
    pub candidate: Vec<Candidate>,
}

/// `/recognition/identify`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Identification {
    pub session_id: String,
    pub face: Vec<IdentifiedFace>,
}

impl Identification {
    /// Candidates for the first face, or `None` when there are none.
    pub fn candidates(&self) -> Option<&[Candidate]> {
        self.face
            .first()
            .map(|face| face.candidate.as_slice())
            .filter(|candidates| !candidates.is_empty())
    }
}

/// `/group/create`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupCreated {
    pub added_person: u32,
    pub group_id: String,
    pub group_name: String,
    pub tag: String,
}

/// `/train/identify`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainStarted {
    pub session_id: String,
}

/// `/info/get_session`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionInfo {
    pub session_id: String,
    pub create_time: i64,
    pub finish_time: i64,
    pub status: String,
}

/// Classified session status. Unknown values stay in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Succeeded,
    Failed,
    Pending(String),
}

impl SessionInfo {
    pub fn state(&self) -> SessionStatus {
        match self.status.as_str() {
            "SUCC" => SessionStatus::Succeeded,
            "FAILED" => SessionStatus::Failed,
            other => SessionStatus::Pending(other.to_string()),
        }
    }
}

/// `/person/add_face`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacesAdded {
    pub added: u32,
    pub success: bool,
}

/// One entry of `/info/get_person_list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonSummary {
    pub tag: String,
    pub person_name: String,
    pub person_id: String,
}

/// `/info/get_person_list`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonList {
    pub person: Vec<PersonSummary>,
}
