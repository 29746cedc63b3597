//! Enrollment: detect exactly one face in an image and attach it to a person.

use crate::api::{DetectOptions, DetectedFace, Detection, FaceApi};
use crate::error::EnrollError;
use std::path::Path;

/// A successful enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enrolled {
    /// Faces the service reports as added
    pub added: u32,
}

/// Pick the only face in a detection result.
pub fn single_face(detection: &Detection) -> Result<&DetectedFace, EnrollError> {
    match detection.face.as_slice() {
        [] => Err(EnrollError::NoFace),
        [face] => Ok(face),
        faces => Err(EnrollError::TooManyFaces(faces.len())),
    }
}

/// Detect the face in the image at `url` and add it to `person_name`.
pub async fn enroll_from_url(
    api: &dyn FaceApi,
    person_name: &str,
    url: &str,
) -> Result<Enrolled, EnrollError> {
    let detection = api.detect_url(url, &DetectOptions::default()).await?;
    attach(api, person_name, &detection).await
}

/// Detect the face in the local image at `path` and add it to `person_name`.
pub async fn enroll_from_file(
    api: &dyn FaceApi,
    person_name: &str,
    path: &Path,
) -> Result<Enrolled, EnrollError> {
    let detection = api.detect_file(path, &DetectOptions::default()).await?;
    attach(api, person_name, &detection).await
}

async fn attach(
    api: &dyn FaceApi,
    person_name: &str,
    detection: &Detection,
) -> Result<Enrolled, EnrollError> {
    let face = single_face(detection)?;
    tracing::debug!("Adding face {} to person {person_name}", face.face_id);

    let added = api.person_add_face(person_name, &face.face_id).await?;
    if !added.success {
        return Err(EnrollError::Rejected);
    }
    Ok(Enrolled { added: added.added })
}
