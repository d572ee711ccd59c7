use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    /// Opaque handle, valid inside the Face service for a limited time.
    pub face_id: String,
    #[serde(default)]
    pub face_rectangle: Option<FaceRectangle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRectangle {
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResult {
    #[serde(default)]
    pub is_identical: bool,
    /// Similarity in [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyRequest<'a> {
    pub face_id1: &'a str,
    pub face_id2: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaceApiErrorBody {
    pub error: FaceApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaceApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl DetectedFace {
    pub fn new(face_id: impl Into<String>) -> Self {
        Self {
            face_id: face_id.into(),
            face_rectangle: None,
        }
    }
}
