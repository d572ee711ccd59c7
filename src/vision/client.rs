use super::types::{DetectedFace, FaceApiErrorBody, VerifyRequest, VerifyResult};
use crate::{Error, Result, config::FaceConfig};
use async_trait::async_trait;
use reqwest::{Response, header::CONTENT_TYPE};
use tracing::debug;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Remote face detection and verification.
///
/// Both calls are network-bound and non-idempotent on the service side
/// (every detection mints new face ids), so callers must not retry blindly.
#[async_trait]
pub trait FaceAnalyzer: Send + Sync {
    /// Returns the faces found in `image`, in service order. No face is an
    /// empty vector, not an error.
    async fn detect_faces(&self, image: Vec<u8>) -> Result<Vec<DetectedFace>>;

    async fn verify(&self, face_id1: &str, face_id2: &str) -> Result<VerifyResult>;
}

pub struct AzureFaceClient {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    detection_model: String,
    recognition_model: String,
}

impl AzureFaceClient {
    pub fn new(config: &FaceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            detection_model: config.detection_model.clone(),
            recognition_model: config.recognition_model.clone(),
        }
    }

    async fn check(response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<FaceApiErrorBody>(&body) {
            Ok(parsed) => format!("{}: {}", parsed.error.code, parsed.error.message),
            Err(_) => body,
        };
        Err(Error::analysis(format!("{} failed ({}): {}", operation, status, detail)))
    }
}

#[async_trait]
impl FaceAnalyzer for AzureFaceClient {
    async fn detect_faces(&self, image: Vec<u8>) -> Result<Vec<DetectedFace>> {
        let url = format!("{}/face/v1.0/detect", self.endpoint);
        debug!("Submitting {} bytes for face detection", image.len());

        let response = self
            .client
            .post(&url)
            .query(&[
                ("returnFaceId", "true"),
                ("detectionModel", self.detection_model.as_str()),
                ("recognitionModel", self.recognition_model.as_str()),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(|e| Error::analysis(format!("Failed to send detect request: {}", e)))?;

        let faces: Vec<DetectedFace> = Self::check(response, "detect")
            .await?
            .json()
            .await
            .map_err(|e| Error::analysis(format!("Failed to parse detect response: {}", e)))?;

        debug!("Detected {} face(s)", faces.len());
        Ok(faces)
    }

    async fn verify(&self, face_id1: &str, face_id2: &str) -> Result<VerifyResult> {
        let url = format!("{}/face/v1.0/verify", self.endpoint);

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .json(&VerifyRequest { face_id1, face_id2 })
            .send()
            .await
            .map_err(|e| Error::analysis(format!("Failed to send verify request: {}", e)))?;

        let result: VerifyResult = Self::check(response, "verify")
            .await?
            .json()
            .await
            .map_err(|e| Error::analysis(format!("Failed to parse verify response: {}", e)))?;

        debug!(
            "Verified {} against {}: confidence {}",
            face_id1, face_id2, result.confidence
        );
        Ok(result)
    }
}
