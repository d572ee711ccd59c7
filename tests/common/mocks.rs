use async_trait::async_trait;
use face_match_bot::{
    Error, Result,
    line::{MessagingClient, ReplyMessage},
    vision::{DetectedFace, FaceAnalyzer, VerifyResult},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock LINE client: serves canned attachments and records replies.
#[derive(Debug, Default)]
pub struct MockMessagingClient {
    pub contents: Mutex<HashMap<String, Vec<u8>>>,
    pub fetches: Mutex<Vec<String>>,
    pub replies: Mutex<Vec<(String, Vec<ReplyMessage>)>>,
    pub reply_error: Option<String>,
}

impl MockMessagingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(self, message_id: &str, bytes: &[u8]) -> Self {
        self.contents
            .lock()
            .unwrap()
            .insert(message_id.to_string(), bytes.to_vec());
        self
    }

    pub fn with_reply_error(mut self, error: &str) -> Self {
        self.reply_error = Some(error.to_string());
        self
    }

    pub fn get_fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn get_replies(&self) -> Vec<(String, Vec<ReplyMessage>)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingClient for MockMessagingClient {
    async fn fetch_content(&self, message_id: &str) -> Result<Vec<u8>> {
        self.fetches.lock().unwrap().push(message_id.to_string());

        self.contents
            .lock()
            .unwrap()
            .get(message_id)
            .cloned()
            .ok_or_else(|| Error::retrieval(format!("content stream failed for {}", message_id)))
    }

    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<()> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), messages.to_vec()));

        match &self.reply_error {
            Some(error) => Err(Error::platform(error.clone())),
            None => Ok(()),
        }
    }
}

/// Mock Face API keyed by image bytes and face id pairs.
#[derive(Debug, Default)]
pub struct MockFaceAnalyzer {
    pub faces: Mutex<HashMap<Vec<u8>, Vec<String>>>,
    pub confidences: Mutex<HashMap<(String, String), f64>>,
    pub detect_error: Option<String>,
    pub detect_calls: Mutex<Vec<Vec<u8>>>,
    pub verify_calls: Mutex<Vec<(String, String)>>,
    /// Holds `verify` for the given first face id until notified.
    pub verify_gate: Option<(String, Arc<Notify>)>,
}

impl MockFaceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faces(self, image: &[u8], face_ids: &[&str]) -> Self {
        self.faces.lock().unwrap().insert(
            image.to_vec(),
            face_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn with_confidence(self, face_id1: &str, face_id2: &str, confidence: f64) -> Self {
        self.confidences
            .lock()
            .unwrap()
            .insert((face_id1.to_string(), face_id2.to_string()), confidence);
        self
    }

    pub fn with_detect_error(mut self, error: &str) -> Self {
        self.detect_error = Some(error.to_string());
        self
    }

    pub fn with_verify_gate(mut self, face_id1: &str, gate: Arc<Notify>) -> Self {
        self.verify_gate = Some((face_id1.to_string(), gate));
        self
    }

    pub fn get_verify_calls(&self) -> Vec<(String, String)> {
        self.verify_calls.lock().unwrap().clone()
    }

    pub fn detect_count(&self) -> usize {
        self.detect_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl FaceAnalyzer for MockFaceAnalyzer {
    async fn detect_faces(&self, image: Vec<u8>) -> Result<Vec<DetectedFace>> {
        self.detect_calls.lock().unwrap().push(image.clone());

        if let Some(ref error) = self.detect_error {
            return Err(Error::analysis(error.clone()));
        }

        let faces = self
            .faces
            .lock()
            .unwrap()
            .get(&image)
            .cloned()
            .unwrap_or_default();

        Ok(faces.into_iter().map(DetectedFace::new).collect())
    }

    async fn verify(&self, face_id1: &str, face_id2: &str) -> Result<VerifyResult> {
        self.verify_calls
            .lock()
            .unwrap()
            .push((face_id1.to_string(), face_id2.to_string()));

        if let Some((gated_face, gate)) = &self.verify_gate {
            if gated_face == face_id1 {
                gate.notified().await;
            }
        }

        let confidence = self
            .confidences
            .lock()
            .unwrap()
            .get(&(face_id1.to_string(), face_id2.to_string()))
            .copied();

        match confidence {
            Some(confidence) => Ok(VerifyResult {
                is_identical: confidence >= 0.5,
                confidence,
            }),
            None => Err(Error::analysis(format!(
                "FaceNotFound: {} or {} expired",
                face_id1, face_id2
            ))),
        }
    }
}
