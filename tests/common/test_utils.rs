use axum::{
    Router,
    body::Body,
    http::{Request, header::CONTENT_TYPE},
};
use face_match_bot::{
    config::{Config, FaceConfig, LineConfig, LogsConfig, ServerConfig},
    dispatcher::Dispatcher,
    line::{SIGNATURE_HEADER, WebhookEvent, sign},
    server::{self, AppState},
    session::{FaceIdStore, LastFaceSlot},
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::mocks::{MockFaceAnalyzer, MockMessagingClient};

pub const TEST_CHANNEL_SECRET: &str = "test-channel-secret";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            max_concurrent_events: 4,
        },
        line: LineConfig {
            channel_secret: TEST_CHANNEL_SECRET.to_string(),
            channel_access_token: "test-access-token".to_string(),
            api_base: "https://api.line.me".to_string(),
            data_api_base: "https://api-data.line.me".to_string(),
            download_path: None,
        },
        face: FaceConfig {
            endpoint: "https://example.cognitiveservices.azure.com".to_string(),
            key: "test-face-key".to_string(),
            detection_model: "detection_01".to_string(),
            recognition_model: "recognition_01".to_string(),
        },
    }
}

/// Dispatcher wired to the given mocks plus the slot it shares with the test.
pub struct TestHarness {
    pub messaging: Arc<MockMessagingClient>,
    pub analyzer: Arc<MockFaceAnalyzer>,
    pub last_face: Arc<LastFaceSlot>,
    pub dispatcher: Arc<Dispatcher>,
}

impl TestHarness {
    pub fn new(messaging: MockMessagingClient, analyzer: MockFaceAnalyzer) -> Self {
        let messaging = Arc::new(messaging);
        let analyzer = Arc::new(analyzer);
        let last_face = Arc::new(LastFaceSlot::new());
        let dispatcher = Arc::new(Dispatcher::new(
            messaging.clone(),
            analyzer.clone(),
            last_face.clone(),
        ));

        Self {
            messaging,
            analyzer,
            last_face,
            dispatcher,
        }
    }

    pub fn with_last_face(self, face_id: &str) -> Self {
        self.last_face.set(face_id.to_string());
        self
    }

    pub fn last_face(&self) -> Option<String> {
        self.last_face.get()
    }

    pub fn router(&self) -> Router {
        server::router(AppState {
            dispatcher: self.dispatcher.clone(),
            channel_secret: Arc::from(TEST_CHANNEL_SECRET),
            max_concurrent_events: 4,
        })
    }
}

pub fn text_event_json(reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "timestamp": 1700000000000i64,
        "source": { "type": "user", "userId": "U0000000000" },
        "message": { "type": "text", "id": format!("text-{}", reply_token), "text": text }
    })
}

pub fn image_event_json(reply_token: &str, message_id: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "timestamp": 1700000000000i64,
        "source": { "type": "user", "userId": "U0000000000" },
        "message": {
            "type": "image",
            "id": message_id,
            "contentProvider": { "type": "line" }
        }
    })
}

/// A message event relayed while the channel is in standby mode: no reply token.
pub fn standby_text_event_json(text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "standby",
        "timestamp": 1700000000000i64,
        "source": { "type": "user", "userId": "U0000000000" },
        "message": { "type": "text", "id": "standby-1", "text": text }
    })
}

pub fn follow_event_json(reply_token: &str) -> Value {
    json!({
        "type": "follow",
        "replyToken": reply_token,
        "source": { "type": "user", "userId": "U0000000000" }
    })
}

pub fn webhook_event(value: Value) -> WebhookEvent {
    serde_json::from_value(value).unwrap()
}

pub fn webhook_body(events: Vec<Value>) -> String {
    json!({ "destination": "Ubot", "events": events }).to_string()
}

pub fn signed_request(body: String) -> Request<Body> {
    let signature = sign(TEST_CHANNEL_SECRET, body.as_bytes()).unwrap();
    Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, "application/json")
        .header(SIGNATURE_HEADER, signature)
        .body(Body::from(body))
        .unwrap()
}
