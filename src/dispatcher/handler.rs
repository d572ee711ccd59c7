use super::event::{EventKind, InboundEvent};
use super::replies::{ANOTHER_PHOTO_PROMPT, DISPATCH_FAILURE, similarity_message};
use crate::{
    Result,
    line::{MessagingClient, ReplyMessage, WebhookEvent},
    session::FaceIdStore,
    vision::FaceAnalyzer,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Turns one webhook event into one reply and delivers it.
pub struct Dispatcher {
    messaging: Arc<dyn MessagingClient>,
    analyzer: Arc<dyn FaceAnalyzer>,
    last_face: Arc<dyn FaceIdStore>,
}

impl Dispatcher {
    pub fn new(
        messaging: Arc<dyn MessagingClient>,
        analyzer: Arc<dyn FaceAnalyzer>,
        last_face: Arc<dyn FaceIdStore>,
    ) -> Self {
        Self {
            messaging,
            analyzer,
            last_face,
        }
    }

    /// Replies to `event`, or returns `None` for event kinds the bot ignores.
    pub async fn dispatch(&self, event: WebhookEvent) -> Option<ReplyMessage> {
        match InboundEvent::from_webhook(event) {
            Some(inbound) => Some(self.handle(inbound).await),
            None => {
                debug!("Ignoring unsupported webhook event");
                None
            }
        }
    }

    pub async fn handle(&self, event: InboundEvent) -> ReplyMessage {
        let reply = match event.kind {
            EventKind::Image { message_id } => self.handle_image(&message_id).await,
            EventKind::Text { body } => ReplyMessage::text(body),
        };
        self.deliver(&event.reply_token, reply).await
    }

    /// Pushes `reply` to the platform and hands it back for the HTTP response.
    /// A failed push is logged only.
    async fn deliver(&self, reply_token: &str, reply: ReplyMessage) -> ReplyMessage {
        if let Err(e) = self
            .messaging
            .reply(reply_token, std::slice::from_ref(&reply))
            .await
        {
            warn!("Failed to push reply: {}", e);
        }
        reply
    }

    async fn handle_image(&self, message_id: &str) -> ReplyMessage {
        match self.compare_with_last_face(message_id).await {
            Ok(text) => ReplyMessage::text(text),
            Err(e) => {
                error!("Image {} could not be processed: {}", message_id, e);
                ReplyMessage::text(DISPATCH_FAILURE)
            }
        }
    }

    async fn compare_with_last_face(&self, message_id: &str) -> Result<String> {
        let image = self.messaging.fetch_content(message_id).await?;
        let faces = self.analyzer.detect_faces(image).await?;
        debug!("Detection for {} returned {} face(s)", message_id, faces.len());

        // Service order decides; no ranking by size or quality.
        let Some(face) = faces.into_iter().next() else {
            info!("No face found in image {}", message_id);
            return Ok(ANOTHER_PHOTO_PROMPT.to_string());
        };

        let text = match self.last_face.get() {
            Some(previous) => {
                let result = self.analyzer.verify(&face.face_id, &previous).await?;
                info!(
                    "Face {} vs {}: confidence {} (identical: {})",
                    face.face_id, previous, result.confidence, result.is_identical
                );
                similarity_message(result.confidence)
            }
            None => ANOTHER_PHOTO_PROMPT.to_string(),
        };

        self.last_face.set(face.face_id.clone());
        info!("Stored face {} as the comparison baseline", face.face_id);

        Ok(text)
    }
}
