use crate::line::{MessageContent, WebhookEvent};

/// One webhook event the bot knows how to answer.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub reply_token: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Image { message_id: String },
    Text { body: String },
}

impl InboundEvent {
    pub fn image(reply_token: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            kind: EventKind::Image {
                message_id: message_id.into(),
            },
        }
    }

    pub fn text(reply_token: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            kind: EventKind::Text { body: body.into() },
        }
    }

    /// `None` for event and message types the bot ignores, and for events
    /// that cannot be answered because they carry no reply token.
    pub fn from_webhook(event: WebhookEvent) -> Option<Self> {
        let WebhookEvent::Message(message_event) = event else {
            return None;
        };
        let reply_token = message_event.reply_token?;

        let kind = match message_event.message {
            MessageContent::Image { id } => EventKind::Image { message_id: id },
            MessageContent::Text { text, .. } => EventKind::Text { body: text },
            MessageContent::Unsupported => return None,
        };

        Some(Self { reply_token, kind })
    }
}
