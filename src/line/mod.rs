mod client;
pub mod content;
pub mod signature;
mod types;

pub use client::{LineClient, MessagingClient};
pub use signature::{SIGNATURE_HEADER, sign, verify_signature};
pub use types::{
    EventSource, MessageContent, MessageEvent, ReplyMessage, WebhookEvent, WebhookPayload,
};
