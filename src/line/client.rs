use super::content;
use super::types::{ReplyMessage, ReplyRequest};
use crate::{Error, Result, config::LineConfig};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// The two platform calls the bot makes.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Downloads the attachment of `message_id` in full.
    async fn fetch_content(&self, message_id: &str) -> Result<Vec<u8>>;

    /// Sends `messages` using a single-use reply token.
    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<()>;
}

pub struct LineClient {
    client: reqwest::Client,
    api_base: String,
    data_api_base: String,
    access_token: String,
    download_path: Option<PathBuf>,
}

impl LineClient {
    pub fn new(config: &LineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            data_api_base: config.data_api_base.trim_end_matches('/').to_string(),
            access_token: config.channel_access_token.clone(),
            download_path: config.download_path.as_ref().map(PathBuf::from),
        }
    }
}

#[async_trait]
impl MessagingClient for LineClient {
    async fn fetch_content(&self, message_id: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/v2/bot/message/{}/content",
            self.data_api_base, message_id
        );
        debug!("Fetching message content: {}", message_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| Error::retrieval(format!("Failed to request content {}: {}", message_id, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::retrieval(format!(
                "Content {} unavailable ({}): {}",
                message_id, status, body
            )));
        }

        content::drain(response.bytes_stream(), self.download_path.as_deref()).await
    }

    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<()> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let request = ReplyRequest {
            reply_token,
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::platform(format!("Failed to send reply: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::platform(format!("Reply rejected ({}): {}", status, body)));
        }

        debug!("Reply delivered with {} message(s)", messages.len());
        Ok(())
    }
}
