use super::handlers::AppState;
use crate::line::{SIGNATURE_HEADER, WebhookPayload, verify_signature};
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use tracing::warn;

/// A webhook body that carried a valid `x-line-signature`.
///
/// The signature covers the raw bytes, so the body is buffered and checked
/// before it is parsed.
#[derive(Debug)]
pub struct SignedWebhook(pub WebhookPayload);

#[async_trait]
impl FromRequest<AppState> for SignedWebhook {
    type Rejection = (StatusCode, &'static str);

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let signature = req
            .headers()
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let Some(signature) = signature else {
            warn!("Webhook request without signature header");
            return Err((StatusCode::UNAUTHORIZED, "missing signature"));
        };

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "unreadable body"))?;

        if !verify_signature(&state.channel_secret, &signature, &body) {
            warn!("Webhook signature mismatch");
            return Err((StatusCode::UNAUTHORIZED, "invalid signature"));
        }

        let payload = serde_json::from_slice(&body).map_err(|e| {
            warn!("Invalid webhook payload: {}", e);
            (StatusCode::BAD_REQUEST, "invalid webhook payload")
        })?;

        Ok(Self(payload))
    }
}
