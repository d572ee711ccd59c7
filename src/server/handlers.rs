use super::extract::SignedWebhook;
use crate::{dispatcher::Dispatcher, line::ReplyMessage};
use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use futures::{StreamExt, stream};
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub const GET_ACK: &str = "Hello LINE BOT! (HTTP GET)";

/// Answer to the console's connectivity check, which posts an empty batch.
pub const POST_ACK: &str = "Hello LINE BOT! (HTTP POST)";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub channel_secret: Arc<str>,
    pub max_concurrent_events: usize,
}

pub async fn liveness() -> &'static str {
    GET_ACK
}

pub async fn webhook(
    State(state): State<AppState>,
    SignedWebhook(payload): SignedWebhook,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("webhook", %request_id);

    async move {
        info!("Received webhook with {} event(s)", payload.events.len());

        if payload.events.is_empty() {
            info!("Received verification event");
            return POST_ACK.into_response();
        }

        // Order-preserving: replies line up with the input batch.
        let replies: Vec<Option<ReplyMessage>> = stream::iter(payload.events)
            .map(|event| state.dispatcher.dispatch(event))
            .buffered(state.max_concurrent_events.max(1))
            .collect()
            .await;

        info!(
            "Answered {} of {} event(s)",
            replies.iter().filter(|r| r.is_some()).count(),
            replies.len()
        );
        Json(replies).into_response()
    }
    .instrument(span)
    .await
}
