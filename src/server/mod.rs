mod extract;
pub mod handlers;

pub use extract::SignedWebhook;
pub use handlers::AppState;

use crate::{
    Result,
    config::Config,
    dispatcher::Dispatcher,
    line::LineClient,
    session::LastFaceSlot,
    vision::AzureFaceClient,
};
use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::liveness).post(handlers::webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let dispatcher = Dispatcher::new(
        Arc::new(LineClient::new(&config.line)),
        Arc::new(AzureFaceClient::new(&config.face)),
        Arc::new(LastFaceSlot::new()),
    );

    let app_state = AppState {
        dispatcher: Arc::new(dispatcher),
        channel_secret: Arc::from(config.line.channel_secret.as_str()),
        max_concurrent_events: config.server.max_concurrent_events,
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
