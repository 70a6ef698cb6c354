//! Axum router configuration for the webhook receiver.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, receive_webhook, WebhookAppState};

/// Create the webhook receiver router.
///
/// Webhook endpoints carry no user authentication; deliveries are
/// authenticated by signature instead.
///
/// # Routes
/// - `POST /costkatana` - Receive a signed Cost Katana delivery
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/costkatana", post(receive_webhook))
}

/// Create the complete application router.
///
/// # Routes
/// - `POST /webhooks/costkatana` - Signed webhook deliveries
/// - `GET /health` - Liveness check
pub fn app_router(state: WebhookAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/webhooks", webhook_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
