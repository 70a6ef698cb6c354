//! HTTP handlers for the webhook receiver endpoints.
//!
//! These handlers connect Axum routes to the domain verifier and the
//! application-layer dispatcher.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::EventDispatcher;
use crate::domain::webhook::{VerificationError, WebhookEvent, WebhookVerifier};

use super::dto::{AckResponse, ErrorResponse, HealthResponse};

/// Header carrying the delivery signature.
pub const SIGNATURE_HEADER: &str = "X-CostKatana-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for the webhook receiver.
///
/// Cloned per request; both members are read-only after startup, so no
/// locking is needed across concurrent deliveries.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: Arc<WebhookVerifier>,
    pub dispatcher: Arc<EventDispatcher>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhooks/costkatana - Receive a signed Cost Katana delivery.
///
/// The body is taken as raw bytes: the signature covers the exact bytes
/// on the wire, and the envelope is deserialized only after verification.
pub async fn receive_webhook(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = match headers.get(SIGNATURE_HEADER) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| VerificationError::MalformedHeader)?,
        ),
    };

    let now = chrono::Utc::now().timestamp();
    state.verifier.verify(&body, signature, now)?;

    // Authentic but unusable payloads are a client error, distinct from
    // an authentication failure.
    let event: WebhookEvent =
        serde_json::from_slice(&body).map_err(|e| WebhookApiError::InvalidPayload(e.to_string()))?;

    tracing::info!(
        event_id = %event.event_id,
        event_type = %event.event_type,
        "webhook received"
    );

    // Dispatch outcomes (no handler, handler failure) are logged by the
    // dispatcher; none of them block the acknowledgment.
    state.dispatcher.dispatch(&event).await;

    Ok(Json(AckResponse {
        received: true,
        event_id: event.event_id,
    }))
}

/// GET /health - Liveness check.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts verification failures to HTTP responses.
#[derive(Debug)]
pub enum WebhookApiError {
    /// Authentication failure; maps to 401 with the wire reason string.
    Verification(VerificationError),
    /// Signature verified but the body is not a valid event envelope.
    InvalidPayload(String),
}

impl From<VerificationError> for WebhookApiError {
    fn from(err: VerificationError) -> Self {
        Self::Verification(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            WebhookApiError::Verification(err) => {
                tracing::warn!(reason = err.reason(), "webhook rejected");
                let body = ErrorResponse::new(err.reason());
                (err.status_code(), Json(body)).into_response()
            }
            WebhookApiError::InvalidPayload(detail) => {
                tracing::warn!(%detail, "webhook payload rejected");
                let body = ErrorResponse::new("invalid_payload");
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::ProcessingError;
    use crate::ports::EventHandler;
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use secrecy::SecretString;
    use std::sync::Mutex;

    const TEST_SECRET: &str = "whk_test_secret";

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    impl RecordingHandler {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, event: &WebhookEvent) -> Result<(), ProcessingError> {
            self.seen.lock().unwrap().push(event.event_id.clone());
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, event: &WebhookEvent) -> Result<(), ProcessingError> {
            Err(ProcessingError::new(event.event_type.clone(), "boom"))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_verifier() -> Arc<WebhookVerifier> {
        Arc::new(WebhookVerifier::new(
            SecretString::new(TEST_SECRET.to_string()),
            300,
        ))
    }

    fn test_state(dispatcher: EventDispatcher) -> WebhookAppState {
        WebhookAppState {
            verifier: test_verifier(),
            dispatcher: Arc::new(dispatcher),
        }
    }

    fn signed_headers(header_value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(header_value).unwrap());
        headers
    }

    fn test_body() -> Bytes {
        Bytes::from_static(br#"{"event_id":"evt_1","event_type":"cost.alert","data":{}}"#)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_delivery_is_acknowledged_and_dispatched() {
        let handler = Arc::new(RecordingHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register("cost.alert", handler.clone());
        let state = test_state(dispatcher);

        let body = test_body();
        let now = chrono::Utc::now().timestamp();
        let header = state.verifier.sign(now, &body);

        let result =
            receive_webhook(State(state), signed_headers(&header), body).await;

        assert!(result.is_ok());
        assert_eq!(*handler.seen.lock().unwrap(), vec!["evt_1"]);
    }

    #[tokio::test]
    async fn missing_header_returns_401_missing_header() {
        let state = test_state(EventDispatcher::new());

        let result = receive_webhook(State(state), HeaderMap::new(), test_body()).await;

        let err = result.err().expect("expected rejection");
        assert!(matches!(
            err,
            WebhookApiError::Verification(VerificationError::MissingHeader)
        ));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_returns_401() {
        let state = test_state(EventDispatcher::new());

        let result =
            receive_webhook(State(state), signed_headers("not-a-signature"), test_body()).await;

        let err = result.err().expect("expected rejection");
        assert!(matches!(
            err,
            WebhookApiError::Verification(VerificationError::MalformedHeader)
        ));
    }

    #[tokio::test]
    async fn stale_timestamp_returns_401_timestamp_expired() {
        let state = test_state(EventDispatcher::new());
        let body = test_body();
        // Correctly signed, but 10 minutes old
        let stale = chrono::Utc::now().timestamp() - 600;
        let header = state.verifier.sign(stale, &body);

        let result = receive_webhook(State(state), signed_headers(&header), body).await;

        let err = result.err().expect("expected rejection");
        assert!(matches!(
            err,
            WebhookApiError::Verification(VerificationError::TimestampExpired)
        ));
    }

    #[tokio::test]
    async fn tampered_body_returns_401_signature_mismatch() {
        let state = test_state(EventDispatcher::new());
        let now = chrono::Utc::now().timestamp();
        let header = state.verifier.sign(now, &test_body());
        let tampered = Bytes::from_static(
            br#"{"event_id":"evt_2","event_type":"cost.alert","data":{}}"#,
        );

        let result = receive_webhook(State(state), signed_headers(&header), tampered).await;

        let err = result.err().expect("expected rejection");
        assert!(matches!(
            err,
            WebhookApiError::Verification(VerificationError::SignatureMismatch)
        ));
    }

    #[tokio::test]
    async fn authentic_but_invalid_json_returns_400() {
        let state = test_state(EventDispatcher::new());
        let body = Bytes::from_static(b"not json at all");
        let now = chrono::Utc::now().timestamp();
        let header = state.verifier.sign(now, &body);

        let result = receive_webhook(State(state), signed_headers(&header), body).await;

        let err = result.err().expect("expected rejection");
        assert!(matches!(err, WebhookApiError::InvalidPayload(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unregistered_event_type_is_still_acknowledged() {
        let state = test_state(EventDispatcher::new());
        let body = Bytes::from_static(
            br#"{"event_id":"evt_new","event_type":"brand.new.type","data":{}}"#,
        );
        let now = chrono::Utc::now().timestamp();
        let header = state.verifier.sign(now, &body);

        let result = receive_webhook(State(state), signed_headers(&header), body).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failing_handler_is_still_acknowledged() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register("cost.alert", Arc::new(FailingHandler));
        let state = test_state(dispatcher);

        let body = test_body();
        let now = chrono::Utc::now().timestamp();
        let header = state.verifier.sign(now, &body);

        let result = receive_webhook(State(state), signed_headers(&header), body).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = health().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_maps_all_verification_reasons_to_401() {
        let reasons = [
            VerificationError::MissingHeader,
            VerificationError::MalformedHeader,
            VerificationError::TimestampExpired,
            VerificationError::SignatureMismatch,
        ];
        for reason in reasons {
            let response = WebhookApiError::Verification(reason).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn api_error_maps_invalid_payload_to_400() {
        let response =
            WebhookApiError::InvalidPayload("expected value at line 1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
