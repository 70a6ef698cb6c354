//! HTTP DTOs (Data Transfer Objects) for the webhook receiver endpoint.
//!
//! These types define the JSON response structure of the receiver. The
//! request body is not modeled here: signature verification needs the raw
//! bytes, so deserialization into [`crate::domain::webhook::WebhookEvent`]
//! happens only after the signature checks out.

use serde::Serialize;

/// Acknowledgment returned for every authenticated delivery.
///
/// Returned even when the handler failed: receipt is acknowledged fast,
/// processing failures are recorded separately.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    /// Always true on acknowledgment.
    pub received: bool,
    /// The event_id from the delivered envelope.
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// Error body returned for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable reason, e.g. "signature_mismatch".
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
