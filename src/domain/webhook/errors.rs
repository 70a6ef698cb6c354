//! Error types for webhook verification and event processing.
//!
//! Verification failures are authentication errors: the request cannot be
//! trusted and is rejected with 401. Processing failures happen after a
//! successful verification and never revoke the event's authenticity.

use axum::http::StatusCode;
use thiserror::Error;

/// Authentication failure while verifying an incoming webhook delivery.
///
/// Every variant is terminal for the request and maps to 401. The wire
/// reason string (see [`VerificationError::reason`]) is the only detail
/// surfaced to the caller; anything more would help an attacker probe
/// the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The signature header was absent or empty.
    #[error("Missing signature header")]
    MissingHeader,

    /// The signature header did not match the `t=<unix>,v1=<hex>` shape.
    #[error("Malformed signature header")]
    MalformedHeader,

    /// The signed timestamp is outside the replay tolerance window.
    #[error("Timestamp outside tolerance window")]
    TimestampExpired,

    /// The recomputed HMAC did not match the received signature.
    #[error("Signature mismatch")]
    SignatureMismatch,
}

impl VerificationError {
    /// The machine-readable reason string returned in the 401 response body.
    pub fn reason(&self) -> &'static str {
        match self {
            VerificationError::MissingHeader => "missing_header",
            VerificationError::MalformedHeader => "malformed_header",
            VerificationError::TimestampExpired => "timestamp_expired",
            VerificationError::SignatureMismatch => "signature_mismatch",
        }
    }

    /// Maps the error to an HTTP status code.
    ///
    /// All verification failures are authentication failures; the sender
    /// must not retry them with the same payload.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

/// Failure raised by a registered event handler after verification succeeded.
///
/// Processing failures are logged and surfaced to the operator, but the
/// delivery is still acknowledged: the event was authentic, and a non-2xx
/// response would only trigger the sender's retry storm.
#[derive(Debug, Clone, Error)]
#[error("Handler for '{event_type}' failed: {message}")]
pub struct ProcessingError {
    /// The event type whose handler failed.
    pub event_type: String,
    /// Human-readable failure description.
    pub message: String,
}

impl ProcessingError {
    pub fn new(event_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Reason String Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_header_reason() {
        assert_eq!(VerificationError::MissingHeader.reason(), "missing_header");
    }

    #[test]
    fn malformed_header_reason() {
        assert_eq!(
            VerificationError::MalformedHeader.reason(),
            "malformed_header"
        );
    }

    #[test]
    fn timestamp_expired_reason() {
        assert_eq!(
            VerificationError::TimestampExpired.reason(),
            "timestamp_expired"
        );
    }

    #[test]
    fn signature_mismatch_reason() {
        assert_eq!(
            VerificationError::SignatureMismatch.reason(),
            "signature_mismatch"
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn all_verification_errors_return_unauthorized() {
        let errors = [
            VerificationError::MissingHeader,
            VerificationError::MalformedHeader,
            VerificationError::TimestampExpired,
            VerificationError::SignatureMismatch,
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    // ══════════════════════════════════════════════════════════════
    // ProcessingError Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn processing_error_displays_event_type_and_message() {
        let err = ProcessingError::new("cost.alert", "downstream timeout");
        assert_eq!(
            format!("{}", err),
            "Handler for 'cost.alert' failed: downstream timeout"
        );
    }
}
