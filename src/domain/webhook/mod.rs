//! Webhook domain - signature protocol and event envelope.
//!
//! The per-request flow is:
//! parse header -> validate timestamp -> verify HMAC -> dispatch event.
//! A failure in any of the first three steps rejects the request with an
//! authentication error; a dispatch failure is recorded but the delivery
//! is still acknowledged.

mod errors;
mod event;
mod signature;

pub use errors::{ProcessingError, VerificationError};
pub use event::{KatanaEventType, WebhookEvent};
pub use signature::{SignatureHeader, WebhookVerifier, DEFAULT_TOLERANCE_SECS};

#[cfg(test)]
pub use event::WebhookEventBuilder;
