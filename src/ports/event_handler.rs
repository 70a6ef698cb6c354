//! EventHandler port - Interface for processing verified webhook events.
//!
//! This port defines how the application hands a verified event to
//! downstream processing without knowing what that processing does
//! (notifications, throttling, dashboards, further REST calls).

use async_trait::async_trait;

use crate::domain::webhook::{ProcessingError, WebhookEvent};

/// Port for processing a verified webhook event.
///
/// Implementations must ensure:
/// - `handle` is safe to call concurrently from many requests
/// - Failures are returned as `ProcessingError`, never panics
/// - Work is kept short; long-running processing should be queued so the
///   delivery can be acknowledged promptly
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process a single verified event.
    ///
    /// Called at most once per delivery, only after signature verification
    /// succeeded. A returned error is recorded as a processing failure but
    /// does not reject the delivery.
    async fn handle(&self, event: &WebhookEvent) -> Result<(), ProcessingError>;
}
