//! HTTP adapter for the Cost Katana webhook receiver.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{WebhookApiError, WebhookAppState, SIGNATURE_HEADER};
pub use routes::{app_router, webhook_routes};
