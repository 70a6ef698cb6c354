//! Webhook configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Webhook configuration (Cost Katana shared secret and replay window).
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Shared signing secret issued when the webhook endpoint was registered.
    ///
    /// Held as a [`SecretString`] so it is redacted from `Debug` output and
    /// never appears in logs.
    pub secret: SecretString,

    /// Maximum allowed skew between the signed timestamp and the receiver's
    /// clock, in seconds. Deliveries outside this window are rejected as
    /// replay candidates.
    #[serde(default = "default_tolerance_secs")]
    pub tolerance_secs: i64,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK_SECRET"));
        }
        if self.tolerance_secs <= 0 || self.tolerance_secs > 86_400 {
            return Err(ValidationError::InvalidTolerance);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::new(String::new()),
            tolerance_secs: default_tolerance_secs(),
        }
    }
}

fn default_tolerance_secs() -> i64 {
    300
}
