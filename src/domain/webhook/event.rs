//! Cost Katana webhook event envelope.
//!
//! Defines the structure carried by every webhook delivery. The `data`
//! payload is opaque at this layer; its shape depends on the event type
//! and is interpreted by the registered handler.

use serde::{Deserialize, Serialize};

/// A webhook event envelope.
///
/// Deserialized once per request from the verified raw body, passed to
/// exactly one handler, then discarded. Persistence is not this layer's
/// responsibility.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub event_id: String,

    /// Dot-namespaced type of event (e.g., "cost.alert").
    pub event_type: String,

    /// Event-specific payload (polymorphic based on event type).
    pub data: serde_json::Value,
}

impl WebhookEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> KatanaEventType {
        KatanaEventType::from_str(&self.event_type)
    }

    /// Attempts to deserialize the data payload as the specified type.
    pub fn deserialize_data<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}

/// Known Cost Katana event types.
///
/// The sender may introduce new types at any time; `Unknown` keeps the
/// receiver forward compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KatanaEventType {
    /// A cost threshold alert fired.
    CostAlert,
    /// A configured budget was exceeded.
    BudgetExceeded,
    /// An anomalous cost spike was detected.
    CostSpikeDetected,
    /// A security-relevant event was detected.
    SecurityAlert,
    /// Unknown or unhandled event type.
    Unknown,
}

impl KatanaEventType {
    /// Parse event type from string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "cost.alert" => Self::CostAlert,
            "budget.exceeded" => Self::BudgetExceeded,
            "cost.spike_detected" => Self::CostSpikeDetected,
            "security.alert" => Self::SecurityAlert,
            _ => Self::Unknown,
        }
    }

    /// Convert to the wire event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CostAlert => "cost.alert",
            Self::BudgetExceeded => "budget.exceeded",
            Self::CostSpikeDetected => "cost.spike_detected",
            Self::SecurityAlert => "security.alert",
            Self::Unknown => "unknown",
        }
    }
}

/// Builder for creating test WebhookEvent instances.
#[cfg(test)]
pub struct WebhookEventBuilder {
    event_id: String,
    event_type: String,
    data: serde_json::Value,
}

#[cfg(test)]
impl Default for WebhookEventBuilder {
    fn default() -> Self {
        Self {
            event_id: "evt_test_123".to_string(),
            event_type: "cost.alert".to_string(),
            data: serde_json::json!({}),
        }
    }
}

#[cfg(test)]
impl WebhookEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = event_id.into();
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn build(self) -> WebhookEvent {
        WebhookEvent {
            event_id: self.event_id,
            event_type: self.event_type,
            data: self.data,
        }
    }
}
