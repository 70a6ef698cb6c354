//! Logging event handler - records verified events to the tracing output.
//!
//! This is the default downstream for known event types: it surfaces the
//! interesting fields of each alert to the operator. Deployments replace
//! it with handlers that notify chat channels, update dashboards, or
//! trigger throttling.

use async_trait::async_trait;

use crate::domain::webhook::{KatanaEventType, ProcessingError, WebhookEvent};
use crate::ports::EventHandler;

/// Handler that logs each event at a level matching its severity.
pub struct LogEventHandler;

#[async_trait]
impl EventHandler for LogEventHandler {
    async fn handle(&self, event: &WebhookEvent) -> Result<(), ProcessingError> {
        match event.parsed_type() {
            KatanaEventType::CostAlert => {
                tracing::warn!(
                    event_id = %event.event_id,
                    amount = ?event.data.pointer("/cost/amount"),
                    "cost alert"
                );
            }
            KatanaEventType::BudgetExceeded => {
                tracing::warn!(
                    event_id = %event.event_id,
                    percent_used = ?event.data.pointer("/budget/percentUsed"),
                    "budget exceeded"
                );
            }
            KatanaEventType::CostSpikeDetected => {
                tracing::warn!(
                    event_id = %event.event_id,
                    change_percentage = ?event.data.pointer("/metrics/changePercentage"),
                    "cost spike detected"
                );
            }
            KatanaEventType::SecurityAlert => {
                tracing::error!(
                    event_id = %event.event_id,
                    threat_type = ?event.data.pointer("/threat/type"),
                    "security alert"
                );
            }
            KatanaEventType::Unknown => {
                tracing::info!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    "event received"
                );
            }
        }
        Ok(())
    }
}
