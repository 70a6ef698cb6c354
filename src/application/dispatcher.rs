//! EventDispatcher - routes verified events to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::webhook::{ProcessingError, WebhookEvent};
use crate::ports::EventHandler;

/// Outcome of dispatching a single verified event.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// A handler was found and completed successfully.
    Handled,
    /// No handler is registered for the event type. Not an error: the
    /// sender may introduce new types before this receiver learns them.
    NoHandler,
    /// The handler ran and failed. The delivery is still acknowledged;
    /// the error is recorded for the operator.
    Failed(ProcessingError),
}

impl DispatchOutcome {
    /// Returns the processing error, if the dispatch failed.
    pub fn error(&self) -> Option<&ProcessingError> {
        match self {
            DispatchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Routes verified webhook events to handlers keyed by event type.
///
/// Registration happens once at startup; dispatch is read-only and safe
/// to share across concurrent requests behind an `Arc`.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an event type (exact string match,
    /// e.g. "cost.alert"). A later registration for the same type
    /// replaces the earlier one.
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.handlers.insert(event_type.into(), handler);
    }

    /// Returns true if a handler is registered for the event type.
    pub fn is_registered(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches a verified event to its handler.
    ///
    /// Never returns an error: an unregistered type and a failing handler
    /// are both expressed in the [`DispatchOutcome`] so the caller can
    /// acknowledge the delivery regardless.
    pub async fn dispatch(&self, event: &WebhookEvent) -> DispatchOutcome {
        let handler = match self.handlers.get(&event.event_type) {
            Some(handler) => handler,
            None => {
                tracing::info!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    "no handler registered, ignoring event"
                );
                return DispatchOutcome::NoHandler;
            }
        };

        match handler.handle(event).await {
            Ok(()) => {
                tracing::debug!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    "event handled"
                );
                DispatchOutcome::Handled
            }
            Err(err) => {
                tracing::error!(
                    event_id = %event.event_id,
                    event_type = %event.event_type,
                    error = %err,
                    "handler failed, acknowledging anyway"
                );
                DispatchOutcome::Failed(err)
            }
        }
    }
}
