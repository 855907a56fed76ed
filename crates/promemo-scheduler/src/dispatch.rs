//! Notification dispatcher — one reminder message per due event.

use std::sync::Arc;

use promemo_core::traits::{EventStore, Transport};
use promemo_core::types::Event;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
}

/// Formats and sends one reminder per event, to a single fixed recipient.
/// Failures never escape a [`Dispatcher::notify`] call.
pub struct Dispatcher {
    store: Arc<dyn EventStore>,
    transport: Arc<dyn Transport>,
    recipient: String,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn EventStore>,
        transport: Arc<dyn Transport>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            store,
            transport,
            recipient: recipient.into(),
        }
    }

    pub fn reminder_body(event: &Event) -> String {
        format!(
            "Reminder: you have a {} check tomorrow at {}!",
            event.subject,
            event.time_str()
        )
    }

    /// Send the reminder for one event. On confirmed delivery the event is
    /// marked notified; exactly one call wins that transition, so an
    /// overlapping tick or a restart cannot double-send.
    pub async fn notify(&self, event: &Event) -> DeliveryOutcome {
        let body = Self::reminder_body(event);

        match self.transport.send(&self.recipient, &body).await {
            Ok(()) => {
                match self.store.mark_notified(event.id).await {
                    Ok(true) => {
                        tracing::info!("Reminder sent for {} (event {})", event.subject, event.id);
                    }
                    Ok(false) => {
                        tracing::debug!("Event {} already marked notified", event.id);
                    }
                    Err(e) => {
                        // Delivered but the flag did not persist; the next
                        // tick may send again. Surfaced for the operator.
                        tracing::warn!("Event {} delivered but not marked: {e}", event.id);
                    }
                }
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::error!("Reminder for {} (event {}) failed: {e}", event.subject, event.id);
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }
}
