//! # Promemo Channels
//! Messaging transport implementations.

pub mod noop;
pub mod twilio;

pub use noop::NoopTransport;
pub use twilio::{TwilioInbound, TwilioWhatsApp};

use std::sync::Arc;

use promemo_core::PromemoConfig;
use promemo_core::error::Result;
use promemo_core::traits::Transport;

/// Create the configured transport. Without Twilio credentials the
/// log-only transport is used, so the service still runs end to end.
pub fn create_transport(config: &PromemoConfig) -> Result<Arc<dyn Transport>> {
    match &config.twilio {
        Some(twilio) => Ok(Arc::new(TwilioWhatsApp::new(twilio.clone())?)),
        None => {
            tracing::warn!("No Twilio credentials configured; reminders will only be logged");
            Ok(Arc::new(NoopTransport))
        }
    }
}
