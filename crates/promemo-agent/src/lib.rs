//! # Promemo Agent
//! Turns inbound channel text into store mutations and replies.
//!
//! Every inbound message gets exactly one reply: a confirmation, a
//! formatted list, the fixed help text, or the malformed-format error.
//! The only errors that escape are store failures, which the caller maps
//! to its own fault surface.

pub mod command;

use std::sync::Arc;

use promemo_core::error::{PromemoError, Result};
use promemo_core::traits::EventStore;
use promemo_core::types::{Event, IncomingMessage, OutgoingMessage};

pub use command::Command;

/// Fixed help reply naming the two supported commands.
pub const HELP: &str = "Hi! I am the Planner Bot. Use:\n\
'add <subject> <date YYYY-MM-DD> <time HH:MM> <description>' to add an event,\n\
or send 'list' to see upcoming events.";

/// Fixed reply for an empty list.
pub const NO_EVENTS: &str = "No events found.";

/// The reply engine. Cheap to clone; the store is shared.
#[derive(Clone)]
pub struct Agent {
    store: Arc<dyn EventStore>,
}

impl Agent {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Process an inbound message and produce the reply addressed back to
    /// its sender.
    pub async fn handle_incoming(&self, msg: &IncomingMessage) -> Result<OutgoingMessage> {
        let reply = self.reply_to(&msg.content).await?;
        Ok(OutgoingMessage::new(msg.sender.clone(), reply))
    }

    /// Interpret one line of inbound text and render the reply.
    pub async fn reply_to(&self, text: &str) -> Result<String> {
        match Command::parse(text) {
            Ok(Command::Add(draft)) => {
                let event = self.store.insert(draft).await?;
                tracing::info!("Added event {}: {}", event.id, event.subject);
                Ok(format!(
                    "Event for {} added on {} at {}!",
                    event.subject,
                    event.date_str(),
                    event.time_str()
                ))
            }
            Ok(Command::List) => {
                let events = self.store.query_ordered().await?;
                Ok(render_list(&events))
            }
            Ok(Command::Unknown) => Ok(HELP.to_string()),
            Err(PromemoError::MalformedCommand(reply)) => {
                tracing::debug!("Rejected command: {text:?}");
                Ok(reply)
            }
            Err(e) => Err(e),
        }
    }
}

fn render_list(events: &[Event]) -> String {
    if events.is_empty() {
        return NO_EVENTS.to_string();
    }
    let mut reply = String::from("Here are the upcoming events:\n");
    for event in events {
        reply.push_str(&format!(
            "{}. {} - {} {} - {}\n",
            event.id,
            event.subject,
            event.date_str(),
            event.time_str(),
            event.description
        ));
    }
    reply
}
