//! Shared data types.

pub mod event;
pub mod message;

pub use event::{DATE_FORMAT, Event, EventDraft, TIME_FORMAT};
pub use message::{IncomingMessage, OutgoingMessage};
