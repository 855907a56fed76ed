//! # Promemo Gateway
//! HTTP surface: the inbound messaging webhook, the thin JSON API over the
//! same store mutations, and the service lifecycle that owns the reminder
//! scheduler task.

pub mod routes;
pub mod server;

pub use server::{AppState, serve};
