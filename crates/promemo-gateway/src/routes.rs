//! Request handlers for the gateway.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use promemo_channels::TwilioInbound;
use promemo_core::error::PromemoError;
use promemo_core::traits::EventStore;
use promemo_core::types::{DATE_FORMAT, Event, EventDraft, TIME_FORMAT};

use crate::server::AppState;

/// Handler fault surface: bad input is the caller's problem, everything
/// else is ours.
#[derive(Debug)]
pub enum GatewayError {
    Validation(String),
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<PromemoError> for GatewayError {
    fn from(err: PromemoError) -> Self {
        match err {
            PromemoError::MalformedCommand(msg) => Self::Validation(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Health check endpoint.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "promemo-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// All events, ordered by (date, time).
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Event>>, GatewayError> {
    Ok(Json(state.store.query_ordered().await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub subject: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// JSON twin of the `add` command.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), GatewayError> {
    let (Some(subject), Some(date_s), Some(time_s)) =
        (payload.subject, payload.date, payload.time)
    else {
        return Err(GatewayError::Validation("Missing fields".into()));
    };
    if subject.trim().is_empty() {
        return Err(GatewayError::Validation("Missing fields".into()));
    }

    let date = NaiveDate::parse_from_str(&date_s, DATE_FORMAT)
        .map_err(|_| GatewayError::Validation("Invalid date/time format".into()))?;
    let time = NaiveTime::parse_from_str(&time_s, TIME_FORMAT)
        .map_err(|_| GatewayError::Validation("Invalid date/time format".into()))?;

    let event = state
        .store
        .insert(EventDraft::new(subject, date, time, payload.description))
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Inbound messaging webhook. Always replies with a TwiML message —
/// confirmation, listing, help, or the format error.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<TwilioInbound>,
) -> Result<Response, GatewayError> {
    let incoming = payload.into_incoming();
    let reply = state.agent.handle_incoming(&incoming).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        twiml(&reply.content),
    )
        .into_response())
}

fn twiml(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        xml_escape(body)
    )
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
