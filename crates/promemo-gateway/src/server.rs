//! Router assembly and service lifecycle.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use promemo_agent::Agent;
use promemo_core::PromemoConfig;
use promemo_core::error::Result;
use promemo_core::traits::{EventStore, Transport};
use promemo_scheduler::ReminderScheduler;

use crate::routes;

/// Shared state for all request handlers.
pub struct AppState {
    pub agent: Agent,
    pub store: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            agent: Agent::new(store.clone()),
            store,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/events", get(routes::list_events).post(routes::create_event))
        .route("/webhook", post(routes::webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the gateway until ctrl-c. The reminder scheduler is started here and
/// stopped here: on shutdown the watch flag flips, an in-flight tick
/// finishes, and only then does serve return.
pub async fn serve(
    config: &PromemoConfig,
    store: Arc<dyn EventStore>,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let app = router(Arc::new(AppState::new(store.clone())));

    let scheduler = ReminderScheduler::new(
        store,
        transport,
        config.reminder.recipient.clone(),
        config.reminder_interval(),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_handle = tokio::spawn(scheduler.run(shutdown_rx));

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    let _ = scheduler_handle.await;

    tracing::info!("Gateway stopped");
    Ok(())
}
