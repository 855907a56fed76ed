//! # Promemo Scheduler
//! Long-lived background task that scans for events due tomorrow and hands
//! each one to the notification dispatcher.
//!
//! The scheduler is an explicit value owned by the service lifecycle: it is
//! constructed with its store and transport, started once, and stopped
//! through a watch channel. An in-flight tick always finishes before the
//! task exits.

pub mod dispatch;

pub use dispatch::{DeliveryOutcome, Dispatcher};

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use promemo_core::error::Result;
use promemo_core::traits::{EventStore, Transport};

pub struct ReminderScheduler {
    store: Arc<dyn EventStore>,
    dispatcher: Dispatcher,
    interval: Duration,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn EventStore>,
        transport: Arc<dyn Transport>,
        recipient: impl Into<String>,
        interval: Duration,
    ) -> Self {
        let dispatcher = Dispatcher::new(store.clone(), transport, recipient);
        Self {
            store,
            dispatcher,
            interval,
        }
    }

    /// Tick loop. Runs until the shutdown flag flips; errors inside a tick
    /// are logged and the loop keeps going.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        // First scan happens one full interval after start.
        let start = time::Instant::now() + self.interval;
        let mut ticker = time::interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Reminder scheduler started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let today = chrono::Local::now().date_naive();
                    match run_tick(self.store.as_ref(), &self.dispatcher, today).await {
                        Ok((0, 0)) => tracing::debug!("Reminder tick: nothing due"),
                        Ok((sent, failed)) => {
                            tracing::info!("Reminder tick: {sent} sent, {failed} failed");
                        }
                        Err(e) => tracing::error!("Reminder tick error: {e}"),
                    }
                }
                changed = shutdown.changed() => {
                    // A dropped sender also means shutdown.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Reminder scheduler stopped");
    }
}

/// One scan: query events due tomorrow that are still pending, dispatch
/// each independently in insertion order. Returns (sent, failed).
pub async fn run_tick(
    store: &dyn EventStore,
    dispatcher: &Dispatcher,
    today: NaiveDate,
) -> Result<(usize, usize)> {
    let Some(threshold) = today.succ_opt() else {
        return Ok((0, 0));
    };

    let due = store.query_pending_by_date(threshold).await?;
    let mut sent = 0;
    let mut failed = 0;
    for event in &due {
        match dispatcher.notify(event).await {
            DeliveryOutcome::Delivered => sent += 1,
            DeliveryOutcome::Failed(_) => failed += 1,
        }
    }
    Ok((sent, failed))
}
