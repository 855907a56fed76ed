//! Event store contract.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::types::{Event, EventDraft};

/// Durable collection of [`Event`] records.
///
/// Append-only: there is no update or delete. The single in-place
/// mutation is the `notified` flag, owned by [`EventStore::mark_notified`].
/// Each operation is atomic with respect to itself; no caller spans
/// multiple calls needing joint atomicity.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a pre-validated draft under a fresh unique id.
    async fn insert(&self, draft: EventDraft) -> Result<Event>;

    /// All events ordered by (date, time) ascending; ties keep insertion order.
    async fn query_ordered(&self) -> Result<Vec<Event>>;

    /// All events on `date`, in insertion order.
    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Event>>;

    /// Events on `date` that have not been notified yet, in insertion order.
    async fn query_pending_by_date(&self, date: NaiveDate) -> Result<Vec<Event>>;

    /// Atomic check-then-set of the `notified` flag. Returns `true` only
    /// for the call that performed the pending -> notified transition.
    async fn mark_notified(&self, id: i64) -> Result<bool>;

    /// Total number of stored events.
    async fn count(&self) -> Result<u64>;
}
