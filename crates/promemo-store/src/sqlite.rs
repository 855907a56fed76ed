//! SQLite event store backend.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, params};

use promemo_core::error::{PromemoError, Result};
use promemo_core::traits::EventStore;
use promemo_core::types::{DATE_FORMAT, Event, EventDraft, TIME_FORMAT};

/// Event store backed by a single SQLite database.
///
/// The connection mutex makes each store operation atomic with respect to
/// itself, which is all the callers require.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    subject TEXT NOT NULL,
    date TEXT NOT NULL,
    time TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    notified INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);";

impl SqliteStore {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| PromemoError::store(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| PromemoError::store(e.to_string()))?;

        tracing::debug!("Event store opened: {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| PromemoError::store(e.to_string()))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| PromemoError::store(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| PromemoError::store(e.to_string()))
    }
}

fn query_events<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Event>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| PromemoError::store(e.to_string()))?;

    let rows = stmt
        .query_map(params, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, bool>(5)?,
            ))
        })
        .map_err(|e| PromemoError::store(e.to_string()))?;

    let mut events = Vec::new();
    for row in rows {
        let (id, subject, date_s, time_s, description, notified) =
            row.map_err(|e| PromemoError::store(e.to_string()))?;
        // Rows are written pre-validated; a parse failure here means a
        // corrupt database, which is fatal for the operation in progress.
        let date = NaiveDate::parse_from_str(&date_s, DATE_FORMAT)
            .map_err(|e| PromemoError::store(format!("bad date in row {id}: {e}")))?;
        let time = NaiveTime::parse_from_str(&time_s, TIME_FORMAT)
            .map_err(|e| PromemoError::store(format!("bad time in row {id}: {e}")))?;
        events.push(Event {
            id,
            subject,
            date,
            time,
            description,
            notified,
        });
    }
    Ok(events)
}

const SELECT: &str = "SELECT id, subject, date, time, description, notified FROM events";

#[async_trait]
impl EventStore for SqliteStore {
    async fn insert(&self, draft: EventDraft) -> Result<Event> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO events (subject, date, time, description) VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.subject,
                draft.date.format(DATE_FORMAT).to_string(),
                draft.time.format(TIME_FORMAT).to_string(),
                draft.description,
            ],
        )
        .map_err(|e| PromemoError::store(e.to_string()))?;

        let id = conn.last_insert_rowid();
        tracing::debug!("Stored event {id}: {}", draft.subject);
        Ok(Event {
            id,
            subject: draft.subject,
            date: draft.date,
            time: draft.time,
            description: draft.description,
            notified: false,
        })
    }

    async fn query_ordered(&self) -> Result<Vec<Event>> {
        let conn = self.lock()?;
        query_events(&conn, &format!("{SELECT} ORDER BY date, time, id"), params![])
    }

    async fn query_by_date(&self, date: NaiveDate) -> Result<Vec<Event>> {
        let conn = self.lock()?;
        query_events(
            &conn,
            &format!("{SELECT} WHERE date = ?1 ORDER BY id"),
            params![date.format(DATE_FORMAT).to_string()],
        )
    }

    async fn query_pending_by_date(&self, date: NaiveDate) -> Result<Vec<Event>> {
        let conn = self.lock()?;
        query_events(
            &conn,
            &format!("{SELECT} WHERE date = ?1 AND notified = 0 ORDER BY id"),
            params![date.format(DATE_FORMAT).to_string()],
        )
    }

    async fn mark_notified(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE events SET notified = 1 WHERE id = ?1 AND notified = 0",
                params![id],
            )
            .map_err(|e| PromemoError::store(e.to_string()))?;
        Ok(changed > 0)
    }

    async fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .map_err(|e| PromemoError::store(e.to_string()))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(subject: &str, date: &str, time: &str, description: &str) -> EventDraft {
        EventDraft::new(
            subject,
            NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            NaiveTime::parse_from_str(time, TIME_FORMAT).unwrap(),
            description,
        )
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_ids() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.insert(draft("Math", "2025-03-20", "09:30", "")).await.unwrap();
        let b = store.insert(draft("History", "2025-03-21", "11:00", "")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(!a.notified);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_query_ordered_sorts_by_date_then_time() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(draft("C", "2025-03-21", "08:00", "")).await.unwrap();
        store.insert(draft("A", "2025-03-20", "14:00", "")).await.unwrap();
        store.insert(draft("B", "2025-03-20", "09:30", "")).await.unwrap();

        let subjects: Vec<String> = store
            .query_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.subject)
            .collect();
        assert_eq!(subjects, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_query_ordered_ties_keep_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(draft("first", "2025-03-20", "09:30", "")).await.unwrap();
        store.insert(draft("second", "2025-03-20", "09:30", "")).await.unwrap();
        store.insert(draft("third", "2025-03-20", "09:30", "")).await.unwrap();

        let subjects: Vec<String> = store
            .query_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.subject)
            .collect();
        assert_eq!(subjects, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_query_by_date_filters_exactly() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(draft("yesterday", "2025-03-19", "09:00", "")).await.unwrap();
        store.insert(draft("today", "2025-03-20", "09:00", "")).await.unwrap();
        store.insert(draft("tomorrow", "2025-03-21", "09:00", "")).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        let events = store.query_by_date(date).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].subject, "tomorrow");
    }

    #[tokio::test]
    async fn test_mark_notified_wins_only_once() {
        let store = SqliteStore::open_in_memory().unwrap();
        let event = store.insert(draft("Math", "2025-03-20", "09:30", "")).await.unwrap();

        assert!(store.mark_notified(event.id).await.unwrap());
        assert!(!store.mark_notified(event.id).await.unwrap());
        assert!(!store.mark_notified(9999).await.unwrap());
    }

    #[tokio::test]
    async fn test_pending_query_skips_notified() {
        let store = SqliteStore::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let a = store.insert(draft("A", "2025-03-20", "09:00", "")).await.unwrap();
        store.insert(draft("B", "2025-03-20", "10:00", "")).await.unwrap();

        store.mark_notified(a.id).await.unwrap();

        let pending = store.query_pending_by_date(date).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].subject, "B");

        // The unfiltered by-date query still sees both.
        assert_eq!(store.query_by_date(date).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_description_preserved_verbatim() {
        let store = SqliteStore::open_in_memory().unwrap();
        let event = store
            .insert(draft("Math", "2025-03-20", "09:30", "Polynomials  test, ch. 4"))
            .await
            .unwrap();

        let fetched = store.query_ordered().await.unwrap();
        assert_eq!(fetched[0].description, "Polynomials  test, ch. 4");
        assert_eq!(fetched[0].id, event.id);
    }

    #[tokio::test]
    async fn test_reopen_persists_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(draft("Math", "2025-03-20", "09:30", "x")).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.query_ordered().await.unwrap()[0].subject, "Math");
    }
}
