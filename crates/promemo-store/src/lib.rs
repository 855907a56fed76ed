//! # Promemo Store
//! SQLite-backed persistence for scheduled events.

pub mod sqlite;

pub use sqlite::SqliteStore;

use std::sync::Arc;

use promemo_core::config::StoreConfig;
use promemo_core::error::Result;
use promemo_core::traits::EventStore;

/// Open the event store described by the configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn EventStore>> {
    Ok(Arc::new(SqliteStore::open(&config.db_path())?))
}
