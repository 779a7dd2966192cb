//! Shared database handle for request handlers.
//!
//! One SQLite connection sits behind a mutex. Handlers run their storage
//! work on the blocking pool while holding the lock, so writes are
//! serialized and never block the async runtime.

use crate::config::DatabaseLocation;
use crate::error::ApiError;
use cats_core::db::{open_db, open_db_in_memory, ping_db, DbResult};
use log::{info, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle to the process-wide connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (and migrates) the store at `location`, then checks it answers.
    pub fn open(location: &DatabaseLocation) -> DbResult<Self> {
        let conn = match location {
            DatabaseLocation::InMemory => open_db_in_memory()?,
            DatabaseLocation::File(path) => open_db(path)?,
        };
        let clock_ms = ping_db(&conn)?;
        info!(
            "event=db_ready module=server status=ok location={} clock_ms={}",
            location, clock_ms
        );
        Ok(Self::from_connection(conn))
    }

    pub fn in_memory() -> DbResult<Self> {
        Self::open(&DatabaseLocation::InMemory)
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `work` against the connection on the blocking pool.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().unwrap_or_else(|poisoned| {
                // Open transactions were rolled back while unwinding.
                warn!("event=db_lock module=server status=recovered reason=poisoned");
                PoisonError::into_inner(poisoned)
            });
            work(&mut *guard)
        })
        .await?
    }
}
