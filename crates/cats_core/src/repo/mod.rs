//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from service orchestration.
//! - Own transaction boundaries for every multi-statement write.
//!
//! # Invariants
//! - A write either commits every statement or none; an uncommitted
//!   `Transaction` rolls back when dropped on an error path.
//! - Lookups aimed at a missing row return `RepoError::NotFound` from write
//!   paths and `Ok(None)` from read paths.

pub mod application_repo;
pub mod customer_repo;
mod error;
pub mod note_repo;

pub use error::{RepoError, RepoResult};

use log::{error, info};
use std::time::Instant;

/// Emits one `key=value` event for a finished write.
pub(crate) fn log_write<T>(event: &str, started_at: Instant, result: &RepoResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=repo status=ok duration_ms={duration_ms}"),
        Err(RepoError::NotFound(target)) => info!(
            "event={event} module=repo status=not_found duration_ms={duration_ms} target=\"{target}\""
        ),
        Err(err) => error!(
            "event={event} module=repo status=error duration_ms={duration_ms} error_code=tx_rolled_back error={err}"
        ),
    }
}
