//! Meeting note repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Notes are listed newest first (`created_at DESC, id DESC`).
//! - A note without a client timestamp takes the store clock.

use crate::model::customer::{CustomerId, EntityRef, MeetingNote, NoteDraft, NoteId};
use crate::repo::application_repo::customer_exists;
use crate::repo::{log_write, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::time::Instant;

const NOTE_SELECT_SQL: &str = "SELECT id, customer_id, note_text, created_at FROM meeting_notes";

/// Repository interface for meeting notes.
pub trait MeetingNoteRepository {
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<MeetingNote>>;
    /// Adds one note under an existing customer.
    fn add_note(&mut self, customer_id: CustomerId, draft: &NoteDraft) -> RepoResult<NoteId>;
    /// Deletes one note by id.
    fn delete_note(&self, id: NoteId) -> RepoResult<()>;
}

/// SQLite-backed meeting note repository.
pub struct SqliteMeetingNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteMeetingNoteRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl MeetingNoteRepository for SqliteMeetingNoteRepository<'_> {
    fn get_note(&self, id: NoteId) -> RepoResult<Option<MeetingNote>> {
        let note = self
            .conn
            .query_row(
                &format!("{NOTE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    fn add_note(&mut self, customer_id: CustomerId, draft: &NoteDraft) -> RepoResult<NoteId> {
        let started_at = Instant::now();
        let result = (|| -> RepoResult<NoteId> {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            if !customer_exists(&tx, customer_id)? {
                return Err(RepoError::NotFound(EntityRef::Customer(customer_id)));
            }
            let id = insert_note(&tx, customer_id, draft)?;
            tx.commit()?;
            Ok(id)
        })();
        log_write("note_add", started_at, &result);
        result
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = match self
            .conn
            .execute("DELETE FROM meeting_notes WHERE id = ?1;", [id])
        {
            Ok(0) => Err(RepoError::NotFound(EntityRef::Note(id))),
            Ok(_) => Ok(()),
            Err(err) => Err(err.into()),
        };
        log_write("note_delete", started_at, &result);
        result
    }
}

/// Inserts one note row. Callers own the enclosing transaction.
pub(crate) fn insert_note(
    conn: &Connection,
    customer_id: CustomerId,
    draft: &NoteDraft,
) -> RepoResult<NoteId> {
    conn.execute(
        "INSERT INTO meeting_notes (customer_id, note_text, created_at)
         VALUES (?1, ?2, COALESCE(?3, strftime('%s', 'now') * 1000));",
        params![customer_id, draft.text, draft.created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Loads all notes of one customer, newest first.
pub(crate) fn load_notes(conn: &Connection, customer_id: CustomerId) -> RepoResult<Vec<MeetingNote>> {
    let mut stmt = conn.prepare(&format!(
        "{NOTE_SELECT_SQL} WHERE customer_id = ?1 ORDER BY created_at DESC, id DESC;"
    ))?;
    let mut rows = stmt.query([customer_id])?;
    let mut notes = Vec::new();
    while let Some(row) = rows.next()? {
        notes.push(note_from_row(row)?);
    }
    Ok(notes)
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<MeetingNote> {
    Ok(MeetingNote {
        id: row.get("id")?,
        customer_id: row.get("customer_id")?,
        text: row.get("note_text")?,
        created_at: row.get("created_at")?,
    })
}
