//! Meeting note use-case service.

use crate::model::customer::{CustomerId, MeetingNote, NoteDraft, NoteId};
use crate::repo::note_repo::MeetingNoteRepository;
use crate::service::{ServiceError, ServiceResult};

/// Note service facade over repository implementations.
pub struct NoteService<R: MeetingNoteRepository> {
    repo: R,
}

impl<R: MeetingNoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one note and returns it as stored, timestamp included.
    pub fn add_note(&mut self, customer_id: CustomerId, draft: NoteDraft) -> ServiceResult<MeetingNote> {
        let id = self.repo.add_note(customer_id, &draft)?;
        self.repo
            .get_note(id)?
            .ok_or(ServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    pub fn delete_note(&self, id: NoteId) -> ServiceResult<()> {
        Ok(self.repo.delete_note(id)?)
    }
}
