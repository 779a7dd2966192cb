//! Core domain logic for CATS, the customer AI tracking store.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LogSink, LoggingError};
pub use model::customer::{
    Application, ApplicationDraft, ApplicationId, Customer, CustomerDetail, CustomerDraft,
    CustomerId, EntityRef, MeetingNote, NoteDraft, NoteId,
};
pub use model::vocabulary::{vocabulary, Vocabulary};
pub use repo::application_repo::{ApplicationRepository, SqliteApplicationRepository};
pub use repo::customer_repo::{CustomerRepository, SqliteCustomerRepository};
pub use repo::note_repo::{MeetingNoteRepository, SqliteMeetingNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::application_service::ApplicationService;
pub use service::customer_service::CustomerService;
pub use service::note_service::NoteService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
