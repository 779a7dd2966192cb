//! Customer aggregate: customers, applications, vendor tags and notes.
//!
//! # Responsibility
//! - Carry persisted rows out of the repository layer.
//! - Carry client-supplied payloads into create/update transactions.
//!
//! # Invariants
//! - Draft text fields are `Option` so a missing value reaches the schema's
//!   `NOT NULL` constraint and fails the enclosing transaction as a whole.
//! - Timestamps are epoch milliseconds.

use crate::model::tag::normalize_tags;
use std::fmt::{Display, Formatter};

pub type CustomerId = i64;
pub type ApplicationId = i64;
pub type NoteId = i64;

/// One row of `customers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub industry: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// An application with its tag lists, in storage insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub customer_id: CustomerId,
    pub name: String,
    pub modalities: Vec<String>,
    pub models: Vec<String>,
    pub cloud_services: Vec<String>,
}

/// One row of `meeting_notes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingNote {
    pub id: NoteId,
    pub customer_id: CustomerId,
    pub text: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// Full customer read model used by the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetail {
    pub customer: Customer,
    /// Applications in insertion order.
    pub applications: Vec<Application>,
    pub compute_vendors: Vec<String>,
    /// Meeting notes, newest first.
    pub meeting_notes: Vec<MeetingNote>,
}

/// Write payload for one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDraft {
    pub name: Option<String>,
    pub modalities: Vec<String>,
    pub models: Vec<String>,
    pub cloud_services: Vec<String>,
}

impl ApplicationDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns the draft with every tag list normalized.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name,
            modalities: normalize_tags(&self.modalities),
            models: normalize_tags(&self.models),
            cloud_services: normalize_tags(&self.cloud_services),
        }
    }
}

/// Write payload for one meeting note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub text: Option<String>,
    /// Client-supplied creation time; the store clock is used when `None`.
    pub created_at: Option<i64>,
}

impl NoteDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            created_at: None,
        }
    }
}

/// Write payload for customer create and full-replace update.
///
/// `meeting_notes` is only consumed by create; update leaves existing notes
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub applications: Vec<ApplicationDraft>,
    pub compute_vendors: Vec<String>,
    pub meeting_notes: Vec<NoteDraft>,
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            industry: Some(industry.into()),
            ..Self::default()
        }
    }

    /// Returns the draft with vendor and application tag lists normalized.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name,
            industry: self.industry,
            applications: self
                .applications
                .into_iter()
                .map(ApplicationDraft::normalized)
                .collect(),
            compute_vendors: normalize_tags(&self.compute_vendors),
            meeting_notes: self.meeting_notes,
        }
    }
}

/// Identifies the record a lookup or write was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Customer(CustomerId),
    Application(ApplicationId),
    Note(NoteId),
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer(id) => write!(f, "customer {id}"),
            Self::Application(id) => write!(f, "application {id}"),
            Self::Note(id) => write!(f, "meeting note {id}"),
        }
    }
}
