//! JSON shapes exchanged with clients.
//!
//! Response field names follow the browser client: snake_case row columns
//! plus camelCase nested lists. Timestamps go out as RFC 3339 strings.

use cats_core::{
    Application, ApplicationDraft, Customer, CustomerDetail, CustomerDraft, MeetingNote,
    NoteDraft,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Formats epoch milliseconds as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: i64,
    pub customer_name: String,
    pub industry: Option<String>,
    pub created_at: String,
}

impl From<Customer> for CustomerView {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            customer_name: value.name,
            industry: value.industry,
            created_at: format_timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationView {
    pub id: i64,
    pub customer_id: i64,
    pub application_name: String,
    pub modalities: Vec<String>,
    pub models: Vec<String>,
    #[serde(rename = "cloudServices")]
    pub cloud_services: Vec<String>,
}

impl From<Application> for ApplicationView {
    fn from(value: Application) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            application_name: value.name,
            modalities: value.modalities,
            models: value.models,
            cloud_services: value.cloud_services,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteView {
    pub id: i64,
    pub customer_id: i64,
    pub note_text: String,
    pub created_at: String,
}

impl From<MeetingNote> for NoteView {
    fn from(value: MeetingNote) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            note_text: value.text,
            created_at: format_timestamp(value.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailView {
    #[serde(flatten)]
    pub customer: CustomerView,
    pub applications: Vec<ApplicationView>,
    #[serde(rename = "computeVendors")]
    pub compute_vendors: Vec<String>,
    #[serde(rename = "meetingNotes")]
    pub meeting_notes: Vec<NoteView>,
}

impl From<CustomerDetail> for CustomerDetailView {
    fn from(value: CustomerDetail) -> Self {
        Self {
            customer: value.customer.into(),
            applications: value.applications.into_iter().map(Into::into).collect(),
            compute_vendors: value.compute_vendors,
            meeting_notes: value.meeting_notes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of customer create and full-replace update.
///
/// Missing or `null` lists count as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    #[serde(alias = "customer_name")]
    pub customer_name: Option<String>,
    pub industry: Option<String>,
    pub applications: Option<Vec<ApplicationBody>>,
    #[serde(alias = "compute_vendors")]
    pub compute_vendors: Option<Vec<String>>,
    #[serde(alias = "meeting_notes")]
    pub meeting_notes: Option<Vec<NoteBody>>,
}

impl From<CustomerBody> for CustomerDraft {
    fn from(value: CustomerBody) -> Self {
        Self {
            name: value.customer_name,
            industry: value.industry,
            applications: value
                .applications
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            compute_vendors: value.compute_vendors.unwrap_or_default(),
            meeting_notes: value
                .meeting_notes
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationBody {
    #[serde(alias = "application_name")]
    pub name: Option<String>,
    pub modalities: Option<Vec<String>>,
    pub models: Option<Vec<String>>,
    #[serde(rename = "cloudServices", alias = "cloud_services")]
    pub cloud_services: Option<Vec<String>>,
}

impl From<ApplicationBody> for ApplicationDraft {
    fn from(value: ApplicationBody) -> Self {
        Self {
            name: value.name,
            modalities: value.modalities.unwrap_or_default(),
            models: value.models.unwrap_or_default(),
            cloud_services: value.cloud_services.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteBody {
    #[serde(alias = "note_text")]
    pub text: Option<String>,
    /// Client clock; the store clock is used when absent.
    #[serde(alias = "created_at")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<NoteBody> for NoteDraft {
    fn from(value: NoteBody) -> Self {
        Self {
            text: value.text,
            created_at: value.timestamp.map(|ts| ts.timestamp_millis()),
        }
    }
}
