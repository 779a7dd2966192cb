//! Free-form tag kinds and value normalization.
//!
//! # Invariants
//! - Tags are not constrained to a vocabulary.
//! - Normalization trims, collapses inner whitespace, drops blanks and
//!   removes exact duplicates while keeping first-seen order.
//! - Case is preserved.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Tag lists attached to an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationTag {
    Modality,
    Model,
    CloudService,
}

impl ApplicationTag {
    pub const ALL: [ApplicationTag; 3] = [Self::Modality, Self::Model, Self::CloudService];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Modality => "modalities",
            Self::Model => "foundational_models",
            Self::CloudService => "cloud_services",
        }
    }

    /// Backing value column name.
    pub fn column(self) -> &'static str {
        match self {
            Self::Modality => "modality",
            Self::Model => "model_name",
            Self::CloudService => "service_name",
        }
    }
}

/// Normalizes one tag value. Returns `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(tag.trim(), " ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed.into_owned())
    }
}

/// Normalizes and deduplicates tag values in first-seen order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(tags.len());
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            if seen.insert(value.clone()) {
                unique.push(value);
            }
        }
    }
    unique
}
